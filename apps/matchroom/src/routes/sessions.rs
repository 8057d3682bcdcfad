//! Session lifecycle routes under `/api/channels/{channel}/session`.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::domain::{ReportForm, ResultSummary, SessionSnapshot};
use crate::error::AppError;
use crate::extractors::{ActingUser, Channel};
use crate::state::AppState;

/// POST /api/channels/{channel}/session
async fn start(
    channel: Channel,
    user: ActingUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot = app_state.sessions.start_session(channel.0, user.0)?;
    Ok(HttpResponse::Created().json(snapshot))
}

/// GET /api/channels/{channel}/session
async fn show(
    channel: Channel,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    Ok(web::Json(app_state.sessions.snapshot(channel.0)?))
}

/// DELETE /api/channels/{channel}/session
async fn delete(
    channel: Channel,
    user: ActingUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.sessions.delete(channel.0, user.0)?;
    Ok(HttpResponse::NoContent().finish())
}

async fn join(
    channel: Channel,
    user: ActingUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    Ok(web::Json(app_state.sessions.join(channel.0, user.0)?))
}

async fn leave(
    channel: Channel,
    user: ActingUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    Ok(web::Json(app_state.sessions.leave(channel.0, user.0)?))
}

/// POST /api/channels/{channel}/session/finalize
///
/// Organizer only. Draws teams and the host, and resolves the host's game id.
async fn finalize(
    channel: Channel,
    user: ActingUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    Ok(web::Json(
        app_state.sessions.finalize(channel.0, user.0).await?,
    ))
}

/// POST /api/channels/{channel}/session/reports
async fn submit_report(
    channel: Channel,
    user: ActingUser,
    body: web::Json<ReportForm>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionSnapshot>, AppError> {
    let snapshot = app_state
        .sessions
        .submit_report(channel.0, user.0, body.into_inner())
        .await?;
    Ok(web::Json(snapshot))
}

#[derive(Debug, Serialize)]
struct CompletedResponse {
    #[serde(flatten)]
    summary: ResultSummary,
    lines: Vec<String>,
}

/// POST /api/channels/{channel}/session/complete
///
/// Organizer only, once every participant has reported. The session is
/// retired and the channel is free for a new one.
async fn complete(
    channel: Channel,
    user: ActingUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CompletedResponse>, AppError> {
    let summary = app_state.sessions.complete(channel.0, user.0).await?;
    let lines = summary.render_lines();
    Ok(web::Json(CompletedResponse { summary, lines }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{channel}/session")
            .route(web::post().to(start))
            .route(web::get().to(show))
            .route(web::delete().to(delete)),
    )
    .service(web::resource("/{channel}/session/join").route(web::post().to(join)))
    .service(web::resource("/{channel}/session/leave").route(web::post().to(leave)))
    .service(web::resource("/{channel}/session/finalize").route(web::post().to(finalize)))
    .service(web::resource("/{channel}/session/reports").route(web::post().to(submit_report)))
    .service(web::resource("/{channel}/session/complete").route(web::post().to(complete)));
}
