use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::error::AppError;
use crate::extractors::ActingUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct GameIdBody {
    pub game_id: String,
}

/// PUT /api/players/me/game-id
async fn register_game_id(
    user: ActingUser,
    body: web::Json<GameIdBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .players
        .register_game_id(user.0, &body.game_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/players/{user_id}/game-id
async fn game_id(
    path: web::Path<UserId>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameIdBody>, AppError> {
    let game_id = app_state.players.game_id(path.into_inner()).await?;
    Ok(web::Json(GameIdBody { game_id }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me/game-id").route(web::put().to(register_game_id)))
        .service(web::resource("/{user_id}/game-id").route(web::get().to(game_id)));
}
