use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod players;
pub mod sessions;

/// Register every route on `cfg`.
///
/// `main.rs` and the route tests share this so both exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(crate::health::configure_routes)
        .service(web::scope("/api/channels").configure(sessions::configure_routes))
        .service(web::scope("/api/players").configure(players::configure_routes));
}

/// Malformed JSON bodies become problem+json 400s instead of actix's plain text.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid request body: {err}")).into()
    })
}
