use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::UserId;
use crate::error::AppError;

/// Header carrying the chat platform's id for the user performing the action.
pub const ACTING_USER_HEADER: &str = "x-user-id";

/// The user on whose behalf the request acts.
///
/// The chat gateway in front of this service authenticates users and forwards
/// their platform id; a missing or malformed header is rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser(pub UserId);

impl FromRequest for ActingUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req))
    }
}

fn parse(req: &HttpRequest) -> Result<ActingUser, AppError> {
    let raw = req
        .headers()
        .get(ACTING_USER_HEADER)
        .ok_or_else(|| AppError::unauthorized(format!("Missing {ACTING_USER_HEADER} header")))?;
    let user = raw
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<UserId>().ok())
        .ok_or_else(|| {
            AppError::unauthorized(format!("{ACTING_USER_HEADER} must be a numeric user id"))
        })?;
    Ok(ActingUser(user))
}
