use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::ChannelKey;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Channel key taken from the `{channel}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel(pub ChannelKey);

impl FromRequest for Channel {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req))
    }
}

fn parse(req: &HttpRequest) -> Result<Channel, AppError> {
    let raw = req.match_info().get("channel").ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidChannel, "Missing channel parameter")
    })?;
    raw.parse::<ChannelKey>().map(Channel).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidChannel,
            format!("Invalid channel id: {raw}"),
        )
    })
}
