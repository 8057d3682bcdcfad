use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Chat-platform user snowflake.
pub type UserId = u64;
/// Chat-platform channel snowflake; one live session per key.
pub type ChannelKey = u64;

/// Human-readable session id: `game-YYMMDDHHMM-xxxxxxxx`.
///
/// The minute stamp alone collides when two channels open sessions in the
/// same minute, so a 32-bit random suffix is appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate(now: OffsetDateTime, suffix: u32) -> Self {
        Self(format!(
            "game-{:02}{:02}{:02}{:02}{:02}-{suffix:08x}",
            now.year().rem_euclid(100),
            u8::from(now.month()),
            now.day(),
            now.hour(),
            now.minute(),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
