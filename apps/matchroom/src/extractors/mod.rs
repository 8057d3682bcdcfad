pub mod acting_user;
pub mod channel_key;

pub use acting_user::ActingUser;
pub use channel_key::Channel;
