pub mod rules;
pub mod server;

pub use rules::MatchRules;
pub use server::ServerConfig;
