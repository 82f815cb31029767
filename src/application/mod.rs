mod config;
mod session;
pub mod teardown;

pub use config::{ResolvedConfig, SessionConfig};
pub use session::Session;
