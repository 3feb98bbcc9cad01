//! CLI command implementations.

mod agent;
mod chat;
mod config;
mod doctor;
mod extract;
mod serve;

pub use agent::run_agent;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use extract::run_extract;
pub use serve::run_serve;
