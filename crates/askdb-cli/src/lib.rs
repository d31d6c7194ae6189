pub mod config;
pub mod demo;
pub mod errors;
pub mod server;

pub use config::{Config, ServerConfig};
pub use errors::CliError;
