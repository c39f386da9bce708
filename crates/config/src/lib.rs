//! Configuration for cf-vault
//!
//! This crate reads the platform CLI session (API endpoint, access token and
//! targeted space) and the runtime settings that tune logging and the
//! secrets-tool executable.

pub mod config;
pub mod loader;
pub mod session;

pub use config::{Config, RuntimeSettings};
pub use loader::ConfigLoader;
pub use session::CfSession;
