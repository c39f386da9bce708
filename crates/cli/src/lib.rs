//! `cf-vault`: run the Vault CLI against the Vault bound to a service instance
//!
//! The binary is a thin shell around [`pipeline::VaultPipeline`], which wires
//! the platform session, the broker credential lookup and the process
//! launcher together.

pub mod commands;
pub mod execute;
pub mod logging;
pub mod pipeline;

pub use commands::Commands;
pub use pipeline::VaultPipeline;
