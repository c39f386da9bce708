//! Core domain types, errors, and constants for `cf-vault`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias covering every way an
//!   invocation can fail, from a missing argument to a failed `vault` run.
//! - **`types`**: newtype wrappers such as `EnvironmentVariables`,
//!   `CommandArguments` and `SecretToken`, plus the `ServiceInstance` and
//!   `CredentialRecord` values that flow through the pipeline.
//! - **`constants`**: alias prefixes, environment variable names and file paths.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
