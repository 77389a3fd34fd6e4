//! Configuration management for the storefront
//!
//! This crate validates environment variables and assembles them into an
//! immutable [`Config`]. Validation is all-or-nothing: either every rule
//! passes and a configuration is returned, or every failure is reported.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{parse_config, ConfigLoader, EnvVars};
pub use schema::*;
pub use validation::*;
