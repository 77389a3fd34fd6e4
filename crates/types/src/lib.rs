//! Shared types for the storefront
//!
//! This crate contains the domain types shared by the configuration
//! assembler, the cart client and the storefront binary.

pub mod cart;
pub mod error;
pub mod feature;
pub mod utils;

// Re-export commonly used types
pub use cart::{Cart, CartId};
pub use error::{
    CartError, ConfigError, FieldError, Result, StorefrontError, ValidationErrors, ValidationRule,
};
pub use feature::{Feature, UnknownFeature};
