//! Error types for the storefront

use std::fmt;
use thiserror::Error;

/// Main error type for the storefront
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart retrieval errors
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// The rule a configuration field violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// A required variable is missing
    Required,
    /// The value does not parse as an absolute URL
    AbsoluteUrl,
    /// Only one half of a both-or-neither pair is present
    PairedFields,
    /// A feature token is outside the recognized set
    KnownFeature,
}

impl ValidationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationRule::Required => "required",
            ValidationRule::AbsoluteUrl => "absolute_url",
            ValidationRule::PairedFields => "paired_fields",
            ValidationRule::KnownFeature => "known_feature",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Environment variable name, including any prefix
    pub field: String,
    pub rule: ValidationRule,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, rule: ValidationRule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.field, self.message, self.rule)
    }
}

/// Ordered collection of field failures, in the order the rules ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether `field` failed `rule`
    pub fn contains(&self, field: &str, rule: ValidationRule) -> bool {
        self.0.iter().any(|e| e.field == field && e.rule == rule)
    }

    /// Names of the offending fields, in report order
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more variables failed validation
    #[error("Configuration validation failed: {0}")]
    Validation(ValidationErrors),

    /// The dotenv file could not be read
    #[error("Failed to read environment file {path}: {message}")]
    EnvFile { path: String, message: String },
}

impl ConfigError {
    /// Field failures, when this is a validation error
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ConfigError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Cart retrieval specific errors
#[derive(Error, Debug)]
pub enum CartError {
    /// The cart endpoint could not be built from the base URL
    #[error("Invalid cart endpoint {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Transport level failure
    #[error("Cart request failed: {0}")]
    Request(String),

    /// Non-success HTTP status
    #[error("HTTP error fetching cart {cart_id}: {status}")]
    HttpStatus { cart_id: u64, status: u16 },

    /// Body was not valid JSON
    #[error("Failed to decode cart {cart_id}: {message}")]
    Decode { cart_id: u64, message: String },
}
