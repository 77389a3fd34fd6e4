//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use types::Feature;

/// Names of the environment variables the assembler reads, without prefix
pub mod env {
    pub const API_BASE_URL: &str = "API_BASE_URL";
    pub const SENTRY_AUTH_TOKEN: &str = "SENTRY_AUTH_TOKEN";
    pub const SENTRY_DSN: &str = "SENTRY_DSN";
    pub const DATADOG_APPLICATION_ID: &str = "DATADOG_APPLICATION_ID";
    pub const DATADOG_SITE: &str = "DATADOG_SITE";
    pub const ENABLED_FEATURES: &str = "ENABLED_FEATURES";

    /// Every recognized variable, in validation order
    pub const ALL: [&str; 6] = [
        API_BASE_URL,
        SENTRY_AUTH_TOKEN,
        SENTRY_DSN,
        DATADOG_APPLICATION_ID,
        DATADOG_SITE,
        ENABLED_FEATURES,
    ];
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Feature flags in the order they were listed
    pub enabled_features: Vec<Feature>,
    /// Datadog RUM configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datadog: Option<DatadogConfig>,
    /// Sentry configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentry: Option<SentryConfig>,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Absolute URL of the backend root, exactly as supplied
    pub base_url: String,
}

/// Datadog configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatadogConfig {
    pub application_id: String,
    pub site: String,
}

/// Sentry configuration
///
/// The auth token is only checked for presence; it is never carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentryConfig {
    pub dsn: String,
}

impl Config {
    /// Whether `feature` is switched on
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled_features.contains(&feature)
    }
}
