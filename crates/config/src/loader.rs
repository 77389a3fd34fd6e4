//! Configuration loader implementation

use crate::schema::{env, ApiConfig, Config, DatadogConfig, SentryConfig};
use crate::validation::{ConfigValidator, EnvView, ValidatedEnv};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;
use types::ConfigError;

/// Raw environment: variable name to optional value
pub type EnvVars = HashMap<String, Option<String>>;

/// Assembles a [`Config`] from environment variables.
///
/// Variables are looked up as `{prefix}{NAME}`; the default prefix is empty.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    prefix: String,
}

impl ConfigLoader {
    /// Loader without a key prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that reads e.g. `REACT_APP_API_BASE_URL` for `API_BASE_URL`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Validate `vars` and assemble the configuration.
    ///
    /// Pure: no I/O, and nothing is built unless every rule passes.
    pub fn parse(&self, vars: &EnvVars) -> Result<Config, ConfigError> {
        let validated = ConfigValidator::validate(&EnvView::new(vars, &self.prefix))?;
        Ok(Self::assemble(validated))
    }

    /// Load configuration from the process environment
    pub fn from_env(&self) -> Result<Config, ConfigError> {
        let vars = process_env();
        debug!(prefix = %self.prefix, vars = vars.len(), "Assembling configuration from process environment");
        self.parse(&vars)
    }

    /// Load configuration from a dotenv file only.
    ///
    /// The process environment is neither read nor modified.
    pub fn from_env_file<P: AsRef<Path>>(&self, path: P) -> Result<Config, ConfigError> {
        let vars = read_env_file(path.as_ref())?;
        self.parse(&vars)
    }

    /// Load configuration from an optional dotenv file, overridden by the
    /// process environment
    pub fn load(&self, env_file: Option<&Path>) -> Result<Config, ConfigError> {
        self.load_layered(env_file, process_env())
    }

    /// `env_file` values first, then `process` on top
    fn load_layered(&self, env_file: Option<&Path>, process: EnvVars) -> Result<Config, ConfigError> {
        let mut vars = match env_file {
            Some(path) => read_env_file(path)?,
            None => EnvVars::new(),
        };
        let file_vars = vars.len();

        merge_env(&mut vars, process);
        debug!(
            prefix = %self.prefix,
            file_vars,
            total_vars = vars.len(),
            "Assembling configuration"
        );

        self.parse(&vars)
    }

    /// Write a commented dotenv template listing every recognized variable
    pub fn create_example<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.example_env()).map_err(|e| ConfigError::EnvFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Contents of the dotenv template
    pub fn example_env(&self) -> String {
        let mut out = String::new();
        for name in env::ALL {
            let (comment, value) = match name {
                env::API_BASE_URL => ("Required. Absolute URL of the backend API", "https://api.example.com"),
                env::SENTRY_AUTH_TOKEN => ("Optional, set together with SENTRY_DSN", ""),
                env::SENTRY_DSN => ("Optional, absolute URL, set together with SENTRY_AUTH_TOKEN", ""),
                env::DATADOG_APPLICATION_ID => ("Optional, set together with DATADOG_SITE", ""),
                env::DATADOG_SITE => ("Optional, set together with DATADOG_APPLICATION_ID", ""),
                env::ENABLED_FEATURES => (
                    "Optional, comma-separated: infinite-scroll,dark-mode,share-button",
                    "",
                ),
                _ => continue,
            };
            let _ = writeln!(out, "# {}", comment);
            let _ = writeln!(out, "{}{}={}", self.prefix, name, value);
        }
        out
    }

    /// Build the configuration from validated variables.
    ///
    /// The Sentry auth token is dropped here on purpose: it is only needed
    /// where source maps are uploaded, never at runtime.
    fn assemble(validated: ValidatedEnv) -> Config {
        Config {
            api: ApiConfig {
                base_url: validated.api_base_url,
            },
            enabled_features: validated.enabled_features,
            datadog: validated.datadog.map(|d| DatadogConfig {
                application_id: d.application_id,
                site: d.site,
            }),
            sentry: validated.sentry.map(|s| SentryConfig { dsn: s.dsn }),
        }
    }
}

/// Assemble configuration from unprefixed variables
pub fn parse_config(vars: &EnvVars) -> Result<Config, ConfigError> {
    ConfigLoader::new().parse(vars)
}

/// Snapshot of the process environment. Non-unicode values count as absent.
fn process_env() -> EnvVars {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok())))
        .collect()
}

fn read_env_file(path: &Path) -> Result<EnvVars, ConfigError> {
    let env_file_error = |message: String| ConfigError::EnvFile {
        path: path.display().to_string(),
        message,
    };

    let iter = dotenvy::from_path_iter(path).map_err(|e| env_file_error(e.to_string()))?;
    let mut vars = EnvVars::new();
    for item in iter {
        let (key, value) = item.map_err(|e| env_file_error(e.to_string()))?;
        vars.insert(key, Some(value));
    }

    debug!(path = %path.display(), vars = vars.len(), "Read environment file");
    Ok(vars)
}

/// Overlay `overrides` onto `base`; absent override values do not erase
fn merge_env(base: &mut EnvVars, overrides: EnvVars) {
    for (key, value) in overrides {
        if value.is_some() {
            base.insert(key, value);
        }
    }
}
