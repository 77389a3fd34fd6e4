//! Configuration validation rules
//!
//! Each rule checks one group of variables and reports field-level failures.
//! Rules always run in the same order so the error report is deterministic,
//! and every rule runs even when an earlier one failed.

use crate::schema::env;
use std::collections::HashMap;
use types::utils::{sanitize_for_logging, split_csv};
use types::{ConfigError, Feature, FieldError, ValidationErrors, ValidationRule};
use url::Url;

/// Read-only view over raw variables with the key prefix applied.
///
/// Empty values count as absent.
#[derive(Debug, Clone, Copy)]
pub struct EnvView<'a> {
    vars: &'a HashMap<String, Option<String>>,
    prefix: &'a str,
}

impl<'a> EnvView<'a> {
    pub fn new(vars: &'a HashMap<String, Option<String>>, prefix: &'a str) -> Self {
        Self { vars, prefix }
    }

    /// Full variable name as it appears in the environment
    pub fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.vars
            .get(&self.key(name))
            .and_then(|value| value.as_deref())
            .filter(|value| !value.is_empty())
    }
}

/// Sentry variables that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSentry {
    pub auth_token: String,
    pub dsn: String,
}

/// Datadog variables that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDatadog {
    pub application_id: String,
    pub site: String,
}

/// Every variable after validation, before assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEnv {
    pub api_base_url: String,
    pub sentry: Option<ValidatedSentry>,
    pub datadog: Option<ValidatedDatadog>,
    pub enabled_features: Vec<Feature>,
}

type RuleResult<T> = std::result::Result<T, Vec<FieldError>>;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run every rule and return the validated variables, or all failures
    pub fn validate(view: &EnvView<'_>) -> Result<ValidatedEnv, ConfigError> {
        let api = Self::validate_api(view);
        let sentry = Self::validate_sentry(view);
        let datadog = Self::validate_datadog(view);
        let features = Self::validate_features(view);

        match (api, sentry, datadog, features) {
            (Ok(api_base_url), Ok(sentry), Ok(datadog), Ok(enabled_features)) => Ok(ValidatedEnv {
                api_base_url,
                sentry,
                datadog,
                enabled_features,
            }),
            (api, sentry, datadog, features) => {
                let mut errors = ValidationErrors::new();
                for failed in [api.err(), sentry.err(), datadog.err(), features.err()]
                    .into_iter()
                    .flatten()
                {
                    for error in failed {
                        errors.push(error);
                    }
                }
                Err(ConfigError::Validation(errors))
            }
        }
    }

    fn validate_api(view: &EnvView<'_>) -> RuleResult<String> {
        let key = view.key(env::API_BASE_URL);
        let value = view
            .get(env::API_BASE_URL)
            .ok_or_else(|| vec![FieldError::new(&key, ValidationRule::Required, "is required")])?;

        check_absolute_url(&key, value, value).map_err(|e| vec![e])?;
        Ok(value.to_string())
    }

    fn validate_sentry(view: &EnvView<'_>) -> RuleResult<Option<ValidatedSentry>> {
        let mut errors = Vec::new();
        let pair = validate_pair(view, env::SENTRY_AUTH_TOKEN, env::SENTRY_DSN).unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        if let Some(dsn) = view.get(env::SENTRY_DSN) {
            if let Err(e) = check_absolute_url(&view.key(env::SENTRY_DSN), dsn, &sanitize_for_logging(dsn)) {
                errors.push(e);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(pair.map(|(auth_token, dsn)| ValidatedSentry { auth_token, dsn }))
    }

    fn validate_datadog(view: &EnvView<'_>) -> RuleResult<Option<ValidatedDatadog>> {
        let pair = validate_pair(view, env::DATADOG_APPLICATION_ID, env::DATADOG_SITE).map_err(|e| vec![e])?;
        Ok(pair.map(|(application_id, site)| ValidatedDatadog { application_id, site }))
    }

    fn validate_features(view: &EnvView<'_>) -> RuleResult<Vec<Feature>> {
        let Some(raw) = view.get(env::ENABLED_FEATURES) else {
            return Ok(Vec::new());
        };

        let key = view.key(env::ENABLED_FEATURES);
        let mut features = Vec::new();
        let mut errors = Vec::new();

        for token in split_csv(raw) {
            match token.parse::<Feature>() {
                Ok(feature) => features.push(feature),
                Err(e) => errors.push(FieldError::new(
                    &key,
                    ValidationRule::KnownFeature,
                    format!("{}, expected one of: {}", e, known_features()),
                )),
            }
        }

        if errors.is_empty() {
            Ok(features)
        } else {
            Err(errors)
        }
    }
}

/// Both-or-neither check for two variables
fn validate_pair(
    view: &EnvView<'_>,
    first: &str,
    second: &str,
) -> Result<Option<(String, String)>, FieldError> {
    match (view.get(first), view.get(second)) {
        (Some(a), Some(b)) => Ok(Some((a.to_string(), b.to_string()))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(FieldError::new(
            view.key(second),
            ValidationRule::PairedFields,
            format!("must be set when {} is set", view.key(first)),
        )),
        (None, Some(_)) => Err(FieldError::new(
            view.key(first),
            ValidationRule::PairedFields,
            format!("must be set when {} is set", view.key(second)),
        )),
    }
}

/// `shown` is what ends up in the message, so secrets can be masked
fn check_absolute_url(key: &str, value: &str, shown: &str) -> Result<(), FieldError> {
    Url::parse(value).map(|_| ()).map_err(|e| {
        FieldError::new(
            key,
            ValidationRule::AbsoluteUrl,
            format!("'{}' is not an absolute URL: {}", shown, e),
        )
    })
}

fn known_features() -> String {
    Feature::ALL
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
