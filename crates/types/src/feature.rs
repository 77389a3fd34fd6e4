//! Feature flags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Optional UI behaviour that can be switched on through configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    InfiniteScroll,
    DarkMode,
    ShareButton,
}

impl Feature {
    /// Every recognized feature
    pub const ALL: [Feature; 3] = [Feature::InfiniteScroll, Feature::DarkMode, Feature::ShareButton];

    /// Identifier used in `ENABLED_FEATURES`
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::InfiniteScroll => "infinite-scroll",
            Feature::DarkMode => "dark-mode",
            Feature::ShareButton => "share-button",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token that names no known feature
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown feature '{0}'")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    /// Exact, case-sensitive match against the identifiers
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}
