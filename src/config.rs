//! Normalization settings
//!
//! Settings are resolved in priority order:
//! - Command-line flags (applied by the binary on top of the result)
//! - Environment variables (ROAM_PUB_ASSET_HOST, ROAM_PUB_STRICT_HEADINGS, ROAM_PUB_UID_LENGTH)
//! - Built-in defaults

use crate::constants as C;

/// Settings shared by the classifier, the pre-validation checks and the normalizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Host whose image links mark a block as a managed file reference
    pub asset_host: String,
    /// Reject heading levels outside 1-6 instead of ignoring them
    pub strict_headings: bool,
    /// Require stable ids to have exactly this many characters
    pub stable_id_length: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_host: C::DEFAULT_ASSET_HOST.to_string(),
            strict_headings: true,
            stable_id_length: None,
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary variable source
    ///
    /// Empty or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        // Treat empty strings as None
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let asset_host = var(C::ENV_ASSET_HOST).unwrap_or(defaults.asset_host);

        let strict_headings = match var(C::ENV_STRICT_HEADINGS) {
            Some(value) => parse_flag(&value).unwrap_or_else(|| {
                tracing::warn!(%value, "ignoring unrecognized {}", C::ENV_STRICT_HEADINGS);
                defaults.strict_headings
            }),
            None => defaults.strict_headings,
        };

        let stable_id_length = match var(C::ENV_UID_LENGTH) {
            Some(value) => match value.parse::<usize>() {
                Ok(0) | Err(_) => {
                    tracing::warn!(%value, "ignoring invalid {}", C::ENV_UID_LENGTH);
                    defaults.stable_id_length
                }
                Ok(len) => Some(len),
            },
            None => defaults.stable_id_length,
        };

        Self {
            asset_host,
            strict_headings,
            stable_id_length,
        }
    }

    /// Builder-style override for the heading policy
    pub fn with_strict_headings(self, strict_headings: bool) -> Self {
        Self { strict_headings, ..self }
    }

    /// Builder-style override for the managed-file host
    pub fn with_asset_host(self, asset_host: impl Into<String>) -> Self {
        Self {
            asset_host: asset_host.into(),
            ..self
        }
    }

    /// Builder-style override for the stable id length check
    pub fn with_stable_id_length(self, stable_id_length: Option<usize>) -> Self {
        Self {
            stable_id_length,
            ..self
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
