//! Error types for roam-pub operations.

use thiserror::Error;

use crate::model::StableId;
use crate::validation::ValidationResult;

/// Errors that can occur while loading, validating or normalizing a network.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Malformed entity: {0}")]
    MalformedEntity(String),

    #[error("Ambiguous entity {stable_id}: {reason}")]
    AmbiguousEntity { stable_id: StableId, reason: String },

    #[error("Heading level {level} out of range on {stable_id}")]
    HeadingOutOfRange { stable_id: StableId, level: u8 },

    #[error("Network failed validation:\n{0}")]
    Validation(ValidationResult),

    #[error("Corrupt index: {0}")]
    CorruptIndex(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
