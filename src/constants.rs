//! Constants for roam-pub
//!
//! Host names, environment variable names, serialized tag strings and limits
//! shared across the library and the command-line tool.

// === Remote Asset Storage ===

/// Host that serves Roam-managed (uploaded) files
pub const DEFAULT_ASSET_HOST: &str = "firebasestorage.googleapis.com";

/// Marker that precedes the object path in a storage URL: `/o/<object-path>`
pub const ASSET_OBJECT_MARKER: &str = "/o/";

// === Environment Variables ===

/// Overrides the managed-file host
pub const ENV_ASSET_HOST: &str = "ROAM_PUB_ASSET_HOST";

/// `0`, `false`, `no` or `off` make heading levels outside 1-6 non-fatal
pub const ENV_STRICT_HEADINGS: &str = "ROAM_PUB_STRICT_HEADINGS";

/// Enables the fixed-length stable id check
pub const ENV_UID_LENGTH: &str = "ROAM_PUB_UID_LENGTH";

/// Log filter directive for the binary (tracing-subscriber EnvFilter syntax)
pub const ENV_LOG: &str = "ROAM_PUB_LOG";

/// Filter used when `ROAM_PUB_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

// === Heading Levels ===

/// Smallest valid heading level
pub const MIN_HEADING_LEVEL: u8 = 1;

/// Largest valid heading level
pub const MAX_HEADING_LEVEL: u8 = 6;

// === Vertex Type Tags ===

/// Serialized tag for page vertices
pub const VERTEX_TYPE_PAGE: &str = "roam/page";

/// Serialized tag for plain body blocks
pub const VERTEX_TYPE_BLOCK_CONTENT: &str = "roam/block-content";

/// Serialized tag for heading blocks
pub const VERTEX_TYPE_BLOCK_HEADING: &str = "roam/block-heading";

/// Serialized tag for managed file references
pub const VERTEX_TYPE_FILE: &str = "roam/file";

// === Input Formats ===

/// File extension for JSON networks
pub const JSON_EXTENSION: &str = "json";

/// File extensions for YAML networks
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

// === Output ===

/// Indentation unit for the outline printed by `roam-pub tree`
pub const OUTLINE_INDENT: &str = "  ";

/// Placeholder shown for vertices with no text
pub const EMPTY_TEXT_PLACEHOLDER: &str = "(empty)";
