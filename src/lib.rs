pub mod checks;
pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod markdown;
pub mod model;
pub mod network;
pub mod normalize;
pub mod tree;
pub mod validation;
pub mod vertex;

pub use classify::{Classified, Classifier};
pub use cli::{Cli, Command};
pub use config::Settings;
pub use error::{Error, Result};
pub use model::{HeadingLevel, InternalId, MediaType, RawEntity, ReferenceStub, StableId};
pub use network::{is_root, Network};
pub use normalize::{normalize, Normalizer};
pub use tree::{build_forest, TreeNode};
pub use validation::{validate_all, ValidationError, ValidationResult, Validator};
pub use vertex::{NormalizedGraph, NormalizedVertex, VertexKind};
