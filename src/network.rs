//! Network snapshots
//!
//! A [`Network`] is the flat, read-only collection of raw entities produced by
//! one fetch. Internal ids are only meaningful inside it; two networks must
//! never be merged.

use std::collections::HashSet;
use std::ops::Deref;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::checks;
use crate::config::Settings;
use crate::constants as C;
use crate::error::{Error, Result};
use crate::model::{InternalId, RawEntity};
use crate::validation::ValidationResult;

/// Immutable collection of entities sharing one internal-id namespace
#[derive(Debug, Clone, Default)]
pub struct Network {
    entities: Vec<RawEntity>,
    ids: HashSet<InternalId>,
}

impl Network {
    pub fn new(entities: Vec<RawEntity>) -> Self {
        let ids = entities.iter().filter_map(|e| e.internal_id).collect();
        Self { entities, ids }
    }

    /// Parse a JSON network
    ///
    /// Accepts a plain array of entities, or the `[[entity], ...]` rows a
    /// `(pull ?e [*])` query returns (the first cell of each row is used).
    pub fn from_json_str(content: &str) -> Result<Self> {
        let values: Vec<serde_json::Value> = serde_json::from_str(content)?;
        let rows = values.first().is_some_and(serde_json::Value::is_array);

        let mut entities = Vec::with_capacity(values.len());
        for value in values {
            let value = if rows { first_cell_json(value)? } else { value };
            entities.push(serde_json::from_value(value)?);
        }
        Ok(Self::new(entities))
    }

    /// Parse a YAML network; same shapes as [`Network::from_json_str`]
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let values: Vec<serde_yaml::Value> = serde_yaml::from_str(content)?;
        let rows = values.first().is_some_and(serde_yaml::Value::is_sequence);

        let mut entities = Vec::with_capacity(values.len());
        for value in values {
            let value = if rows { first_cell_yaml(value)? } else { value };
            entities.push(serde_yaml::from_value(value)?);
        }
        Ok(Self::new(entities))
    }

    /// Load a network file, choosing the parser from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = std::fs::read_to_string(path)?;
        let network = if extension == C::JSON_EXTENSION {
            Self::from_json_str(&content)?
        } else if C::YAML_EXTENSIONS.contains(&extension.as_str()) {
            Self::from_yaml_str(&content)?
        } else {
            return Err(Error::UnsupportedFormat(format!(
                "{} (expected .json, .yaml or .yml)",
                path.display()
            )));
        };

        tracing::debug!(path = %path.display(), entities = network.len(), "loaded network");
        Ok(network)
    }

    pub fn entities(&self) -> &[RawEntity] {
        &self.entities
    }

    /// Whether an entity with this internal id was fetched
    pub fn contains(&self, id: InternalId) -> bool {
        self.ids.contains(&id)
    }

    /// Run the pre-normalization checks
    pub fn validate(&self, settings: &Settings) -> ValidationResult {
        checks::validate_network(&self.entities, settings)
    }

    /// Whether `entity` has no ancestor inside this network
    pub fn is_root(&self, entity: &RawEntity) -> bool {
        !entity.ancestor_refs.iter().any(|stub| self.contains(stub.id))
    }

    /// Most recent edit across all entities
    pub fn latest_edit(&self) -> Option<DateTime<Utc>> {
        self.entities.iter().filter_map(RawEntity::edited_at).max()
    }
}

impl Deref for Network {
    type Target = [RawEntity];
    fn deref(&self) -> &Self::Target {
        &self.entities
    }
}

impl From<Vec<RawEntity>> for Network {
    fn from(entities: Vec<RawEntity>) -> Self {
        Self::new(entities)
    }
}

impl FromIterator<RawEntity> for Network {
    fn from_iter<I: IntoIterator<Item = RawEntity>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Root rule, relative to whatever was fetched
///
/// An entity is a root iff none of its ancestor stubs resolves inside
/// `network`; no ancestors at all also makes it a root.
pub fn is_root(entity: &RawEntity, network: &Network) -> bool {
    network.is_root(entity)
}

fn first_cell_json(row: serde_json::Value) -> Result<serde_json::Value> {
    match row {
        serde_json::Value::Array(cells) => cells
            .into_iter()
            .next()
            .ok_or_else(|| Error::MalformedEntity("empty result row".to_string())),
        other => Err(Error::MalformedEntity(format!("expected a result row, got {}", other))),
    }
}

fn first_cell_yaml(row: serde_yaml::Value) -> Result<serde_yaml::Value> {
    match row {
        serde_yaml::Value::Sequence(cells) => cells
            .into_iter()
            .next()
            .ok_or_else(|| Error::MalformedEntity("empty result row".to_string())),
        _ => Err(Error::MalformedEntity("expected a result row".to_string())),
    }
}
