//! Graph normalization
//!
//! Turns a [`Network`] into a [`NormalizedGraph`] in four passes:
//! 1. index: internal id → (stable id, sibling order)
//! 2. resolution: children/refs stubs → stable ids; misses are dropped,
//!    children are stably sorted by sibling order
//! 3. classification: kind and unified text per entity
//! 4. roots: entities with no ancestor in the network, stably sorted by order
//!
//! Normalization is pure: same network in, same graph out. Duplicate stable
//! ids are caught once by pre-validation, never inside the resolution loop.

use std::collections::HashMap;

use crate::classify::Classifier;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::model::{InternalId, RawEntity, ReferenceStub, StableId};
use crate::network::Network;
use crate::vertex::{NormalizedGraph, NormalizedVertex};

/// Index entry for one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry<'a> {
    pub stable_id: &'a StableId,
    /// Sibling order, `0` when absent
    pub order: u32,
}

/// Arena-style lookup from internal ids into one network
///
/// Built once per normalization and discarded afterwards; stubs resolve by
/// lookup, never by pointer.
#[derive(Debug, Clone, Default)]
pub struct IdIndex<'a> {
    entries: HashMap<InternalId, IndexEntry<'a>>,
}

impl<'a> IdIndex<'a> {
    /// Index every entity that carries an internal id
    ///
    /// A repeated internal id means the network is corrupt.
    pub fn build(entities: &'a [RawEntity]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(entities.len());
        for entity in entities {
            let Some(id) = entity.internal_id else {
                continue;
            };
            let entry = IndexEntry {
                stable_id: &entity.stable_id,
                order: entity.order(),
            };
            if let Some(existing) = entries.insert(id, entry) {
                return Err(Error::CorruptIndex(format!(
                    "internal id {} used by both {} and {}",
                    id, existing.stable_id, entity.stable_id
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, id: InternalId) -> Option<&IndexEntry<'a>> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve reference stubs in stub order, dropping the ones outside the network
    pub fn resolve_refs(&self, stubs: &[ReferenceStub]) -> Vec<StableId> {
        stubs
            .iter()
            .filter_map(|stub| self.get(stub.id))
            .map(|entry| entry.stable_id.clone())
            .collect()
    }

    /// Resolve child stubs sorted by sibling order; equal orders keep stub order
    pub fn resolve_children(&self, stubs: &[ReferenceStub]) -> Vec<StableId> {
        let mut resolved: Vec<&IndexEntry<'a>> = stubs.iter().filter_map(|stub| self.get(stub.id)).collect();
        resolved.sort_by_key(|entry| entry.order);
        resolved.into_iter().map(|entry| entry.stable_id.clone()).collect()
    }
}

/// Validates, resolves and classifies networks under one set of settings
#[derive(Debug, Clone)]
pub struct Normalizer {
    settings: Settings,
    classifier: Classifier,
}

impl Normalizer {
    pub fn new(settings: Settings) -> Self {
        let classifier = Classifier::new(&settings);
        Self { settings, classifier }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Pre-validate `network`, then normalize it
    ///
    /// Every validation failure is reported together in
    /// [`Error::Validation`]; normalization does not run in that case.
    pub fn normalize(&self, network: &Network) -> Result<NormalizedGraph> {
        network.validate(&self.settings).into_result()?;
        self.normalize_validated(network)
    }

    /// Normalize a network the caller has already validated
    pub fn normalize_validated(&self, network: &Network) -> Result<NormalizedGraph> {
        let entities = network.entities();
        let index = IdIndex::build(entities)?;
        tracing::debug!(entities = entities.len(), indexed = index.len(), "built id index");

        let mut dropped = 0usize;
        let mut vertices = Vec::with_capacity(entities.len());
        for entity in entities {
            let children = index.resolve_children(&entity.children);
            let refs = index.resolve_refs(&entity.refs);
            dropped += (entity.children.len() - children.len()) + (entity.refs.len() - refs.len());

            let classified = self.classifier.classify(entity)?;
            vertices.push(NormalizedVertex {
                stable_id: entity.stable_id.clone(),
                kind: classified.kind,
                text: Some(classified.text),
                children,
                refs,
            });
        }

        if dropped > 0 {
            tracing::debug!(dropped, "dropped stubs that point outside the network");
        }

        let mut roots: Vec<&RawEntity> = entities.iter().filter(|e| network.is_root(e)).collect();
        roots.sort_by_key(|e| e.order());
        let roots = roots.into_iter().map(|e| e.stable_id.clone()).collect();

        Ok(NormalizedGraph { vertices, roots })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// Pre-validate and normalize `network` under `settings`
pub fn normalize(network: &Network, settings: &Settings) -> Result<NormalizedGraph> {
    Normalizer::new(settings.clone()).normalize(network)
}
