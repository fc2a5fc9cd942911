//! Normalized vertex model
//!
//! Output of normalization: one [`NormalizedVertex`] per raw entity, addressed
//! only by stable ids, plus the ordered root set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::model::{HeadingLevel, MediaType, StableId};

/// Closed classification of a vertex, with the fields that only exist for that kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "vertex-type")]
pub enum VertexKind {
    /// Titled page
    #[serde(rename = "roam/page")]
    Page,

    /// Plain body block
    #[serde(rename = "roam/block-content")]
    BlockContent,

    /// Heading block
    #[serde(rename = "roam/block-heading")]
    BlockHeading {
        #[serde(rename = "heading")]
        level: HeadingLevel,
    },

    /// Block whose text links to a managed file
    #[serde(rename = "roam/file")]
    FileReference {
        #[serde(rename = "source")]
        source_url: String,
        #[serde(rename = "file-name")]
        file_name: String,
        /// Filled in by whoever downloads the asset
        #[serde(rename = "media-type", default, skip_serializing_if = "Option::is_none")]
        media_type: Option<MediaType>,
    },
}

impl VertexKind {
    /// Serialized `vertex-type` tag
    pub fn tag(&self) -> &'static str {
        match self {
            VertexKind::Page => C::VERTEX_TYPE_PAGE,
            VertexKind::BlockContent => C::VERTEX_TYPE_BLOCK_CONTENT,
            VertexKind::BlockHeading { .. } => C::VERTEX_TYPE_BLOCK_HEADING,
            VertexKind::FileReference { .. } => C::VERTEX_TYPE_FILE,
        }
    }

    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            VertexKind::BlockHeading { level } => Some(*level),
            _ => None,
        }
    }
}

/// Identifier-resolved, classified graph element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedVertex {
    #[serde(rename = "uid")]
    pub stable_id: StableId,

    #[serde(flatten)]
    pub kind: VertexKind,

    /// Page title or block text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child stable ids ordered by sibling order
    #[serde(default)]
    pub children: Vec<StableId>,

    #[serde(default)]
    pub refs: Vec<StableId>,
}

impl NormalizedVertex {
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        self.kind.heading_level()
    }

    pub fn is_file_reference(&self) -> bool {
        matches!(self.kind, VertexKind::FileReference { .. })
    }

    /// Copy of this vertex carrying the media type reported by an asset fetch
    ///
    /// Returns `None` for vertices that are not file references.
    pub fn with_media_type(&self, media_type: MediaType) -> Option<Self> {
        match &self.kind {
            VertexKind::FileReference {
                source_url,
                file_name,
                ..
            } => Some(Self {
                kind: VertexKind::FileReference {
                    source_url: source_url.clone(),
                    file_name: file_name.clone(),
                    media_type: Some(media_type),
                },
                ..self.clone()
            }),
            _ => None,
        }
    }
}

/// Normalized network: vertices in input order plus the ordered root set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedGraph {
    pub vertices: Vec<NormalizedVertex>,
    pub roots: Vec<StableId>,
}

impl NormalizedGraph {
    /// Look up a vertex by stable id
    pub fn get(&self, stable_id: &str) -> Option<&NormalizedVertex> {
        self.vertices.iter().find(|v| v.stable_id.as_str() == stable_id)
    }

    /// Map from stable id to vertex, for repeated lookups
    pub fn by_stable_id(&self) -> HashMap<&str, &NormalizedVertex> {
        self.vertices
            .iter()
            .map(|v| (v.stable_id.as_str(), v))
            .collect()
    }

    pub fn roots(&self) -> impl Iterator<Item = &NormalizedVertex> {
        let index = self.by_stable_id();
        self.roots
            .iter()
            .filter_map(move |id| index.get(id.as_str()).copied())
    }

    /// Vertices that point at managed files, in input order
    pub fn file_references(&self) -> impl Iterator<Item = &NormalizedVertex> {
        self.vertices.iter().filter(|v| v.is_file_reference())
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
