//! Raw entity model
//!
//! The un-normalized shape of pages and blocks exactly as a graph pull returns
//! them. Field names on the wire follow the Roam attribute names (`uid`, `id`,
//! `string`, `parents`, ...); the Rust names describe what the fields mean.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::error::{Error, Result};

static STABLE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").unwrap());

static MEDIA_TYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w-]+/[\w-]+$").unwrap());

/// Process-local numeric entity id (`:db/id`).
///
/// Unique only inside the network it was fetched with; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternalId(pub u64);

impl fmt::Display for InternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Externally stable identifier (`:block/uid`).
///
/// The only identifier allowed in normalized output. Construction rejects
/// empty tokens and anything outside `[A-Za-z0-9-]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StableId(String);

impl StableId {
    /// Validate and wrap a stable id token
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::MalformedEntity("stable id is empty".to_string()));
        }
        if !STABLE_ID_RE.is_match(&value) {
            return Err(Error::MalformedEntity(format!(
                "stable id {:?} contains characters outside [A-Za-z0-9-]",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StableId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StableId> for String {
    fn from(id: StableId) -> Self {
        id.0
    }
}

impl AsRef<str> for StableId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StableId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weak pointer to another entity in the same network: just its internal id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceStub {
    pub id: InternalId,
}

impl ReferenceStub {
    pub fn new(id: u64) -> Self {
        Self { id: InternalId(id) }
    }
}

/// Markdown heading level, always within 1-6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Returns `None` when `level` is outside 1-6
    pub fn new(level: u8) -> Option<Self> {
        (C::MIN_HEADING_LEVEL..=C::MAX_HEADING_LEVEL)
            .contains(&level)
            .then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> std::result::Result<Self, String> {
        Self::new(level).ok_or_else(|| format!("heading level {} is outside 1-6", level))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

/// IANA media type such as `image/jpeg`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaType(String);

impl MediaType {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if MEDIA_TYPE_RE.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(Error::MalformedEntity(format!("invalid media type {:?}", value)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MediaType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MediaType> for String {
    fn from(media_type: MediaType) -> Self {
        media_type.0
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page or block record as pulled from the graph.
///
/// Only `stable_id` is mandatory; which other fields are present depends on
/// whether the entity is a page or a block. Values are read-only snapshots:
/// the `with_*` helpers consume and return a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    /// `:db/id`, ephemeral
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<InternalId>,

    /// `:block/uid`
    #[serde(rename = "uid")]
    pub stable_id: StableId,

    /// `:edit/time`, Unix milliseconds
    #[serde(rename = "time", default, skip_serializing_if = "Option::is_none")]
    pub last_edit_time: Option<i64>,

    /// `:edit/user`
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub editing_user_ref: Option<ReferenceStub>,

    /// `:block/string`, blocks only
    #[serde(rename = "string", default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,

    /// `:node/title`, pages only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// `:block/order`, child blocks only
    #[serde(rename = "order", default, skip_serializing_if = "Option::is_none")]
    pub sibling_order: Option<u32>,

    /// `:block/heading`; kept raw so out-of-range values reach validation
    #[serde(rename = "heading", default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReferenceStub>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<ReferenceStub>,

    /// `:block/page`
    #[serde(rename = "page", default, skip_serializing_if = "Option::is_none")]
    pub container_page_ref: Option<ReferenceStub>,

    /// `:block/parents`, every transitive ancestor
    #[serde(rename = "parents", default, skip_serializing_if = "Vec::is_empty")]
    pub ancestor_refs: Vec<ReferenceStub>,

    /// `:block/open`
    #[serde(rename = "open", default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
}

impl RawEntity {
    /// Bare entity carrying only its identifiers
    pub fn new(internal_id: u64, stable_id: StableId) -> Self {
        Self {
            internal_id: Some(InternalId(internal_id)),
            stable_id,
            last_edit_time: None,
            editing_user_ref: None,
            body_text: None,
            title: None,
            sibling_order: None,
            heading_level: None,
            children: Vec::new(),
            refs: Vec::new(),
            container_page_ref: None,
            ancestor_refs: Vec::new(),
            is_expanded: None,
        }
    }

    /// Page entity with a title
    pub fn page(internal_id: u64, stable_id: StableId, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::new(internal_id, stable_id)
        }
    }

    /// Block entity with body text at the given sibling position
    pub fn block(internal_id: u64, stable_id: StableId, body: impl Into<String>, order: u32) -> Self {
        Self {
            body_text: Some(body.into()),
            sibling_order: Some(order),
            ..Self::new(internal_id, stable_id)
        }
    }

    pub fn with_children(self, ids: &[u64]) -> Self {
        Self {
            children: ids.iter().copied().map(ReferenceStub::new).collect(),
            ..self
        }
    }

    pub fn with_refs(self, ids: &[u64]) -> Self {
        Self {
            refs: ids.iter().copied().map(ReferenceStub::new).collect(),
            ..self
        }
    }

    pub fn with_ancestors(self, ids: &[u64]) -> Self {
        Self {
            ancestor_refs: ids.iter().copied().map(ReferenceStub::new).collect(),
            ..self
        }
    }

    pub fn with_page(self, id: u64) -> Self {
        Self {
            container_page_ref: Some(ReferenceStub::new(id)),
            ..self
        }
    }

    pub fn with_heading(self, level: u8) -> Self {
        Self {
            heading_level: Some(level),
            ..self
        }
    }

    pub fn with_edit_time(self, millis: i64) -> Self {
        Self {
            last_edit_time: Some(millis),
            ..self
        }
    }

    /// Sibling position, `0` when absent (pages and unordered blocks)
    pub fn order(&self) -> u32 {
        self.sibling_order.unwrap_or(0)
    }

    /// Last edit time as a UTC timestamp
    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        self.last_edit_time.and_then(DateTime::from_timestamp_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> StableId {
        StableId::new(s).unwrap()
    }

    #[test]
    fn test_stable_id_rejects_empty() {
        assert!(StableId::new("").is_err());
    }

    #[test]
    fn test_stable_id_rejects_bad_charset() {
        assert!(StableId::new("abc def").is_err());
        assert!(StableId::new("abc_def").is_err());
        assert!(StableId::new("3BX-iWc-p").is_ok());
    }

    #[test]
    fn test_deserialize_block_wire_names() {
        let json = r#"{
            "uid": "yFUau9Cpg", "id": 4025, "time": 1771515468425,
            "user": {"id": 3}, "string": "Section 2.1.1", "order": 1,
            "children": [{"id": 4028}], "page": {"id": 3327}, "open": false,
            "parents": [{"id": 3327}, {"id": 3329}], "sidebar": 4
        }"#;
        let entity: RawEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.stable_id.as_str(), "yFUau9Cpg");
        assert_eq!(entity.internal_id, Some(InternalId(4025)));
        assert_eq!(entity.body_text.as_deref(), Some("Section 2.1.1"));
        assert_eq!(entity.sibling_order, Some(1));
        assert_eq!(entity.children, vec![ReferenceStub::new(4028)]);
        assert_eq!(entity.container_page_ref, Some(ReferenceStub::new(3327)));
        assert_eq!(entity.ancestor_refs.len(), 2);
        assert_eq!(entity.is_expanded, Some(false));
        assert!(entity.title.is_none());
    }

    #[test]
    fn test_deserialize_missing_uid_is_rejected() {
        let json = r#"{"id": 1, "title": "No uid"}"#;
        assert!(serde_json::from_str::<RawEntity>(json).is_err());
    }

    #[test]
    fn test_deserialize_empty_uid_is_rejected() {
        let json = r#"{"id": 1, "uid": "", "title": "Empty uid"}"#;
        assert!(serde_json::from_str::<RawEntity>(json).is_err());
    }

    #[test]
    fn test_order_defaults_to_zero() {
        let page = RawEntity::page(1, uid("pageAAAAAA"), "Test");
        assert_eq!(page.order(), 0);
        let block = RawEntity::block(2, uid("blockBBBBB"), "hello", 3);
        assert_eq!(block.order(), 3);
    }

    #[test]
    fn test_edited_at() {
        let entity = RawEntity::page(1, uid("pageAAAAAA"), "Test").with_edit_time(1_770_568_893_569);
        let at = entity.edited_at().unwrap();
        assert_eq!(at.timestamp_millis(), 1_770_568_893_569);
        assert_eq!(at.format("%Y-%m-%d").to_string(), "2026-02-08");
    }

    #[test]
    fn test_heading_level_range() {
        assert!(HeadingLevel::new(0).is_none());
        assert_eq!(HeadingLevel::new(1).map(HeadingLevel::get), Some(1));
        assert_eq!(HeadingLevel::new(6).map(HeadingLevel::get), Some(6));
        assert!(HeadingLevel::new(7).is_none());
    }

    #[test]
    fn test_media_type() {
        assert!(MediaType::new("image/jpeg").is_ok());
        assert!(MediaType::new("application/vnd-custom").is_ok());
        assert!(MediaType::new("jpeg").is_err());
        assert!(MediaType::new("image/").is_err());
    }
}
