//! Entity classification
//!
//! Assigns every raw entity exactly one [`VertexKind`]. First match wins:
//! 1. `title` set and no body text → page
//! 2. body text holds exactly one managed-file image or link → file reference
//! 3. heading level set → heading block
//! 4. otherwise → content block
//!
//! Classification looks only at the entity itself, never at the rest of the
//! network.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::markdown;
use crate::model::{HeadingLevel, RawEntity};
use crate::vertex::VertexKind;

/// Kind plus the unified text field of one classified entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: VertexKind,
    /// Page title or block body
    pub text: String,
}

/// Classification rules; read-only once built and safe to share
#[derive(Debug, Clone)]
pub struct Classifier {
    asset_host: String,
    strict_headings: bool,
}

impl Classifier {
    pub fn new(settings: &Settings) -> Self {
        Self {
            asset_host: settings.asset_host.clone(),
            strict_headings: settings.strict_headings,
        }
    }

    /// Classify one entity
    ///
    /// Fails when the entity carries both `title` and body text, or neither,
    /// and (with strict headings) when the heading level is outside 1-6.
    pub fn classify(&self, entity: &RawEntity) -> Result<Classified> {
        let body = match (&entity.title, &entity.body_text) {
            (Some(title), None) => {
                return Ok(Classified {
                    kind: VertexKind::Page,
                    text: title.clone(),
                });
            }
            (None, Some(body)) => body,
            (Some(_), Some(_)) => {
                return Err(Error::AmbiguousEntity {
                    stable_id: entity.stable_id.clone(),
                    reason: "has both a title and body text".to_string(),
                });
            }
            (None, None) => {
                return Err(Error::AmbiguousEntity {
                    stable_id: entity.stable_id.clone(),
                    reason: "has neither a title nor body text".to_string(),
                });
            }
        };

        let mut links = markdown::find_managed_file_links(body, &self.asset_host);
        match links.len() {
            0 => {}
            1 => {
                let link = links.remove(0);
                return Ok(Classified {
                    kind: VertexKind::FileReference {
                        source_url: link.url,
                        file_name: link.file_name,
                        media_type: None,
                    },
                    text: body.clone(),
                });
            }
            // TODO: decide whether multi-file blocks should yield one vertex per file
            count => {
                tracing::warn!(
                    stable_id = %entity.stable_id,
                    count,
                    "block links several managed files; not treated as a file reference"
                );
            }
        }

        let kind = match entity.heading_level {
            None => VertexKind::BlockContent,
            Some(raw) => match HeadingLevel::new(raw) {
                Some(level) => VertexKind::BlockHeading { level },
                None if self.strict_headings => {
                    return Err(Error::HeadingOutOfRange {
                        stable_id: entity.stable_id.clone(),
                        level: raw,
                    });
                }
                None => {
                    tracing::debug!(stable_id = %entity.stable_id, level = raw, "ignoring out-of-range heading");
                    VertexKind::BlockContent
                }
            },
        };

        Ok(Classified {
            kind,
            text: body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StableId;

    const FLOWER_URL: &str = "https://firebasestorage.googleapis.com/v0/b/firescript-577a2.appspot.com/o/imgs%2Fapp%2FSCFH%2F-9owRBegJ8.jpeg.enc?alt=media&token=9b673aae";

    fn uid(s: &str) -> StableId {
        StableId::new(s).unwrap()
    }

    fn classifier() -> Classifier {
        Classifier::new(&Settings::default())
    }

    #[test]
    fn test_page() {
        let entity = RawEntity::page(1, uid("pageAAAAAA"), "Test");
        let classified = classifier().classify(&entity).unwrap();
        assert_eq!(classified.kind, VertexKind::Page);
        assert_eq!(classified.text, "Test");
    }

    #[test]
    fn test_content_block() {
        let entity = RawEntity::block(2, uid("blockBBBBB"), "hello", 0);
        let classified = classifier().classify(&entity).unwrap();
        assert_eq!(classified.kind, VertexKind::BlockContent);
        assert_eq!(classified.text, "hello");
    }

    #[test]
    fn test_heading_block() {
        let entity = RawEntity::block(3, uid("headCCCCC"), "Section 1", 0).with_heading(2);
        let classified = classifier().classify(&entity).unwrap();
        assert_eq!(classified.kind.heading_level().map(HeadingLevel::get), Some(2));
        assert_eq!(classified.text, "Section 1");
    }

    #[test]
    fn test_file_reference() {
        let body = format!("![A flower]({})", FLOWER_URL);
        let entity = RawEntity::block(4, uid("mPCzedeKx"), body.clone(), 0);
        let classified = classifier().classify(&entity).unwrap();
        match classified.kind {
            VertexKind::FileReference {
                source_url,
                file_name,
                media_type,
            } => {
                assert_eq!(source_url, FLOWER_URL);
                assert_eq!(file_name, "-9owRBegJ8.jpeg.enc");
                assert!(media_type.is_none());
            }
            other => panic!("unexpected kind: {:?}", other),
        }
        assert_eq!(classified.text, body);
    }

    #[test]
    fn test_file_link_beats_heading() {
        let entity = RawEntity::block(4, uid("mPCzedeKx"), format!("![]({})", FLOWER_URL), 0).with_heading(1);
        let classified = classifier().classify(&entity).unwrap();
        assert!(matches!(classified.kind, VertexKind::FileReference { .. }));
    }

    #[test]
    fn test_multiple_file_links_fall_through() {
        let body = format!("![a]({}) ![b]({})", FLOWER_URL, FLOWER_URL);
        let entity = RawEntity::block(5, uid("twoFILES1"), body, 0).with_heading(3);
        let classified = classifier().classify(&entity).unwrap();
        assert_eq!(classified.kind.heading_level().map(HeadingLevel::get), Some(3));
    }

    #[test]
    fn test_plain_file_link_is_file_reference() {
        let body = "[report.pdf](https://firebasestorage.googleapis.com/v0/b/x/o/imgs%2Fapp%2Freport.pdf?alt=media)";
        let entity = RawEntity::block(1, uid("fileAAAAA"), body, 0);
        let classified = classifier().classify(&entity).unwrap();
        assert!(matches!(classified.kind, VertexKind::FileReference { ref file_name, .. } if file_name == "report.pdf"));
    }

    #[test]
    fn test_image_plus_file_link_falls_through() {
        let body = format!(
            "![a]({}) and [report](https://firebasestorage.googleapis.com/o/imgs%2Freport.pdf)",
            FLOWER_URL
        );
        let entity = RawEntity::block(2, uid("mixedAAAA"), body, 0);
        let classified = classifier().classify(&entity).unwrap();
        assert_eq!(classified.kind, VertexKind::BlockContent);
    }

    #[test]
    fn test_indented_file_image() {
        let entity = RawEntity::block(3, uid("indentAAA"), format!("    ![]({})", FLOWER_URL), 0);
        let classified = classifier().classify(&entity).unwrap();
        assert!(matches!(classified.kind, VertexKind::FileReference { ref source_url, .. } if source_url == FLOWER_URL));
    }

    #[test]
    fn test_foreign_image_is_content() {
        let entity = RawEntity::block(6, uid("imgDDDDDD"), "![cat](https://example.com/cat.png)", 0);
        let classified = classifier().classify(&entity).unwrap();
        assert_eq!(classified.kind, VertexKind::BlockContent);
    }

    #[test]
    fn test_title_and_body_is_ambiguous() {
        let mut entity = RawEntity::page(7, uid("bothEEEEE"), "Title");
        entity.body_text = Some("body".to_string());
        let err = classifier().classify(&entity).unwrap_err();
        assert!(matches!(err, Error::AmbiguousEntity { .. }));
    }

    #[test]
    fn test_neither_title_nor_body_is_ambiguous() {
        let entity = RawEntity::new(8, uid("noneFFFFF"));
        let err = classifier().classify(&entity).unwrap_err();
        assert!(err.to_string().contains("noneFFFFF"));
    }

    #[test]
    fn test_out_of_range_heading_strict() {
        let entity = RawEntity::block(9, uid("headGGGGG"), "Too deep", 0).with_heading(7);
        let err = classifier().classify(&entity).unwrap_err();
        assert!(matches!(err, Error::HeadingOutOfRange { level: 7, .. }));
    }

    #[test]
    fn test_out_of_range_heading_lenient() {
        let lenient = Classifier::new(&Settings::default().with_strict_headings(false));
        let entity = RawEntity::block(9, uid("headGGGGG"), "Too deep", 0).with_heading(0);
        let classified = lenient.classify(&entity).unwrap();
        assert_eq!(classified.kind, VertexKind::BlockContent);
    }

    #[test]
    fn test_custom_asset_host() {
        let custom = Classifier::new(&Settings::default().with_asset_host("assets.example.org"));
        let entity = RawEntity::block(10, uid("fileHHHHH"), "![](https://assets.example.org/doc.pdf)", 0);
        let classified = custom.classify(&entity).unwrap();
        assert!(matches!(classified.kind, VertexKind::FileReference { ref file_name, .. } if file_name == "doc.pdf"));

        // default host no longer matches under the custom classifier
        let entity = RawEntity::block(11, uid("fileIIIII"), format!("![]({})", FLOWER_URL), 0);
        assert_eq!(custom.classify(&entity).unwrap().kind, VertexKind::BlockContent);
    }
}
