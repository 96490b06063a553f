use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Immutable catalog entry. Owned by the catalog, referenced by views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardRecord {
    pub id: u32,
    pub name: String,
    pub cost: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub stats: String,
    #[serde(default)]
    pub art: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Face {
    Down,
    Up,
}

pub const CARD_TAG_PREFIX: &str = "card_id_";

/// Persisted textual id for a card, `card_id_<N>`.
pub fn card_tag(id: u32) -> String {
    format!("{CARD_TAG_PREFIX}{id}")
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("card tag {0:?} has no numeric suffix")]
    MissingSuffix(String),
    #[error("card tag {0:?} suffix is not a positive integer")]
    BadSuffix(String),
}

/// Parse a persisted card tag back to its numeric id. The id is the
/// substring after the final underscore and must be a positive integer.
pub fn parse_card_tag(tag: &str) -> Result<u32, TagError> {
    let Some((_, suffix)) = tag.rsplit_once('_') else {
        return Err(TagError::MissingSuffix(tag.to_string()));
    };
    match suffix.parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(TagError::BadSuffix(tag.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrip() {
        assert_eq!(card_tag(42), "card_id_42");
        assert_eq!(parse_card_tag("card_id_42"), Ok(42));
    }

    #[test]
    fn rejects_malformed_tags() {
        assert!(matches!(parse_card_tag(""), Err(TagError::MissingSuffix(_))));
        assert!(matches!(
            parse_card_tag("card_id_"),
            Err(TagError::BadSuffix(_))
        ));
        assert!(matches!(
            parse_card_tag("card_id_x"),
            Err(TagError::BadSuffix(_))
        ));
        assert!(matches!(
            parse_card_tag("card_id_0"),
            Err(TagError::BadSuffix(_))
        ));
    }

    #[test]
    fn suffix_after_final_underscore_wins() {
        assert_eq!(parse_card_tag("my_custom_prefix_7"), Ok(7));
    }
}
