use crate::{CardRecord, TagError};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("card catalog is empty")]
    EmptyCatalog,
    #[error("duplicate card id {0}")]
    DuplicateCard(u32),
    #[error("card id must be positive")]
    NonPositiveCard,
    #[error("unknown card id {0}")]
    UnknownCard(u32),
    #[error(transparent)]
    BadTag(#[from] TagError),
}

/// Static id -> record lookup, built once and queried many times.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_id: HashMap<u32, CardRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<CardRecord>) -> Result<Self, SetupError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            if record.id == 0 {
                return Err(SetupError::NonPositiveCard);
            }
            let id = record.id;
            if by_id.insert(id, record).is_some() {
                return Err(SetupError::DuplicateCard(id));
            }
        }
        Ok(Self { by_id })
    }

    pub fn get(&self, id: u32) -> Result<&CardRecord, SetupError> {
        self.by_id.get(&id).ok_or(SetupError::UnknownCard(id))
    }

    /// Resolve a persisted `card_id_<N>` tag to its record.
    pub fn by_tag(&self, tag: &str) -> Result<&CardRecord, SetupError> {
        let id = crate::parse_card_tag(tag)?;
        self.get(id)
    }

    /// All ids, sorted for deterministic iteration.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.by_id.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.by_id.values()
    }
}
