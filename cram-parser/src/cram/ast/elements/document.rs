//! Document
//!
//! The root node for one input file: an ordered list of archives. Cards that
//! appear before any archive marker land in an unnamed default archive, which
//! occupies its encounter position like any other archive.

use super::archive::Archive;
use super::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier for the source this tree was parsed from (usually a path).
    pub file_id: String,
    pub archives: Vec<Archive>,
}

impl Document {
    pub fn new(file_id: &str) -> Self {
        Self {
            file_id: file_id.to_string(),
            archives: Vec::new(),
        }
    }

    /// Iterate every card in document order.
    pub fn iter_cards(&self) -> impl Iterator<Item = &Card> {
        self.archives.iter().flat_map(|archive| archive.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.archives.iter().map(|a| a.cards.len()).sum()
    }

    /// Find a card by topic id (case-sensitive).
    pub fn find_card(&self, topic_id: &str) -> Option<&Card> {
        self.iter_cards().find(|card| card.topic_id == topic_id)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document('{}', {} archives, {} cards)",
            self.file_id,
            self.archives.len(),
            self.card_count()
        )
    }
}
