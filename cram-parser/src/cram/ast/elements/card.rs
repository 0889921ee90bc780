//! Card
//!
//! The primary authored unit, delimited by `<+topic` and `/+>`. The topic
//! text doubles as the card's cross-reference key and must be unique across
//! the whole compilation run, synthesized cards included.
//!
//! Cards come into existence two ways:
//!     - authored directly in source, or
//!     - synthesized by the resolver from an inline annotation, carrying a
//!       back-reference tag to the card that hosted the annotation.

use super::section::Section;
use super::tag::Tag;
use crate::cram::ast::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a card came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardOrigin {
    Authored,
    /// Synthesized from an annotation; carries the host card's topic id.
    Synthesized { host: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique, case-sensitive cross-reference key.
    pub topic_id: String,
    pub tags: Vec<Tag>,
    pub sections: Vec<Section>,
    pub origin: CardOrigin,
    pub location: Range,
}

impl Card {
    pub fn new(topic_id: &str) -> Self {
        Self {
            topic_id: topic_id.to_string(),
            tags: Vec::new(),
            sections: Vec::new(),
            origin: CardOrigin::Authored,
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self.origin, CardOrigin::Synthesized { .. })
    }

    /// Find a header tag by its symbol character.
    pub fn find_tag(&self, symbol: char) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.symbol == symbol)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Card('{}', {} tags, {} sections{})",
            self.topic_id,
            self.tags.len(),
            self.sections.len(),
            if self.is_synthesized() {
                ", synthesized"
            } else {
                ""
            }
        )
    }
}
