//! Archive
//!
//! A named grouping of cards for navigation. Archives never nest: a marker
//! line toggles the current archive until the next marker or end of file.
//! The resolver appends synthesized annotation cards to the archive of their
//! host card, after all authored cards.

use super::card::Card;
use crate::cram::ast::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    /// None for the default archive holding cards outside any marker.
    pub name: Option<String>,
    /// Prose from comment lines directly after the marker, joined with
    /// single spaces. Empty when the marker has no trailing comments.
    pub description: String,
    pub cards: Vec<Card>,
    pub location: Range,
}

impl Archive {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            description: String::new(),
            cards: Vec::new(),
            location: Range::default(),
        }
    }

    pub fn default_archive() -> Self {
        Self {
            name: None,
            description: String::new(),
            cards: Vec::new(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// The name shown in navigation; the default archive renders as "Cards".
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Cards")
    }
}

impl fmt::Display for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Archive('{}', {} cards)",
            self.display_name(),
            self.cards.len()
        )
    }
}
