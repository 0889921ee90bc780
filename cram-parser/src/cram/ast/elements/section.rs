//! Section
//!
//! A named region inside a card, opened by `---Name` and running until the
//! next section header or the card close. The body is a flat, ordered run of
//! inline elements.

use super::inline::InlineElement;
use crate::cram::ast::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub body: Vec<InlineElement>,
    pub location: Range,
}

impl Section {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            body: Vec::new(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// Iterate the annotations in this section's body.
    pub fn annotations(&self) -> impl Iterator<Item = &InlineElement> {
        self.body
            .iter()
            .filter(|el| matches!(el, InlineElement::Annotation { .. }))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Section('{}', {} items)", self.name, self.body.len())
    }
}
