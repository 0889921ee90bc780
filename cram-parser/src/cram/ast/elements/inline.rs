//! Inline content
//!
//! The tagged union over everything that can appear inside a section body.
//!
//! Annotations have a dual identity: the inline span rendered in place, and a
//! card of their own synthesized during resolution so the span becomes a
//! navigable unit. Both identities live in the one variant: `card_id` is None
//! straight out of the parser and is populated by the resolver with the
//! synthesized card's topic id. Keeping a single object prevents the inline
//! rendering and the synthesized card from drifting apart.

use crate::cram::ast::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InlineElement {
    /// A plain run of text.
    TextRun { text: String },
    /// A text run with a trailing `>> explanation` attached to it.
    InlineExplanation { text: String, explanation: String },
    /// A `` `surface`[body] `` span, also a synthesized card after resolution.
    Annotation {
        surface: String,
        body: String,
        /// Topic id of the synthesized card; None until resolution.
        card_id: Option<String>,
        location: Range,
    },
    /// A fenced code block, captured verbatim.
    CodeBlock { language: String, lines: Vec<String> },
}

impl InlineElement {
    pub fn text(text: &str) -> Self {
        InlineElement::TextRun {
            text: text.to_string(),
        }
    }

    pub fn annotation(surface: &str, body: &str, location: Range) -> Self {
        InlineElement::Annotation {
            surface: surface.to_string(),
            body: body.to_string(),
            card_id: None,
            location,
        }
    }
}

impl fmt::Display for InlineElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineElement::TextRun { text } => write!(f, "Text({:?})", text),
            InlineElement::InlineExplanation { text, explanation } => {
                write!(f, "Explain({:?} >> {:?})", text, explanation)
            }
            InlineElement::Annotation {
                surface, card_id, ..
            } => match card_id {
                Some(id) => write!(f, "Annotation({:?} -> {})", surface, id),
                None => write!(f, "Annotation({:?}, unresolved)", surface),
            },
            InlineElement::CodeBlock { language, lines } => {
                write!(f, "CodeBlock({}, {} lines)", language, lines.len())
            }
        }
    }
}
