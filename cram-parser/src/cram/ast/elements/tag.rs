//! Tag
//!
//! Card-level metadata of the form `(s: content)`, header-only: the grammar
//! rejects tags after the first section. A tag whose content leads with a
//! `#name` reference is a link tag; its targets stay unresolved strings until
//! the resolver has the complete symbol table.
//!
//! Examples:
//!     (!: key vocabulary)
//!     (>: #careful, #watchful, synonyms)

use crate::cram::ast::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `#name` reference inside a link tag. `resolved` is written by the
/// resolver: the concrete topic id on a hit, None for a dangling target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub name: String,
    pub resolved: Option<String>,
}

impl LinkTarget {
    pub fn unresolved(name: &str) -> Self {
        Self {
            name: name.to_string(),
            resolved: None,
        }
    }

    pub fn resolved(name: &str, topic_id: &str) -> Self {
        Self {
            name: name.to_string(),
            resolved: Some(topic_id.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TagKind {
    /// Plain label content, no references.
    Plain { display: String },
    /// `#name` references plus optional trailing display text.
    Link {
        targets: Vec<LinkTarget>,
        display: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub symbol: char,
    pub kind: TagKind,
    pub location: Range,
}

impl Tag {
    pub fn plain(symbol: char, display: &str) -> Self {
        Self {
            symbol,
            kind: TagKind::Plain {
                display: display.to_string(),
            },
            location: Range::default(),
        }
    }

    pub fn link(symbol: char, targets: Vec<LinkTarget>, display: Option<String>) -> Self {
        Self {
            symbol,
            kind: TagKind::Link { targets, display },
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind, TagKind::Link { .. })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TagKind::Plain { display } => write!(f, "({}: {})", self.symbol, display),
            TagKind::Link { targets, display } => {
                let names: Vec<String> =
                    targets.iter().map(|t| format!("#{}", t.name)).collect();
                write!(f, "({}: {}", self.symbol, names.join(", "))?;
                if let Some(text) = display {
                    write!(f, ", {}", text)?;
                }
                write!(f, ")")
            }
        }
    }
}
