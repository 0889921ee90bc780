//! Resolving
//!
//!     Pass 1: walk every parsed tree in input order, register authored
//!             topic ids, then materialize each inline annotation into a
//!             synthesized card appended to its host archive.
//!     Pass 2: walk again and resolve `#name` link-tag targets against the
//!             completed symbol table.
//!
//! Every ordering the resolver emits (synthesized cards, edges, warnings)
//! comes from the document walk, which follows input order. The symbol
//! table is probe-only.

pub mod resolver;
pub mod slug;
pub mod symbol_table;

pub use resolver::{resolve, ResolveOptions, Resolution};
pub use slug::slugify;
pub use symbol_table::{SymbolEntry, SymbolTable};

use crate::cram::ast::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One directed reference between two cards, by topic id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReference {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// A resolved `#name` target in a link tag.
    Link,
    /// The back-reference from a synthesized card to its host.
    AnnotationBacklink,
}

/// Errors that abort resolution for the whole compilation run.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The same topic id declared by two cards. Both declaration sites are
    /// carried so the report can name each one.
    DuplicateTopicId {
        topic: String,
        first_file: String,
        first: Range,
        second_file: String,
        second: Range,
    },
    /// Suffixing could not find a free id for a synthesized card.
    TopicIdCollisionDuringSynthesis {
        slug: String,
        file_id: String,
        location: Range,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::DuplicateTopicId {
                topic,
                first_file,
                first,
                second_file,
                second,
            } => write!(
                f,
                "duplicate topic id '{}': first declared at {}:{}, declared again at {}:{}",
                topic, first_file, first.start, second_file, second.start
            ),
            ResolveError::TopicIdCollisionDuringSynthesis {
                slug,
                file_id,
                location,
            } => write!(
                f,
                "could not derive a free topic id from '{}' for the annotation at {}:{}",
                slug, file_id, location.start
            ),
        }
    }
}

impl std::error::Error for ResolveError {}
