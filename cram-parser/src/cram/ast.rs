//! Document tree for the cram format
//!
//!     The tree mirrors the authoring model: a Document holds Archives, an
//!     Archive holds Cards, a Card holds header Tags and named Sections, and a
//!     Section body is a flat run of inline elements. The tree is created by
//!     the parser, one per input file, and is read-mostly afterwards: the only
//!     later mutation is the resolver materializing annotation cards into the
//!     owning archive and writing resolved link targets into tags.
//!
//!     All nodes carry a mandatory `location: Range`. Location data is never
//!     optional; nodes constructed in tests default to the zero range.

pub mod diagnostics;
pub mod elements;
pub mod error;
pub mod range;

pub use diagnostics::{Diagnostic, Severity};
pub use elements::{
    Archive, Card, CardOrigin, Document, InlineElement, LinkTarget, Section, Tag, TagKind,
};
pub use error::{LexError, ParseError, ParseErrorKind};
pub use range::{Position, Range, SourceLocation};
