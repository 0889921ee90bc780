//! HTML export for compiled cram documents
//!
//! Renders a resolved forest into one self-contained HTML document:
//! embedded CSS, no scripts, no external assets. Annotations become
//! CSS-only hover tooltips that double as links to their synthesized
//! cards; resolved link tags become in-page anchors; the edge set is
//! inverted into a backlinks block per card.

pub mod render;

pub use render::{render_forest, RenderOptions, Theme};
