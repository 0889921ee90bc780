//! AST element definitions, one file per element

pub mod archive;
pub mod card;
pub mod document;
pub mod inline;
pub mod section;
pub mod tag;

pub use archive::Archive;
pub use card::{Card, CardOrigin};
pub use document::Document;
pub use inline::InlineElement;
pub use section::Section;
pub use tag::{LinkTarget, Tag, TagKind};
