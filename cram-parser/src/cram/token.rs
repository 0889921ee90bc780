//! Token definitions for the cram format
//!
//!     The lexer is line-oriented: structural markers (archive, card
//!     delimiters, tags, section headers, code fences) each claim a whole
//!     line, and only text lines are scanned further for inline constructs.
//!     Tokens therefore arrive in source order as a flat stream, one or more
//!     per line, each paired with its [`Range`].
//!
//!     Tokens carry their decoded payload rather than the raw lexeme: by the
//!     time a Tag token exists its symbol and targets are already split out.
//!     The parser consumes the stream strictly left to right; tokens are
//!     ephemeral and never outlive parsing.

use crate::cram::ast::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// `--<Name>--`
    ArchiveMarker { name: String },
    /// `<+topic`
    CardOpen { topic: String },
    /// `/+>`, or the tolerated bare `/+` alias (lenient = true).
    CardClose { lenient: bool },
    /// `(s: content)` with no `#` references.
    Tag { symbol: char, display: String },
    /// `(s: #a, #b, trailing text)`
    LinkTag {
        symbol: char,
        targets: Vec<String>,
        display: Option<String>,
    },
    /// `---Name`
    SectionHeader { name: String },
    /// ` ``` lang `
    CodeFenceOpen { language: String },
    /// ` ``` `
    CodeFenceClose,
    /// `` `surface`[body] ``
    Annotation { surface: String, body: String },
    /// `>> explanation`, to end of line.
    InlineExplain { text: String },
    /// A plain text run. Inside a code fence this is one verbatim line.
    Text { text: String },
    /// `# ...` with the marker stripped. Ignored everywhere except directly
    /// after an archive marker, where it feeds the archive description.
    Comment { text: String },
    Eof,
}

impl Token {
    /// Short grammar-level name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::ArchiveMarker { .. } => "archive marker",
            Token::CardOpen { .. } => "card open",
            Token::CardClose { .. } => "card close",
            Token::Tag { .. } => "tag",
            Token::LinkTag { .. } => "link tag",
            Token::SectionHeader { .. } => "section header",
            Token::CodeFenceOpen { .. } => "code fence",
            Token::CodeFenceClose => "code fence close",
            Token::Annotation { .. } => "annotation",
            Token::InlineExplain { .. } => "inline explanation",
            Token::Text { .. } => "text",
            Token::Comment { .. } => "comment",
            Token::Eof => "end of file",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::ArchiveMarker { name } => write!(f, "ArchiveMarker({})", name),
            Token::CardOpen { topic } => write!(f, "CardOpen({})", topic),
            Token::CardClose { lenient } => {
                write!(f, "CardClose({})", if *lenient { "/+" } else { "/+>" })
            }
            Token::Tag { symbol, display } => write!(f, "Tag({}: {})", symbol, display),
            Token::LinkTag {
                symbol, targets, ..
            } => write!(f, "LinkTag({}: #{})", symbol, targets.join(", #")),
            Token::SectionHeader { name } => write!(f, "SectionHeader({})", name),
            Token::CodeFenceOpen { language } => write!(f, "CodeFenceOpen({})", language),
            Token::CodeFenceClose => write!(f, "CodeFenceClose"),
            Token::Annotation { surface, body } => {
                write!(f, "Annotation({:?}[{:?}])", surface, body)
            }
            Token::InlineExplain { text } => write!(f, "InlineExplain({:?})", text),
            Token::Text { text } => write!(f, "Text({:?})", text),
            Token::Comment { text } => write!(f, "Comment({:?})", text),
            Token::Eof => write!(f, "Eof"),
        }
    }
}

/// A token paired with its source range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spanned {
    pub token: Token,
    pub range: Range,
}

impl Spanned {
    pub fn new(token: Token, range: Range) -> Self {
        Self { token, range }
    }
}
