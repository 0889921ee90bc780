//! Error types for lexing and parsing
//!
//! Lex and parse errors are fatal for the file they occur in, but one file's
//! failure never stops the other files in a compilation run from being lexed,
//! parsed and reported. Global-consistency errors (duplicate topic ids,
//! synthesis collisions) live in [`crate::cram::resolving`].

use crate::cram::ast::range::Range;
use std::fmt;

/// Errors produced while tokenizing one source file.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A backtick-opened annotation span with no closing `` ` `` + `[body]`
    /// before the end of the line.
    UnterminatedAnnotation { location: Range },
    /// A code fence that was still open when the file ended.
    UnterminatedCodeFence { location: Range },
    /// A line that opens like a tag, `(s:`, but never closes its parenthesis.
    UnterminatedTag { location: Range },
}

impl LexError {
    pub fn location(&self) -> &Range {
        match self {
            LexError::UnterminatedAnnotation { location }
            | LexError::UnterminatedCodeFence { location }
            | LexError::UnterminatedTag { location } => location,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedAnnotation { location } => {
                write!(
                    f,
                    "unterminated annotation span at {}: expected `surface`[body] before end of line",
                    location.start
                )
            }
            LexError::UnterminatedCodeFence { location } => {
                write!(
                    f,
                    "unterminated code fence opened at {}: no closing ``` before end of file",
                    location.start
                )
            }
            LexError::UnterminatedTag { location } => {
                write!(
                    f,
                    "unterminated tag at {}: missing closing parenthesis",
                    location.start
                )
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Structural grammar violations found while building the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A token that the grammar does not allow at this point.
    UnexpectedToken { found: String },
    /// A card was opened while another card was still open, or the file ended
    /// with a card open. Carries the open card's topic and start location.
    UnclosedCard { topic: String, opened_at: Range },
    /// Reserved: archives toggle rather than nest, so with the current
    /// grammar this kind is never produced. Kept so the diagnostic taxonomy
    /// matches the documented contract.
    UnclosedArchive { name: String },
    /// A section header outside any card.
    SectionOutsideCard { name: String },
    /// Two tags in the same card share a symbol character, which makes their
    /// rendering position ambiguous.
    DuplicateTagSymbolInCard { symbol: char, first: Range },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: Range,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: Range) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { found } => {
                write!(f, "unexpected {} at {}", found, self.location.start)
            }
            ParseErrorKind::UnclosedCard { topic, opened_at } => {
                write!(
                    f,
                    "card '{}' opened at {} was never closed (expected /+> before {})",
                    topic, opened_at.start, self.location.start
                )
            }
            ParseErrorKind::UnclosedArchive { name } => {
                write!(f, "archive '{}' was never closed", name)
            }
            ParseErrorKind::SectionOutsideCard { name } => {
                write!(
                    f,
                    "section '{}' at {} is outside any card",
                    name, self.location.start
                )
            }
            ParseErrorKind::DuplicateTagSymbolInCard { symbol, first } => {
                write!(
                    f,
                    "duplicate tag symbol '{}' at {}: first used at {}",
                    symbol, self.location.start, first.start
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Format source context around an error location: two lines before, the
/// error line with a >> marker, two lines after, all numbered.
pub fn format_source_context(source: &str, range: &Range) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = range.start.line;

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for line_num in start_line..end_line {
        let marker = if line_num == error_line { ">>" } else { "  " };
        if line_num < lines.len() {
            context.push_str(&format!(
                "{} {:3} | {}\n",
                marker,
                line_num + 1,
                lines[line_num]
            ));
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cram::ast::range::Position;

    #[test]
    fn test_format_source_context_marks_error_line() {
        let source = "one\ntwo\nthree\nbad line\nfive\nsix";
        let range = Range::new(0..0, Position::new(3, 0), Position::new(3, 8));

        let context = format_source_context(source, &range);

        assert!(context.contains(">>   4 | bad line"));
        assert!(context.contains("     2 | two"));
        assert!(context.contains("     6 | six"));
        assert!(!context.contains("one\n>>"));
    }

    #[test]
    fn test_parse_error_display_names_both_locations() {
        let err = ParseError::new(
            ParseErrorKind::UnclosedCard {
                topic: "alpha".to_string(),
                opened_at: Range::new(0..2, Position::new(0, 0), Position::new(0, 2)),
            },
            Range::new(10..12, Position::new(4, 0), Position::new(4, 2)),
        );
        let msg = err.to_string();
        assert!(msg.contains("'alpha'"));
        assert!(msg.contains("1:1"));
        assert!(msg.contains("5:1"));
    }
}
