//! Lexer
//!
//!     Tokenization for the cram format runs line by line, single pass, in
//!     source order:
//!
//!         1. Each raw line is classified by pattern priority. See
//!            [line_classification].
//!         2. Structural lines (archive markers, card delimiters, tags,
//!            section headers, fences) become one token each. A card-open
//!            line may additionally carry tags after the topic; those are
//!            split off here so the parser only ever sees whole tokens.
//!         3. Text lines are scanned for inline constructs. See [inline].
//!         4. Fence state is tracked by the lexer itself: between a fence
//!            open and its close every line is a verbatim Text token, no
//!            classification and no inline scanning.
//!
//!     Blank lines produce no tokens. Comment lines (`# ...`) become Comment
//!     tokens; the parser ignores them except directly after an archive
//!     marker, where they form the archive description. The stream always
//!     ends with a single Eof token.
//!
//! Failure modes (all fatal for the file): an unterminated annotation span,
//! an unterminated code fence at end of file, and a tag line that never
//! closes its parenthesis.

pub mod inline;
pub mod line_classification;

use crate::cram::ast::error::LexError;
use crate::cram::ast::range::{Range, SourceLocation};
use crate::cram::token::{Spanned, Token};
use line_classification::{classify, split_link_content, LineKind};

/// Options honored by the lexer.
#[derive(Debug, Clone)]
pub struct LexOptions {
    /// Accept a bare `/+` as a card closer (the parser downgrades it to a
    /// warning); when false the alias lexes as plain text.
    pub lenient_card_close: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            lenient_card_close: true,
        }
    }
}

/// Tokenize one source file. The text is expected to be newline-normalized;
/// a trailing `\r` per line is tolerated and stripped.
pub fn tokenize(source: &str, options: &LexOptions) -> Result<Vec<Spanned>, LexError> {
    let locations = SourceLocation::new(source);
    let mut tokens: Vec<Spanned> = Vec::new();

    // Fence state: Some(range of the opening line) while inside a fence.
    let mut open_fence: Option<Range> = None;

    let mut offset = 0usize;
    for raw_line in source.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let line_range = locations.byte_range_to_range(&(offset..offset + line.len()));

        if open_fence.is_some() {
            if matches!(classify(line, false), LineKind::Fence { ref language } if language.is_empty())
            {
                tokens.push(Spanned::new(Token::CodeFenceClose, line_range));
                open_fence = None;
            } else {
                tokens.push(Spanned::new(
                    Token::Text {
                        text: line.to_string(),
                    },
                    line_range,
                ));
            }
            offset += raw_line.len() + 1;
            continue;
        }

        match classify(line, options.lenient_card_close) {
            LineKind::Blank => {}
            LineKind::Comment { text } => {
                tokens.push(Spanned::new(Token::Comment { text }, line_range));
            }
            LineKind::Archive { name } => {
                tokens.push(Spanned::new(Token::ArchiveMarker { name }, line_range));
            }
            LineKind::CardOpen { rest } => {
                lex_card_open(&rest, offset, line, &locations, &mut tokens)?;
            }
            LineKind::CardClose { lenient } => {
                tokens.push(Spanned::new(Token::CardClose { lenient }, line_range));
            }
            LineKind::Tag { symbol, content } => {
                tokens.push(Spanned::new(tag_token(symbol, &content), line_range));
            }
            LineKind::MalformedTag => {
                return Err(LexError::UnterminatedTag {
                    location: line_range,
                });
            }
            LineKind::Section { name } => {
                tokens.push(Spanned::new(Token::SectionHeader { name }, line_range));
            }
            LineKind::Fence { language } => {
                tokens.push(Spanned::new(
                    Token::CodeFenceOpen { language },
                    line_range.clone(),
                ));
                open_fence = Some(line_range);
            }
            LineKind::Text => {
                inline::scan_line(line, offset, &locations, &mut tokens)?;
            }
        }
        offset += raw_line.len() + 1;
    }

    if let Some(location) = open_fence {
        return Err(LexError::UnterminatedCodeFence { location });
    }

    let end = source.len();
    tokens.push(Spanned::new(
        Token::Eof,
        locations.byte_range_to_range(&(end..end)),
    ));
    Ok(tokens)
}

/// Build a Tag or LinkTag token from a tag line's parts.
fn tag_token(symbol: char, content: &str) -> Token {
    match split_link_content(content) {
        Some((targets, display)) => Token::LinkTag {
            symbol,
            targets,
            display,
        },
        None => Token::Tag {
            symbol,
            display: content.to_string(),
        },
    }
}

/// A card-open line: the topic runs to end of line or to the first tag
/// parenthesis; anything after the topic is lexed as tags.
fn lex_card_open(
    rest: &str,
    line_offset: usize,
    line: &str,
    locations: &SourceLocation,
    tokens: &mut Vec<Spanned>,
) -> Result<(), LexError> {
    let open_len = line.len() - rest.len(); // covers leading ws and `<+`
    let (topic_part, tag_part) = match rest.find('(') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let topic_end = line_offset + open_len + topic_part.len();
    tokens.push(Spanned::new(
        Token::CardOpen {
            topic: topic_part.trim().to_string(),
        },
        locations.byte_range_to_range(&(line_offset..topic_end)),
    ));

    if !tag_part.is_empty() {
        match classify(tag_part, false) {
            LineKind::Tag { symbol, content } => {
                let range = locations.byte_range_to_range(&(topic_end..line_offset + line.len()));
                tokens.push(Spanned::new(tag_token(symbol, &content), range));
            }
            _ => {
                return Err(LexError::UnterminatedTag {
                    location: locations
                        .byte_range_to_range(&(topic_end..line_offset + line.len())),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source, &LexOptions::default())
            .expect("lex failed")
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_card_skeleton() {
        let tokens = lex("<+alpha\n---Def\nhello\n/+>\n");
        assert_eq!(
            tokens,
            vec![
                Token::CardOpen {
                    topic: "alpha".to_string()
                },
                Token::SectionHeader {
                    name: "Def".to_string()
                },
                Token::Text {
                    text: "hello".to_string()
                },
                Token::CardClose { lenient: false },
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_fence_content_is_verbatim() {
        let tokens = lex("```rust\nlet x = `weird`;\n---not a section\n```\n");
        assert_eq!(
            tokens,
            vec![
                Token::CodeFenceOpen {
                    language: "rust".to_string()
                },
                Token::Text {
                    text: "let x = `weird`;".to_string()
                },
                Token::Text {
                    text: "---not a section".to_string()
                },
                Token::CodeFenceClose,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_fence_fails() {
        let err = tokenize("```\ncode\n", &LexOptions::default()).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedCodeFence { .. }));
    }

    #[test]
    fn test_card_open_with_trailing_tag() {
        let tokens = lex("<+beta (>: #alpha)\n/+>\n");
        assert_eq!(
            tokens,
            vec![
                Token::CardOpen {
                    topic: "beta".to_string()
                },
                Token::LinkTag {
                    symbol: '>',
                    targets: vec!["alpha".to_string()],
                    display: None
                },
                Token::CardClose { lenient: false },
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_blanks_produce_nothing_comments_keep_text() {
        let tokens = lex("# header comment\n\n<+a\n/+>\n");
        assert_eq!(
            tokens,
            vec![
                Token::Comment {
                    text: "header comment".to_string()
                },
                Token::CardOpen {
                    topic: "a".to_string()
                },
                Token::CardClose { lenient: false },
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_tag_missing_paren_is_error() {
        let err = tokenize("<+a\n(!: oops\n/+>\n", &LexOptions::default()).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedTag { .. }));
    }

    #[test]
    fn test_token_positions_track_lines() {
        let spanned = tokenize("<+a\n---S\n/+>\n", &LexOptions::default()).unwrap();
        assert_eq!(spanned[0].range.start.line, 0);
        assert_eq!(spanned[1].range.start.line, 1);
        assert_eq!(spanned[2].range.start.line, 2);
    }
}
