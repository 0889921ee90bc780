//! Inline scanning of text lines
//!
//! Text lines are the only lines carrying inline constructs: annotation
//! spans and `>>` explanations. The scan uses a logos lexer over the line;
//! the annotation pattern claims a full `` `surface`[body] `` span in one
//! token, so any backtick logos hands back on its own is an unterminated
//! span and a hard lex error.
//!
//! An explanation marker consumes the rest of the line: explanations run to
//! end of line by definition and are not scanned further.

use crate::cram::ast::error::LexError;
use crate::cram::ast::range::SourceLocation;
use crate::cram::token::{Spanned, Token};
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
pub enum InlineTok {
    /// A complete annotation span; longest-match beats the lone backtick.
    #[regex(r"`[^`\n]*`\[[^\]\n]*\]")]
    Annotation,

    /// A backtick that did not open a complete annotation span.
    #[token("`")]
    LoneBacktick,

    #[token(">>")]
    ExplainMarker,

    #[regex(r"[^`>\n]+")]
    Text,

    /// A `>` that is not part of `>>`.
    #[token(">")]
    Gt,
}

/// Scan one text line (given as a slice of the full source, with its byte
/// offset) and append the resulting tokens.
pub fn scan_line(
    line: &str,
    line_offset: usize,
    locations: &SourceLocation,
    out: &mut Vec<Spanned>,
) -> Result<(), LexError> {
    let mut lexer = InlineTok::lexer(line);
    let mut text_buf = String::new();
    let mut text_start: Option<usize> = None;
    let mut text_end = 0usize;

    // Flush the accumulated text run, trimmed; whitespace-only runs vanish.
    fn flush(
        buf: &mut String,
        start: &mut Option<usize>,
        end: usize,
        line_offset: usize,
        locations: &SourceLocation,
        out: &mut Vec<Spanned>,
    ) {
        if let Some(s) = start.take() {
            let trimmed = buf.trim();
            if !trimmed.is_empty() {
                let range =
                    locations.byte_range_to_range(&(line_offset + s..line_offset + end));
                out.push(Spanned::new(
                    Token::Text {
                        text: trimmed.to_string(),
                    },
                    range,
                ));
            }
            buf.clear();
        }
    }

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(InlineTok::Annotation) => {
                flush(
                    &mut text_buf,
                    &mut text_start,
                    text_end,
                    line_offset,
                    locations,
                    out,
                );
                let slice = lexer.slice();
                let (surface, body) = split_annotation(slice);
                let range = locations
                    .byte_range_to_range(&(line_offset + span.start..line_offset + span.end));
                out.push(Spanned::new(
                    Token::Annotation {
                        surface: surface.to_string(),
                        body: body.to_string(),
                    },
                    range,
                ));
            }
            Ok(InlineTok::LoneBacktick) => {
                let location = locations
                    .byte_range_to_range(&(line_offset + span.start..line_offset + span.end));
                return Err(LexError::UnterminatedAnnotation { location });
            }
            Ok(InlineTok::ExplainMarker) => {
                flush(
                    &mut text_buf,
                    &mut text_start,
                    text_end,
                    line_offset,
                    locations,
                    out,
                );
                let rest = lexer.remainder().trim().to_string();
                let range = locations
                    .byte_range_to_range(&(line_offset + span.start..line_offset + line.len()));
                out.push(Spanned::new(Token::InlineExplain { text: rest }, range));
                return Ok(());
            }
            Ok(InlineTok::Text) | Ok(InlineTok::Gt) => {
                if text_start.is_none() {
                    text_start = Some(span.start);
                }
                text_buf.push_str(lexer.slice());
                text_end = span.end;
            }
            Err(_) => {
                // The catch-all patterns cover every character; unreachable
                // in practice, but fold stray bytes into the text run.
                if text_start.is_none() {
                    text_start = Some(span.start);
                }
                text_buf.push_str(lexer.slice());
                text_end = span.end;
            }
        }
    }
    flush(
        &mut text_buf,
        &mut text_start,
        text_end,
        line_offset,
        locations,
        out,
    );
    Ok(())
}

/// Split a matched annotation lexeme into surface and body.
fn split_annotation(slice: &str) -> (&str, &str) {
    // Shape is guaranteed by the regex: `surface`[body]
    let inner = &slice[1..slice.len() - 1]; // drop leading ` and trailing ]
    match inner.find("`[") {
        Some(split) => (inner[..split].trim(), inner[split + 2..].trim()),
        None => (inner.trim(), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(line: &str) -> Result<Vec<Token>, LexError> {
        let locations = SourceLocation::new(line);
        let mut out = Vec::new();
        scan_line(line, 0, &locations, &mut out)?;
        Ok(out.into_iter().map(|s| s.token).collect())
    }

    #[test]
    fn test_plain_text_line() {
        let tokens = scan("adj. watchful; alert").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Text {
                text: "adj. watchful; alert".to_string()
            }]
        );
    }

    #[test]
    fn test_annotation_with_surrounding_text() {
        let tokens = scan("beware of `phishing`[email-borne fraud] attacks").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Text {
                    text: "beware of".to_string()
                },
                Token::Annotation {
                    surface: "phishing".to_string(),
                    body: "email-borne fraud".to_string()
                },
                Token::Text {
                    text: "attacks".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_explanation_consumes_rest_of_line() {
        let tokens = scan("remain vigilant >> stay alert >> even this").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Text {
                    text: "remain vigilant".to_string()
                },
                Token::InlineExplain {
                    text: "stay alert >> even this".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_single_gt_is_text() {
        let tokens = scan("a > b").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Text {
                text: "a > b".to_string()
            }]
        );
    }

    #[test]
    fn test_unterminated_annotation_is_error() {
        let err = scan("dangling `span with no body").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedAnnotation { .. }));

        let err = scan("closed `span` but no bracket").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedAnnotation { .. }));
    }

    #[test]
    fn test_annotation_then_explanation() {
        let tokens = scan("`scam`[a trick] note >> watch out").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Annotation {
                    surface: "scam".to_string(),
                    body: "a trick".to_string()
                },
                Token::Text {
                    text: "note".to_string()
                },
                Token::InlineExplain {
                    text: "watch out".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_annotation_body_allowed() {
        let tokens = scan("`term`[]").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Annotation {
                surface: "term".to_string(),
                body: String::new()
            }]
        );
    }
}
