//! Line classification
//!
//! Determines what kind of line a raw source line is, using lazily compiled
//! regexes applied in priority order. Classification is stateless; the fence
//! state machine that decides whether a line is verbatim content lives in the
//! lexing pipeline, not here.

use once_cell::sync::Lazy;
use regex::Regex;

static ARCHIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*--<([^>]+)>--\s*$").unwrap());
static CARD_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*<\+(.+)$").unwrap());
static CARD_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*/\+>\s*$").unwrap());
static CARD_CLOSE_ALIAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*/\+\s*$").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\((.):\s*([^)]*)\)\s*$").unwrap());
static TAG_OPEN_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\((.):").unwrap());
static SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*---\s*(\S.*?)\s*$").unwrap());
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*```\s*(\w*)\s*$").unwrap());
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s?(.*)$").unwrap());
static BLANK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*$").unwrap());

/// The classification of one raw line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Archive { name: String },
    CardOpen { rest: String },
    CardClose { lenient: bool },
    Tag { symbol: char, content: String },
    /// Opens like a tag but the closing parenthesis is missing.
    MalformedTag,
    Section { name: String },
    Fence { language: String },
    Comment { text: String },
    Blank,
    Text,
}

/// Classify one line. `lenient_close` controls whether the bare `/+` closer
/// alias is recognized; when off it falls through to a text line.
pub fn classify(line: &str, lenient_close: bool) -> LineKind {
    if BLANK.is_match(line) {
        return LineKind::Blank;
    }
    if let Some(caps) = FENCE.captures(line) {
        return LineKind::Fence {
            language: caps[1].to_string(),
        };
    }
    if let Some(caps) = ARCHIVE.captures(line) {
        return LineKind::Archive {
            name: caps[1].trim().to_string(),
        };
    }
    if CARD_CLOSE.is_match(line) {
        return LineKind::CardClose { lenient: false };
    }
    if lenient_close && CARD_CLOSE_ALIAS.is_match(line) {
        return LineKind::CardClose { lenient: true };
    }
    if let Some(caps) = CARD_OPEN.captures(line) {
        return LineKind::CardOpen {
            rest: caps[1].to_string(),
        };
    }
    // Section before tag: `---` cannot look like a tag, but the order keeps
    // the priority list aligned with the grammar table.
    if let Some(caps) = SECTION.captures(line) {
        return LineKind::Section {
            name: caps[1].to_string(),
        };
    }
    if let Some(caps) = TAG.captures(line) {
        let symbol = caps[1].chars().next().unwrap_or('?');
        return LineKind::Tag {
            symbol,
            content: caps[2].trim().to_string(),
        };
    }
    if TAG_OPEN_ONLY.is_match(line) {
        return LineKind::MalformedTag;
    }
    if let Some(caps) = COMMENT.captures(line) {
        return LineKind::Comment {
            text: caps[1].trim().to_string(),
        };
    }
    LineKind::Text
}

/// Split link-tag content into `#` targets and trailing display text.
/// Returns None if the content does not lead with a `#` reference.
pub fn split_link_content(content: &str) -> Option<(Vec<String>, Option<String>)> {
    let first = content.split(',').next().unwrap_or("").trim();
    if !first.starts_with('#') {
        return None;
    }
    let mut targets = Vec::new();
    let mut display_parts = Vec::new();
    for segment in content.split(',') {
        let segment = segment.trim();
        if let Some(name) = segment.strip_prefix('#') {
            if !name.is_empty() {
                targets.push(name.to_string());
            }
        } else if !segment.is_empty() {
            display_parts.push(segment.to_string());
        }
    }
    let display = if display_parts.is_empty() {
        None
    } else {
        Some(display_parts.join(", "))
    };
    Some((targets, display))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_archive() {
        assert_eq!(
            classify("--<Vocabulary>--", true),
            LineKind::Archive {
                name: "Vocabulary".to_string()
            }
        );
        assert_eq!(
            classify("  --< Padded >--  ", true),
            LineKind::Archive {
                name: "Padded".to_string()
            }
        );
    }

    #[test]
    fn test_classify_card_delimiters() {
        assert_eq!(
            classify("<+vigilant", true),
            LineKind::CardOpen {
                rest: "vigilant".to_string()
            }
        );
        assert_eq!(classify("/+>", true), LineKind::CardClose { lenient: false });
        assert_eq!(classify("/+", true), LineKind::CardClose { lenient: true });
        // With the alias disabled, a bare /+ is just text.
        assert_eq!(classify("/+", false), LineKind::Text);
    }

    #[test]
    fn test_classify_tag_and_malformed_tag() {
        assert_eq!(
            classify("(!: important)", true),
            LineKind::Tag {
                symbol: '!',
                content: "important".to_string()
            }
        );
        assert_eq!(classify("(!: no close", true), LineKind::MalformedTag);
    }

    #[test]
    fn test_classify_section_requires_name() {
        assert_eq!(
            classify("---Definition", true),
            LineKind::Section {
                name: "Definition".to_string()
            }
        );
        // A bare --- has no name and stays a text line.
        assert_eq!(classify("---", true), LineKind::Text);
    }

    #[test]
    fn test_classify_fence_comment_blank() {
        assert_eq!(
            classify("```rust", true),
            LineKind::Fence {
                language: "rust".to_string()
            }
        );
        assert_eq!(
            classify("# a comment", true),
            LineKind::Comment {
                text: "a comment".to_string()
            }
        );
        assert_eq!(classify("   ", true), LineKind::Blank);
        assert_eq!(classify("plain prose", true), LineKind::Text);
    }

    #[test]
    fn test_split_link_content() {
        let (targets, display) = split_link_content("#careful, #watchful, synonyms").unwrap();
        assert_eq!(targets, vec!["careful", "watchful"]);
        assert_eq!(display.as_deref(), Some("synonyms"));

        assert!(split_link_content("just a label").is_none());

        let (targets, display) = split_link_content("#solo").unwrap();
        assert_eq!(targets, vec!["solo"]);
        assert_eq!(display, None);
    }
}
