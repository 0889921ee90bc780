//! Parser
//!
//!     Builds the document tree from the token stream. The grammar is
//!     deliberately non-nesting, which keeps the parser an explicit state
//!     machine rather than a recursive one:
//!
//!         Document := (ArchiveMarker | Card)*
//!         Card     := CardOpen Tag* Section* CardClose
//!         Section  := SectionHeader InlineElement*
//!
//!     There is exactly one "current archive" slot (an archive marker
//!     toggles it; archives never nest) and one "current open card" slot
//!     (a second open before a close is a hard error naming the outer
//!     card's start).
//!
//!     Comment tokens directly after an archive marker become the archive's
//!     description; anywhere else they are discarded.
//!
//!     Tags are header-only metadata: a tag token after the card's first
//!     section is rejected. Two tags sharing a symbol within one card are
//!     rejected because their rendering position would be ambiguous.
//!
//! The parser performs no resolution and no I/O. Non-fatal observations
//! (the lenient card closer, content outside any section) are reported as
//! warning diagnostics alongside the tree.

use crate::cram::ast::diagnostics::Diagnostic;
use crate::cram::ast::elements::{Archive, Card, Document, InlineElement, LinkTarget, Section, Tag};
use crate::cram::ast::error::{ParseError, ParseErrorKind};
use crate::cram::ast::range::Range;
use crate::cram::token::{Spanned, Token};

/// A parsed tree plus the warnings collected on the way.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub document: Document,
    pub warnings: Vec<Diagnostic>,
}

/// Parse one file's token stream into a document tree.
pub fn parse(tokens: &[Spanned], file_id: &str) -> Result<ParseOutcome, ParseError> {
    Parser::new(tokens, file_id).run()
}

/// The card currently being built, with its in-progress section.
struct OpenCard {
    card: Card,
    current_section: Option<Section>,
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    file_id: String,
    archives: Vec<Archive>,
    /// Index into `archives` of the toggled-in archive, if any.
    current_archive: Option<usize>,
    open_card: Option<OpenCard>,
    /// Set right after an archive marker; while set, comment tokens extend
    /// that archive's description. Any other token clears it.
    describing_archive: bool,
    warnings: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], file_id: &str) -> Self {
        Self {
            tokens,
            pos: 0,
            file_id: file_id.to_string(),
            archives: Vec::new(),
            current_archive: None,
            open_card: None,
            describing_archive: false,
            warnings: Vec::new(),
        }
    }

    fn run(mut self) -> Result<ParseOutcome, ParseError> {
        while self.pos < self.tokens.len() {
            let spanned = &self.tokens[self.pos];
            self.pos += 1;
            let range = spanned.range.clone();
            if !matches!(&spanned.token, Token::Comment { .. }) {
                self.describing_archive = false;
            }
            match &spanned.token {
                Token::ArchiveMarker { name } => self.on_archive(name, range)?,
                Token::CardOpen { topic } => self.on_card_open(topic, range)?,
                Token::CardClose { lenient } => self.on_card_close(*lenient, range)?,
                Token::Tag { symbol, display } => {
                    let tag = Tag::plain(*symbol, display).at(range.clone());
                    self.on_tag(tag, range)?;
                }
                Token::LinkTag {
                    symbol,
                    targets,
                    display,
                } => {
                    let targets = targets
                        .iter()
                        .map(|name| LinkTarget::unresolved(name))
                        .collect();
                    let tag = Tag::link(*symbol, targets, display.clone()).at(range.clone());
                    self.on_tag(tag, range)?;
                }
                Token::SectionHeader { name } => self.on_section(name, range)?,
                Token::CodeFenceOpen { language } => self.on_code_fence(language, range)?,
                Token::CodeFenceClose => {
                    // The lexer only emits a close after an open, and
                    // on_code_fence consumes the close itself.
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            found: "code fence close".to_string(),
                        },
                        range,
                    ));
                }
                Token::Annotation { surface, body } => {
                    let element = InlineElement::annotation(surface, body, range.clone());
                    self.on_inline(element, range);
                }
                Token::InlineExplain { text } => self.on_explain(text, range),
                Token::Text { text } => {
                    self.on_inline(InlineElement::text(text), range);
                }
                Token::Comment { text } => self.on_comment(text),
                Token::Eof => {
                    if let Some(open) = &self.open_card {
                        return Err(ParseError::new(
                            ParseErrorKind::UnclosedCard {
                                topic: open.card.topic_id.clone(),
                                opened_at: open.card.location.clone(),
                            },
                            range,
                        ));
                    }
                }
            }
        }

        Ok(ParseOutcome {
            document: Document {
                file_id: self.file_id,
                archives: self.archives,
            },
            warnings: self.warnings,
        })
    }

    fn on_archive(&mut self, name: &str, range: Range) -> Result<(), ParseError> {
        if self.open_card.is_some() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found: "archive marker inside an open card".to_string(),
                },
                range,
            ));
        }
        self.archives.push(Archive::named(name).at(range));
        self.current_archive = Some(self.archives.len() - 1);
        self.describing_archive = true;
        Ok(())
    }

    /// Comments directly after an archive marker form the archive's
    /// description, joined with single spaces; comments anywhere else are
    /// ignored.
    fn on_comment(&mut self, text: &str) {
        if !self.describing_archive || text.is_empty() {
            return;
        }
        if let Some(index) = self.current_archive {
            let description = &mut self.archives[index].description;
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(text);
        }
    }

    fn on_card_open(&mut self, topic: &str, range: Range) -> Result<(), ParseError> {
        if let Some(open) = &self.open_card {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedCard {
                    topic: open.card.topic_id.clone(),
                    opened_at: open.card.location.clone(),
                },
                range,
            ));
        }
        self.open_card = Some(OpenCard {
            card: Card::new(topic).at(range),
            current_section: None,
        });
        Ok(())
    }

    fn on_card_close(&mut self, lenient: bool, range: Range) -> Result<(), ParseError> {
        let Some(mut open) = self.open_card.take() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found: "card close without an open card".to_string(),
                },
                range,
            ));
        };
        if lenient {
            self.warnings.push(Diagnostic::warning(
                "lenient-card-close",
                format!(
                    "card '{}' closed with bare /+; the canonical closer is /+>",
                    open.card.topic_id
                ),
                &self.file_id,
                range.start,
            ));
        }
        if let Some(section) = open.current_section.take() {
            open.card.sections.push(section);
        }
        let archive = self.ensure_archive();
        self.archives[archive].cards.push(open.card);
        Ok(())
    }

    fn on_tag(&mut self, tag: Tag, range: Range) -> Result<(), ParseError> {
        let Some(open) = self.open_card.as_mut() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found: "tag outside a card".to_string(),
                },
                range,
            ));
        };
        if open.current_section.is_some() || !open.card.sections.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found: "tag after the card's first section".to_string(),
                },
                range,
            ));
        }
        if let Some(existing) = open.card.find_tag(tag.symbol) {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateTagSymbolInCard {
                    symbol: tag.symbol,
                    first: existing.location.clone(),
                },
                range,
            ));
        }
        open.card.tags.push(tag);
        Ok(())
    }

    fn on_section(&mut self, name: &str, range: Range) -> Result<(), ParseError> {
        let Some(open) = self.open_card.as_mut() else {
            return Err(ParseError::new(
                ParseErrorKind::SectionOutsideCard {
                    name: name.to_string(),
                },
                range,
            ));
        };
        if let Some(section) = open.current_section.take() {
            open.card.sections.push(section);
        }
        open.current_section = Some(Section::new(name).at(range));
        Ok(())
    }

    fn on_code_fence(&mut self, language: &str, range: Range) -> Result<(), ParseError> {
        // Consume the verbatim lines and the closing fence unconditionally,
        // then decide whether there was a section to attach the block to.
        let mut lines = Vec::new();
        loop {
            let Some(spanned) = self.tokens.get(self.pos) else {
                // The lexer guarantees a close; a missing one here means the
                // stream was assembled by hand.
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken {
                        found: "end of stream inside a code fence".to_string(),
                    },
                    range,
                ));
            };
            self.pos += 1;
            match &spanned.token {
                Token::Text { text } => lines.push(text.clone()),
                Token::CodeFenceClose => break,
                other => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            found: format!("{} inside a code fence", other.describe()),
                        },
                        spanned.range.clone(),
                    ));
                }
            }
        }
        let language = if language.is_empty() {
            "text".to_string()
        } else {
            language.to_string()
        };
        let block = InlineElement::CodeBlock { language, lines };
        self.on_inline(block, range);
        Ok(())
    }

    /// Append an inline element to the current section, or warn and drop it
    /// when there is no section to hold it.
    fn on_inline(&mut self, element: InlineElement, range: Range) {
        match self.open_card.as_mut() {
            Some(open) => match open.current_section.as_mut() {
                Some(section) => section.body.push(element),
                None => self.warnings.push(Diagnostic::warning(
                    "content-outside-section",
                    format!(
                        "content inside card '{}' before its first section was skipped",
                        open.card.topic_id
                    ),
                    &self.file_id,
                    range.start,
                )),
            },
            None => self.warnings.push(Diagnostic::warning(
                "content-outside-card",
                "content outside any card was skipped".to_string(),
                &self.file_id,
                range.start,
            )),
        }
    }

    /// An explanation attaches to the immediately preceding text run; with
    /// no preceding run it stands alone with empty surface text.
    fn on_explain(&mut self, explanation: &str, range: Range) {
        let Some(open) = self.open_card.as_mut() else {
            self.on_inline(InlineElement::text(""), range);
            return;
        };
        let Some(section) = open.current_section.as_mut() else {
            let topic = open.card.topic_id.clone();
            self.warnings.push(Diagnostic::warning(
                "content-outside-section",
                format!(
                    "content inside card '{}' before its first section was skipped",
                    topic
                ),
                &self.file_id,
                range.start,
            ));
            return;
        };
        let text = match section.body.last() {
            Some(InlineElement::TextRun { .. }) => match section.body.pop() {
                Some(InlineElement::TextRun { text }) => text,
                _ => String::new(),
            },
            _ => String::new(),
        };
        section.body.push(InlineElement::InlineExplanation {
            text,
            explanation: explanation.to_string(),
        });
    }

    /// The archive a finished card belongs to, creating the default archive
    /// on first use.
    fn ensure_archive(&mut self) -> usize {
        match self.current_archive {
            Some(index) => index,
            None => {
                self.archives.push(Archive::default_archive());
                self.current_archive = Some(self.archives.len() - 1);
                self.archives.len() - 1
            }
        }
    }
}
