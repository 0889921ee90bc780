//! Resolver
//!
//! Two passes over the parsed forest. The first registers every authored
//! topic id and promotes inline annotations to full cards; the second
//! resolves link-tag targets against the then-complete symbol table, so a
//! link may point forward in the same file or into a later file.

use crate::cram::ast::diagnostics::Diagnostic;
use crate::cram::ast::elements::{
    Card, CardOrigin, Document, InlineElement, LinkTarget, Section, Tag, TagKind,
};
use crate::cram::ast::range::Range;
use crate::cram::resolving::slug::slugify;
use crate::cram::resolving::symbol_table::{SymbolEntry, SymbolTable};
use crate::cram::resolving::{CrossReference, EdgeKind, ResolveError};

/// The back-reference tag synthesized cards carry toward their host.
const BACKLINK_SYMBOL: char = '<';
const BACKLINK_LABEL: &str = "\u{2190}";

/// Highest numeric suffix tried before giving up on a synthesized id.
const MAX_SLUG_SUFFIX: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Promote inline annotations to synthesized cards. When off,
    /// annotations stay purely inline and receive no card id.
    pub synthesize_annotation_cards: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            synthesize_annotation_cards: true,
        }
    }
}

/// The fully linked forest.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub documents: Vec<Document>,
    pub edges: Vec<CrossReference>,
    pub warnings: Vec<Diagnostic>,
}

/// Resolve a parsed forest. Documents are walked in the order given, and
/// every emitted ordering follows that walk.
pub fn resolve(
    mut documents: Vec<Document>,
    options: &ResolveOptions,
) -> Result<Resolution, ResolveError> {
    let mut table = SymbolTable::new();
    let mut edges = Vec::new();
    let mut warnings = Vec::new();

    // Pass 1a: register every authored topic id before any synthesis, so a
    // synthesized id can never shadow an authored card declared later.
    for document in &documents {
        for card in document.iter_cards() {
            register(&mut table, &card.topic_id, &document.file_id, card, false)?;
        }
    }

    // Pass 1b: promote annotations to cards, archive by archive. The card
    // count is snapshotted so freshly appended cards are not re-walked.
    if options.synthesize_annotation_cards {
        for document in &mut documents {
            let file_id = document.file_id.clone();
            for archive in &mut document.archives {
                let authored = archive.cards.len();
                let mut synthesized = Vec::new();
                for index in 0..authored {
                    let host = archive.cards[index].topic_id.clone();
                    for section in &mut archive.cards[index].sections {
                        for element in &mut section.body {
                            if let InlineElement::Annotation {
                                surface,
                                body,
                                card_id,
                                location,
                            } = element
                            {
                                let id = free_topic_id(&table, &slugify(surface)).ok_or_else(
                                    || ResolveError::TopicIdCollisionDuringSynthesis {
                                        slug: slugify(surface),
                                        file_id: file_id.clone(),
                                        location: location.clone(),
                                    },
                                )?;
                                insert_synthesized(&mut table, &id, &file_id, location.clone())?;
                                *card_id = Some(id.clone());
                                edges.push(CrossReference {
                                    from: id.clone(),
                                    to: host.clone(),
                                    kind: EdgeKind::AnnotationBacklink,
                                });
                                synthesized.push(synthesize_card(
                                    &id,
                                    &host,
                                    surface,
                                    body,
                                    location.clone(),
                                ));
                            }
                        }
                    }
                }
                archive.cards.extend(synthesized);
            }
        }
    }

    // Pass 2: resolve link-tag targets. Backlink targets were written
    // resolved at synthesis time and are skipped here.
    for document in &mut documents {
        let file_id = document.file_id.clone();
        for archive in &mut document.archives {
            for card in &mut archive.cards {
                let from = card.topic_id.clone();
                for tag in &mut card.tags {
                    if let TagKind::Link { targets, .. } = &mut tag.kind {
                        for target in targets.iter_mut() {
                            if target.resolved.is_some() {
                                continue;
                            }
                            if table.contains(&target.name) {
                                target.resolved = Some(target.name.clone());
                                edges.push(CrossReference {
                                    from: from.clone(),
                                    to: target.name.clone(),
                                    kind: EdgeKind::Link,
                                });
                            } else {
                                warnings.push(Diagnostic::warning(
                                    "dangling-link-target",
                                    format!(
                                        "card '{}' links to unknown topic '#{}'",
                                        from, target.name
                                    ),
                                    &file_id,
                                    tag.location.start,
                                ));
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(Resolution {
        documents,
        edges,
        warnings,
    })
}

fn register(
    table: &mut SymbolTable,
    topic_id: &str,
    file_id: &str,
    card: &Card,
    synthesized: bool,
) -> Result<(), ResolveError> {
    let entry = SymbolEntry {
        file_id: file_id.to_string(),
        location: card.location.clone(),
        synthesized,
    };
    table
        .insert(topic_id, entry)
        .map_err(|existing| ResolveError::DuplicateTopicId {
            topic: topic_id.to_string(),
            first_file: existing.file_id,
            first: existing.location,
            second_file: file_id.to_string(),
            second: card.location.clone(),
        })
}

/// First free id among `base`, `base-2`, `base-3`, ...
fn free_topic_id(table: &SymbolTable, base: &str) -> Option<String> {
    if !table.contains(base) {
        return Some(base.to_string());
    }
    (2..MAX_SLUG_SUFFIX)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !table.contains(candidate))
}

fn synthesize_card(id: &str, host: &str, surface: &str, body: &str, location: Range) -> Card {
    let backlink = Tag::link(
        BACKLINK_SYMBOL,
        vec![LinkTarget::resolved(host, host)],
        Some(BACKLINK_LABEL.to_string()),
    )
    .at(location.clone());

    let mut card = Card::new(id).at(location.clone());
    card.origin = CardOrigin::Synthesized {
        host: host.to_string(),
    };
    card.tags.push(backlink);
    card.sections = vec![
        section_with_text("Content", surface, &location),
        section_with_text("Annotation", body, &location),
        section_with_text("Source", &format!("From card '{}'", host), &location),
    ];
    card
}

fn section_with_text(name: &str, text: &str, location: &Range) -> Section {
    let mut section = Section::new(name).at(location.clone());
    section.body.push(InlineElement::text(text));
    section
}

/// Synthesis-time insert. The id was just checked free, so a collision here
/// means the free-id probe and the table disagree.
fn insert_synthesized(
    table: &mut SymbolTable,
    id: &str,
    file_id: &str,
    location: Range,
) -> Result<(), ResolveError> {
    let entry = SymbolEntry {
        file_id: file_id.to_string(),
        location: location.clone(),
        synthesized: true,
    };
    table
        .insert(id, entry)
        .map_err(|_| ResolveError::TopicIdCollisionDuringSynthesis {
            slug: id.to_string(),
            file_id: file_id.to_string(),
            location,
        })
}
