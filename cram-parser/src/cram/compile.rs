//! Compilation driver
//!
//!     sources ──lex──► tokens ──parse──► trees ──resolve──► forest
//!
//! Stage barriers are strict: every file is lexed and parsed before any
//! resolution starts, so forward and cross-file references need no
//! declaration order. A lex or parse failure is fatal for its own file
//! only; the remaining files still go through the full pipeline. A
//! resolution failure is global and leaves the forest empty.
//!
//! The returned diagnostics are the complete report for the run, sorted by
//! (severity, file, line, column) with errors first.

use crate::cram::ast::diagnostics::{sort_diagnostics, Diagnostic};
use crate::cram::ast::elements::Document;
use crate::cram::ast::error::{LexError, ParseError, ParseErrorKind};
use crate::cram::lexing::{tokenize, LexOptions};
use crate::cram::parsing::parse;
use crate::cram::resolving::{resolve, CrossReference, ResolveError, ResolveOptions};
use serde::Serialize;

/// One input file: a stable identifier (usually the path) plus its text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Accept the bare `/+` card closer (with a warning).
    pub lenient_card_close: bool,
    /// Promote inline annotations to synthesized cards.
    pub synthesize_annotation_cards: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            lenient_card_close: true,
            synthesize_annotation_cards: true,
        }
    }
}

/// The resolved documents plus the cross-reference edge set, both in
/// deterministic input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedForest {
    pub documents: Vec<Document>,
    pub edges: Vec<CrossReference>,
}

impl ResolvedForest {
    /// Canonical JSON rendering, used by machine consumers of the compiler.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub forest: ResolvedForest,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Compile a set of sources with default options.
pub fn compile_sources(sources: Vec<SourceFile>) -> CompileOutput {
    compile_sources_with(sources, &CompileOptions::default())
}

/// Compile a set of sources. Infallible at the signature level: every
/// failure mode becomes a diagnostic in the output.
pub fn compile_sources_with(sources: Vec<SourceFile>, options: &CompileOptions) -> CompileOutput {
    let mut diagnostics = Vec::new();
    let mut documents: Vec<Document> = Vec::new();

    let lex_options = LexOptions {
        lenient_card_close: options.lenient_card_close,
    };

    for source in &sources {
        let tokens = match tokenize(&source.text, &lex_options) {
            Ok(tokens) => tokens,
            Err(err) => {
                diagnostics.push(lex_diagnostic(&err, &source.id));
                continue;
            }
        };
        match parse(&tokens, &source.id) {
            Ok(outcome) => {
                diagnostics.extend(outcome.warnings);
                documents.push(outcome.document);
            }
            Err(err) => diagnostics.push(parse_diagnostic(&err, &source.id)),
        }
    }

    let resolve_options = ResolveOptions {
        synthesize_annotation_cards: options.synthesize_annotation_cards,
    };
    let forest = match resolve(documents, &resolve_options) {
        Ok(resolution) => {
            diagnostics.extend(resolution.warnings);
            ResolvedForest {
                documents: resolution.documents,
                edges: resolution.edges,
            }
        }
        Err(err) => {
            diagnostics.push(resolve_diagnostic(&err));
            ResolvedForest::default()
        }
    };

    sort_diagnostics(&mut diagnostics);
    CompileOutput { forest, diagnostics }
}

fn lex_diagnostic(err: &LexError, file_id: &str) -> Diagnostic {
    let code = match err {
        LexError::UnterminatedAnnotation { .. } => "unterminated-annotation",
        LexError::UnterminatedCodeFence { .. } => "unterminated-code-fence",
        LexError::UnterminatedTag { .. } => "unterminated-tag",
    };
    Diagnostic::error(code, err.to_string(), file_id, err.location().start)
}

fn parse_diagnostic(err: &ParseError, file_id: &str) -> Diagnostic {
    let code = match &err.kind {
        ParseErrorKind::UnexpectedToken { .. } => "unexpected-token",
        ParseErrorKind::UnclosedCard { .. } => "unclosed-card",
        ParseErrorKind::UnclosedArchive { .. } => "unclosed-archive",
        ParseErrorKind::SectionOutsideCard { .. } => "section-outside-card",
        ParseErrorKind::DuplicateTagSymbolInCard { .. } => "duplicate-tag-symbol",
    };
    Diagnostic::error(code, err.to_string(), file_id, err.location.start)
}

fn resolve_diagnostic(err: &ResolveError) -> Diagnostic {
    match err {
        ResolveError::DuplicateTopicId {
            second_file,
            second,
            ..
        } => Diagnostic::error("duplicate-topic-id", err.to_string(), second_file, second.start),
        ResolveError::TopicIdCollisionDuringSynthesis {
            file_id, location, ..
        } => Diagnostic::error("synthesis-collision", err.to_string(), file_id, location.start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cram::ast::diagnostics::Severity;

    #[test]
    fn test_bad_file_does_not_stop_the_others() {
        let output = compile_sources(vec![
            SourceFile::new("bad.cram", "---Loose\n"),
            SourceFile::new("good.cram", "<+alpha\n---Def\nok\n/+>\n"),
        ]);
        assert_eq!(output.forest.documents.len(), 1);
        assert_eq!(output.forest.documents[0].file_id, "good.cram");
        assert!(output.has_errors());
        assert_eq!(output.diagnostics[0].code, "section-outside-card");
    }

    #[test]
    fn test_duplicate_topic_id_empties_the_forest() {
        let output = compile_sources(vec![
            SourceFile::new("a.cram", "<+dup\n/+>\n"),
            SourceFile::new("b.cram", "<+dup\n/+>\n"),
        ]);
        assert!(output.forest.documents.is_empty());
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].code, "duplicate-topic-id");
        let message = &output.diagnostics[0].message;
        assert!(message.contains("a.cram"));
        assert!(message.contains("b.cram"));
    }

    #[test]
    fn test_diagnostics_sorted_errors_first() {
        let output = compile_sources(vec![
            SourceFile::new("a.cram", "<+alpha\n(>: #missing)\n---Def\nx\n/+\n"),
            SourceFile::new("bad.cram", "<+open\n"),
        ]);
        assert!(output.diagnostics.len() >= 3);
        assert_eq!(output.diagnostics[0].severity, Severity::Error);
        let first_warning = output
            .diagnostics
            .iter()
            .position(|d| d.severity == Severity::Warning)
            .unwrap();
        assert!(output.diagnostics[first_warning..]
            .iter()
            .all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn test_empty_input_compiles_clean() {
        let output = compile_sources(Vec::new());
        assert!(output.forest.documents.is_empty());
        assert!(output.diagnostics.is_empty());
        assert!(!output.has_errors());
    }
}
