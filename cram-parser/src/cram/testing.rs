//! Testing utilities
//!
//! Shared builders for composing cram sources in tests. Writing marker
//! syntax by hand across many test files is how small grammar mistakes
//! creep in (a missing `>` on a closer, a tag after a section); the builder
//! produces well-formed source so a failing test points at the code under
//! test, not at the fixture.
//!
//! ```rust-example
//! let source = SourceBuilder::new()
//!     .archive("Vocabulary")
//!     .card("alpha", |card| {
//!         card.tag('!', "core")
//!             .section("Definition", &["first sense", "second sense"])
//!     })
//!     .build();
//! ```

use crate::cram::ast::elements::Document;
use crate::cram::compile::SourceFile;

/// Fluent builder for a single cram source file.
#[derive(Debug, Default)]
pub struct SourceBuilder {
    lines: Vec<String>,
}

/// Builder for the inside of one card, used via [`SourceBuilder::card`].
#[derive(Debug, Default)]
pub struct CardBuilder {
    lines: Vec<String>,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn archive(mut self, name: &str) -> Self {
        self.lines.push(format!("--<{}>--", name));
        self
    }

    pub fn card(mut self, topic: &str, build: impl FnOnce(CardBuilder) -> CardBuilder) -> Self {
        self.lines.push(format!("<+{}", topic));
        let card = build(CardBuilder::default());
        self.lines.extend(card.lines);
        self.lines.push("/+>".to_string());
        self
    }

    /// An arbitrary raw line, for tests that need malformed input.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut source = self.lines.join("\n");
        source.push('\n');
        source
    }

    pub fn into_source_file(self, id: &str) -> SourceFile {
        let text = self.build();
        SourceFile::new(id, &text)
    }
}

impl CardBuilder {
    pub fn tag(mut self, symbol: char, content: &str) -> Self {
        self.lines.push(format!("({}: {})", symbol, content));
        self
    }

    pub fn link_tag(mut self, symbol: char, targets: &[&str], display: Option<&str>) -> Self {
        let mut parts: Vec<String> = targets.iter().map(|t| format!("#{}", t)).collect();
        if let Some(text) = display {
            parts.push(text.to_string());
        }
        self.lines
            .push(format!("({}: {})", symbol, parts.join(", ")));
        self
    }

    pub fn section(mut self, name: &str, body: &[&str]) -> Self {
        self.lines.push(format!("---{}", name));
        for line in body {
            self.lines.push((*line).to_string());
        }
        self
    }
}

/// Topic ids of every card in the document, in document order.
pub fn topic_ids(document: &Document) -> Vec<&str> {
    document
        .iter_cards()
        .map(|card| card.topic_id.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_emits_well_formed_source() {
        let source = SourceBuilder::new()
            .archive("Vocabulary")
            .card("alpha", |card| {
                card.tag('!', "core")
                    .link_tag('>', &["beta"], Some("see also"))
                    .section("Definition", &["first sense"])
            })
            .build();
        assert_eq!(
            source,
            "--<Vocabulary>--\n<+alpha\n(!: core)\n(>: #beta, see also)\n---Definition\nfirst sense\n/+>\n"
        );
    }
}
