//! Forest-to-HTML rendering
//!
//! String-building serializer over the resolved tree. Every piece of user
//! text goes through `html_escape` on the way out; attribute values use the
//! double-quoted-attribute encoder. Output order follows the document walk,
//! so rendering a forest twice yields byte-identical HTML.

use cram_parser::cram::ast::elements::{
    Archive, Card, Document, InlineElement, Section, Tag, TagKind,
};
use cram_parser::cram::compile::ResolvedForest;
use cram_parser::cram::resolving::CrossReference;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Write;

const BASELINE_CSS: &str = include_str!("../css/baseline.css");
const LIGHT_CSS: &str = include_str!("../css/theme-light.css");
const DARK_CSS: &str = include_str!("../css/theme-dark.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn css(self) -> &'static str {
        match self {
            Theme::Light => LIGHT_CSS,
            Theme::Dark => DARK_CSS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            title: "cram deck".to_string(),
        }
    }
}

/// Render a resolved forest into a complete HTML document.
pub fn render_forest(forest: &ResolvedForest, options: &RenderOptions) -> String {
    let backlinks = invert_edges(&forest.edges);

    let mut body = String::new();
    for document in &forest.documents {
        render_document(&mut body, document, &backlinks);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="cram">
  <title>{}</title>
  <style>
{}
{}
  </style>
</head>
<body>
<div class="cram-deck">
{}</div>
</body>
</html>"#,
        encode_text(&options.title),
        BASELINE_CSS,
        options.theme.css(),
        body
    )
}

/// Map each topic id to the ids that reference it, in edge-emission order.
fn invert_edges(edges: &[CrossReference]) -> HashMap<&str, Vec<&str>> {
    let mut inverse: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        inverse.entry(edge.to.as_str()).or_default().push(edge.from.as_str());
    }
    inverse
}

fn render_document(out: &mut String, document: &Document, backlinks: &HashMap<&str, Vec<&str>>) {
    for archive in &document.archives {
        render_archive(out, archive, backlinks);
    }
}

fn render_archive(out: &mut String, archive: &Archive, backlinks: &HashMap<&str, Vec<&str>>) {
    let _ = writeln!(out, r#"<div class="cram-archive">"#);
    let _ = writeln!(out, "<h1>{}</h1>", encode_text(archive.display_name()));
    if !archive.description.is_empty() {
        let _ = writeln!(
            out,
            r#"<p class="cram-archive-description">{}</p>"#,
            encode_text(&archive.description)
        );
    }
    for card in &archive.cards {
        render_card(out, card, backlinks);
    }
    let _ = writeln!(out, "</div>");
}

fn render_card(out: &mut String, card: &Card, backlinks: &HashMap<&str, Vec<&str>>) {
    let class = if card.is_synthesized() {
        "cram-card cram-card-synthesized"
    } else {
        "cram-card"
    };
    let _ = writeln!(
        out,
        r#"<section class="{}" id="card-{}">"#,
        class,
        encode_double_quoted_attribute(&card.topic_id)
    );
    let _ = writeln!(out, "<h2>{}</h2>", encode_text(&card.topic_id));

    if !card.tags.is_empty() {
        let _ = writeln!(out, r#"<div class="cram-tags">"#);
        for tag in &card.tags {
            render_tag(out, tag);
        }
        let _ = writeln!(out, "</div>");
    }

    for section in &card.sections {
        render_section(out, section);
    }

    if let Some(sources) = backlinks.get(card.topic_id.as_str()) {
        let _ = writeln!(out, r#"<div class="cram-backlinks">"#);
        let _ = writeln!(out, "<h4>Referenced by</h4>");
        let _ = writeln!(out, "<ul>");
        for from in sources {
            let _ = writeln!(
                out,
                r##"<li><a href="#card-{}">{}</a></li>"##,
                encode_double_quoted_attribute(from),
                encode_text(from)
            );
        }
        let _ = writeln!(out, "</ul>");
        let _ = writeln!(out, "</div>");
    }

    let _ = writeln!(out, "</section>");
}

fn render_tag(out: &mut String, tag: &Tag) {
    match &tag.kind {
        TagKind::Plain { display } => {
            let _ = writeln!(
                out,
                r#"<span class="cram-tag">{} {}</span>"#,
                encode_text(&tag.symbol.to_string()),
                encode_text(display)
            );
        }
        TagKind::Link { targets, display } => {
            let _ = write!(
                out,
                r#"<span class="cram-tag cram-tag-link">{}"#,
                encode_text(&tag.symbol.to_string())
            );
            for target in targets {
                match &target.resolved {
                    Some(topic_id) => {
                        let _ = write!(
                            out,
                            r##" <a href="#card-{}">#{}</a>"##,
                            encode_double_quoted_attribute(topic_id),
                            encode_text(&target.name)
                        );
                    }
                    None => {
                        let _ = write!(
                            out,
                            r#" <span class="cram-dangling">#{}</span>"#,
                            encode_text(&target.name)
                        );
                    }
                }
            }
            if let Some(text) = display {
                let _ = write!(out, " {}", encode_text(text));
            }
            let _ = writeln!(out, "</span>");
        }
    }
}

fn render_section(out: &mut String, section: &Section) {
    let _ = writeln!(out, r#"<div class="cram-section">"#);
    let _ = writeln!(out, "<h3>{}</h3>", encode_text(&section.name));

    // Consecutive inline elements share one paragraph; a code block closes
    // the open paragraph and stands alone.
    let mut paragraph = String::new();
    for element in &section.body {
        match element {
            InlineElement::CodeBlock { language, lines } => {
                flush_paragraph(out, &mut paragraph);
                let _ = writeln!(
                    out,
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    encode_double_quoted_attribute(language),
                    encode_text(&lines.join("\n"))
                );
            }
            inline => render_inline(&mut paragraph, inline),
        }
    }
    flush_paragraph(out, &mut paragraph);
    let _ = writeln!(out, "</div>");
}

fn flush_paragraph(out: &mut String, paragraph: &mut String) {
    if !paragraph.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", paragraph.trim());
        paragraph.clear();
    }
}

fn render_inline(out: &mut String, element: &InlineElement) {
    match element {
        InlineElement::TextRun { text } => {
            let _ = write!(out, "{} ", encode_text(text));
        }
        InlineElement::InlineExplanation { text, explanation } => {
            let _ = write!(
                out,
                r#"{} <span class="cram-explanation">{}</span> "#,
                encode_text(text),
                encode_text(explanation)
            );
        }
        InlineElement::Annotation {
            surface,
            body,
            card_id,
            ..
        } => match card_id {
            Some(id) => {
                let _ = write!(
                    out,
                    r##"<a class="cram-annotation" href="#card-{}">{}<span class="cram-tooltip">{}</span></a> "##,
                    encode_double_quoted_attribute(id),
                    encode_text(surface),
                    encode_text(body)
                );
            }
            None => {
                let _ = write!(
                    out,
                    r#"<span class="cram-annotation">{}<span class="cram-tooltip">{}</span></span> "#,
                    encode_text(surface),
                    encode_text(body)
                );
            }
        },
        InlineElement::CodeBlock { .. } => {}
    }
}
