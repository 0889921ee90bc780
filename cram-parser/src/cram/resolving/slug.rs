//! Slugs
//!
//! Topic ids for synthesized cards are derived from the annotation's
//! surface text: lowercase, alphanumeric runs kept, everything else
//! collapsed into single hyphens. The derivation is pure so that the same
//! input always yields the same id regardless of compilation order.

/// Derive a topic id slug from free text.
///
/// An input with no alphanumeric characters at all falls back to
/// `"annotation"` so the id is never empty.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("annotation");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Stay vigilant", "stay-vigilant")]
    #[case("  trims  edges  ", "trims-edges")]
    #[case("Hälfte", "hälfte")]
    #[case("C'est la vie!", "c-est-la-vie")]
    #[case("42nd street", "42nd-street")]
    #[case("---", "annotation")]
    #[case("", "annotation")]
    fn test_slugify(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }
}
