//! Text cleanup shared by the extraction strategies.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

// Permissive: an unterminated `<` also eats the rest of the run.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("TAG_RE should compile"));

/// Replace every markup tag with a single space.
pub fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, " ").into_owned()
}

/// Decode named and numeric HTML character references.
///
/// Runs the text through the HTML tokenizer so the full entity table applies.
/// A literal `<` is escaped first so it survives as text.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let fragment = Html::parse_fragment(&s.replace('<', "&lt;"));
    fragment.root_element().text().collect()
}

/// Keep at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// `Some(trimmed)` unless the value is blank.
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_including_unterminated_ones() {
        assert_eq!(strip_tags("<p>Hello</p><br/>world"), " Hello  world");
        assert_eq!(strip_tags("a < b"), "a  ");
    }

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(
            decode_entities("Caf&eacute; &amp; th&#233; &lt;b&gt;"),
            "Café & thé <b>"
        );
        assert_eq!(decode_entities("Mas&nbsp;proven&ccedil;al"), "Mas\u{a0}provençal");
    }

    #[test]
    fn decoding_keeps_literal_angle_brackets() {
        assert_eq!(decode_entities("3 < 4 &amp; 5 > 2"), "3 < 4 & 5 > 2");
        assert_eq!(decode_entities("no entities <here>"), "no entities <here>");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("Château", 3), "Châ");
        assert_eq!(truncate_chars("Gîte", 10), "Gîte");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn blank_values_are_unset() {
        assert_eq!(non_empty("  Villa "), Some("Villa".to_string()));
        assert_eq!(non_empty(" \n\t"), None);
    }
}
