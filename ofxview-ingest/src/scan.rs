//! Tag-level scanning over OFX 1.x (SGML-like) text.
//!
//! OFX 1.x leaves most leaf elements unclosed (`<NAME>Coffee` followed by a newline),
//! so a value is everything after the opening tag up to the next `<`. Aggregates
//! such as `<STMTTRN>` are always closed and are pulled out whole.
//! All matching is ASCII case-insensitive.

use regex::Regex;

// Rules are built once into static tables from fixed tag names; the escaped
// patterns always compile.
fn value_pattern(tag: &str) -> Regex {
    Regex::new(&format!(r"(?i)<{}>([^<]+)", regex::escape(tag))).expect("escaped tag pattern")
}

/// Yields the `<TAG>...</TAG>` blocks of one aggregate, in document order.
#[derive(Debug, Clone)]
pub struct Segmenter {
    pattern: Regex,
}

impl Segmenter {
    pub fn new(tag: &str) -> Self {
        let tag = regex::escape(tag);
        let pattern =
            Regex::new(&format!(r"(?is)<{tag}>.*?</{tag}>")).expect("escaped segment pattern");
        Self { pattern }
    }

    /// Non-overlapping segments, each including its delimiter tags. Line breaks
    /// inside a segment are ordinary content.
    pub fn segments<'t>(&'t self, content: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.pattern.find_iter(content).map(|m| m.as_str())
    }
}

/// Compiled lookup for one leaf tag.
#[derive(Debug, Clone)]
pub struct TagRule {
    pattern: Regex,
}

impl TagRule {
    pub fn new(tag: &str) -> Self {
        Self {
            pattern: value_pattern(tag),
        }
    }

    /// Value of the first occurrence, trimmed. A whitespace-only first value means
    /// the tag is absent; later occurrences are not consulted.
    pub fn first<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
    }

    /// Every value of the tag in document order, trimmed.
    pub fn all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
            .collect()
    }
}

/// Case-insensitive check for an opening `<TAG>` anywhere in the text.
pub fn contains_tag(text: &str, tag: &str) -> bool {
    let needle = format!("<{tag}>");
    text.as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_span_lines_and_ignore_case() {
        let text = "<BANKTRANLIST>\n<STMTTRN>\n<TRNAMT>1\n</STMTTRN>\n<stmttrn><trnamt>2</stmttrn>";
        let seg = Segmenter::new("STMTTRN");
        let found: Vec<_> = seg.segments(text).collect();
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("<TRNAMT>1\n"));
        assert!(found[1].starts_with("<stmttrn>"));
    }

    #[test]
    fn test_segments_are_lazy_and_non_overlapping() {
        let text = "<STMTTRN>a</STMTTRN><STMTTRN>b</STMTTRN><STMTTRN>c";
        let seg = Segmenter::new("STMTTRN");
        let mut it = seg.segments(text);
        assert_eq!(it.next(), Some("<STMTTRN>a</STMTTRN>"));
        assert_eq!(it.next(), Some("<STMTTRN>b</STMTTRN>"));
        // Unterminated trailing block is not a segment.
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_first_value_handles_closed_and_unclosed_tags() {
        let rule = TagRule::new("ACCTID");
        assert_eq!(rule.first("<ACCTID>1234</ACCTID>"), Some("1234"));
        assert_eq!(rule.first("<acctid> 99 \n<ACCTTYPE>X"), Some("99"));
        assert_eq!(rule.first("<ACCTTYPE>CHECKING"), None);
    }

    #[test]
    fn test_blank_first_value_is_absent() {
        let rule = TagRule::new("NAME");
        assert_eq!(rule.first("<NAME>  \n<NAME>Coffee"), None);
        assert_eq!(rule.first("<NAME>Tea<NAME>Coffee"), Some("Tea"));
    }

    #[test]
    fn test_all_values_in_order() {
        let rule = TagRule::new("ACCTID");
        let text = "<ACCTID>first<ACCTID>second</ACCTID>";
        assert_eq!(rule.all(text), vec!["first", "second"]);
    }

    #[test]
    fn test_contains_tag_any_case() {
        assert!(contains_tag("header\n<OFX>\n", "OFX"));
        assert!(contains_tag("<ofx>", "OFX"));
        assert!(contains_tag("<Ofx>", "OFX"));
        assert!(!contains_tag("<OFXHEADER>", "OFX"));
        assert!(!contains_tag("", "OFX"));
    }
}
