//! Keyword highlighting for display text.
//!
//! Builds one combined case-insensitive pattern from the user keywords —
//! escaped, longest keyword first — so overlapping keywords cannot
//! double-wrap and the alternation of literals cannot backtrack.

use regex::{Regex, RegexBuilder};

/// Wraps every case-insensitive keyword occurrence in `<mark>…</mark>`.
/// Compiled once per keyword set; the repository rebuilds it on keyword
/// mutation alongside the processed-job cache.
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(keywords: &[String]) -> Self {
        let mut keywords: Vec<&str> = keywords
            .iter()
            .map(|k| k.as_str())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Self { pattern: None };
        }

        // Longest first: at equal start positions the longer keyword wins,
        // so "UX Designer" is wrapped whole rather than "UX" inside it.
        keywords.sort_by(|a, b| b.len().cmp(&a.len()));

        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()
            .ok();
        if pattern.is_none() {
            tracing::warn!("highlight pattern failed to compile; highlighting disabled");
        }

        Self { pattern }
    }

    /// Returns `text` with every keyword occurrence wrapped, original casing
    /// of the matched substring preserved, non-matching text untouched.
    pub fn apply(&self, text: &str) -> String {
        match &self.pattern {
            Some(re) => re
                .replace_all(text, |caps: &regex::Captures| {
                    format!("<mark>{}</mark>", &caps[0])
                })
                .into_owned(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_wraps_occurrence_preserving_original_casing() {
        let h = Highlighter::new(&kw(&["react"]));
        assert_eq!(
            h.apply("Senior React Developer"),
            "Senior <mark>React</mark> Developer"
        );
    }

    #[test]
    fn test_empty_keyword_set_leaves_text_untouched() {
        let h = Highlighter::new(&[]);
        assert_eq!(h.apply("Senior React Developer"), "Senior React Developer");
    }

    #[test]
    fn test_all_occurrences_wrapped() {
        let h = Highlighter::new(&kw(&["go"]));
        assert_eq!(
            h.apply("Go beyond Django"),
            "<mark>Go</mark> beyond Djan<mark>go</mark>"
        );
    }

    #[test]
    fn test_longer_keyword_is_not_double_wrapped() {
        let h = Highlighter::new(&kw(&["UX", "UX Designer"]));
        assert_eq!(
            h.apply("Hiring a UX Designer now"),
            "Hiring a <mark>UX Designer</mark> now"
        );
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let h = Highlighter::new(&kw(&["C++"]));
        assert_eq!(
            h.apply("Modern C++ codebase"),
            "Modern <mark>C++</mark> codebase"
        );
    }

    #[test]
    fn test_non_matching_text_unchanged() {
        let h = Highlighter::new(&kw(&["Rust"]));
        assert_eq!(h.apply("plain prose"), "plain prose");
    }
}
