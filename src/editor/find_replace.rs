//! Find and Replace for Quillpad
//!
//! A single global, case-sensitive, literal replacement across the whole
//! document. There is no regex mode and no incremental search.

use log::debug;

/// Terms entered in the Find and Replace prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindReplace {
    /// Literal text to look for
    pub find: String,
    /// Literal text to put in its place
    pub replace: String,
}

impl FindReplace {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Both terms must be non-empty for the replacement to run.
    pub fn is_actionable(&self) -> bool {
        !self.find.is_empty() && !self.replace.is_empty()
    }

    /// Byte ranges of every non-overlapping match, left to right.
    pub fn find_matches(&self, text: &str) -> Vec<(usize, usize)> {
        if self.find.is_empty() {
            return Vec::new();
        }
        text.match_indices(&self.find)
            .map(|(start, m)| (start, start + m.len()))
            .collect()
    }

    /// Apply the replacement to `text`.
    ///
    /// Returns `None` when the terms are not actionable or nothing matched,
    /// so callers can skip touching the buffer.
    pub fn apply(&self, text: &str) -> Option<String> {
        if !self.is_actionable() {
            debug!("Find/replace skipped: empty term");
            return None;
        }

        let matches = self.find_matches(text);
        if matches.is_empty() {
            debug!("Find/replace: no matches for {:?}", self.find);
            return None;
        }

        let mut new_text = String::with_capacity(text.len());
        let mut last_end = 0;
        for &(start, end) in &matches {
            new_text.push_str(&text[last_end..start]);
            new_text.push_str(&self.replace);
            last_end = end;
        }
        new_text.push_str(&text[last_end..]);

        debug!("Find/replace: replaced {} match(es)", matches.len());
        Some(new_text)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_to_dog() {
        let fr = FindReplace::new("cat", "dog");
        assert_eq!(fr.apply("The cat sat.").as_deref(), Some("The dog sat."));
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let fr = FindReplace::new("a", "o");
        assert_eq!(fr.apply("banana").as_deref(), Some("bonono"));
    }

    #[test]
    fn test_case_sensitive() {
        let fr = FindReplace::new("cat", "dog");
        assert_eq!(
            fr.apply("Cat cat CAT catalog").as_deref(),
            Some("Cat dog CAT dogalog")
        );
    }

    #[test]
    fn test_not_regex() {
        let fr = FindReplace::new("a.c", "X");
        assert_eq!(fr.apply("abc a.c").as_deref(), Some("abc X"));
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        let fr = FindReplace::new("aa", "b");
        assert_eq!(fr.apply("aaa").as_deref(), Some("ba"));
        assert_eq!(fr.find_matches("aaaa"), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_replacement_containing_pattern() {
        let fr = FindReplace::new("x", "xx");
        assert_eq!(fr.apply("x-x").as_deref(), Some("xx-xx"));
    }

    #[test]
    fn test_empty_terms_are_noop() {
        assert!(FindReplace::new("", "dog").apply("The cat sat.").is_none());
        assert!(FindReplace::new("cat", "").apply("The cat sat.").is_none());
        assert!(!FindReplace::default().is_actionable());
    }

    #[test]
    fn test_no_match_is_none() {
        let fr = FindReplace::new("cow", "dog");
        assert!(fr.apply("The cat sat.").is_none());
    }

    #[test]
    fn test_unicode() {
        let fr = FindReplace::new("wörld", "world");
        assert_eq!(fr.apply("héllo wörld").as_deref(), Some("héllo world"));
    }
}
