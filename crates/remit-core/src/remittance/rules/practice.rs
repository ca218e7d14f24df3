//! Practice name locator.

use super::patterns::ANY_DIGIT;
use super::{FieldLocator, LineMatch};

/// Finds the first all-caps, digit-free, multi-word line.
#[derive(Debug, Clone)]
pub struct PracticeNameLocator {
    min_len: usize,
    min_words: usize,
}

impl PracticeNameLocator {
    pub fn new() -> Self {
        Self {
            min_len: 4,
            min_words: 2,
        }
    }

    /// Set the minimum trimmed character length.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Set the minimum whitespace-separated word count.
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Whether a trimmed line qualifies as a practice name.
    pub fn accepts(&self, trimmed: &str) -> bool {
        trimmed.chars().count() >= self.min_len
            && trimmed.to_uppercase() == trimmed
            && trimmed.chars().any(|c| c.is_ascii_uppercase())
            && !ANY_DIGIT.is_match(trimmed)
            && trimmed.split_whitespace().count() >= self.min_words
    }
}

impl Default for PracticeNameLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldLocator for PracticeNameLocator {
    type Output = String;

    fn locate<S: AsRef<str>>(&self, lines: &[S]) -> Option<LineMatch<String>> {
        lines.iter().enumerate().find_map(|(idx, line)| {
            let trimmed = line.as_ref().trim();
            self.accepts(trimmed)
                .then(|| LineMatch::new(trimmed.to_string(), idx))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_caps_line_wins() {
        let lines = [
            "Explanation of Benefits",
            "  ACME MEDICAL GROUP  ",
            "SECOND PRACTICE NAME",
        ];
        let found = PracticeNameLocator::new().locate(&lines).unwrap();
        assert_eq!(found.value, "ACME MEDICAL GROUP");
        assert_eq!(found.line_index, 1);
    }

    #[test]
    fn test_rejects_near_misses() {
        let locator = PracticeNameLocator::new();
        assert!(!locator.accepts("ACME"));
        assert!(!locator.accepts("ACME 2 GROUP"));
        assert!(!locator.accepts("Acme Medical"));
        assert!(!locator.accepts("A B"));
        assert!(!locator.accepts("-- ** --"));
        assert!(locator.accepts("DR. SMITH & ASSOCIATES"));
    }

    #[test]
    fn test_non_ascii_digit_rejects_line() {
        let lines = ["ACME \u{0663} GROUP", "NORTH SHORE PEDIATRICS"];
        let found = PracticeNameLocator::new().locate(&lines).unwrap();
        assert_eq!(found.value, "NORTH SHORE PEDIATRICS");
    }

    #[test]
    fn test_none_when_no_candidate() {
        let lines = ["lowercase only", "12345 67890"];
        assert_eq!(PracticeNameLocator::new().locate(&lines), None);
    }
}
