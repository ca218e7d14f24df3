//! Detection and repair of character-reversed lines.

use super::markers::MarkerSet;
use super::patterns::REVERSAL_MARKERS;

/// Reverses lines that contain a backward-spelled marker word.
///
/// A coincidental marker substring also triggers reversal; there is no
/// secondary check.
#[derive(Debug, Clone)]
pub struct LineNormalizer {
    markers: MarkerSet,
}

impl LineNormalizer {
    pub fn new(markers: MarkerSet) -> Self {
        Self { markers }
    }

    /// True when the line will be reversed.
    pub fn is_reversed(&self, line: &str) -> bool {
        self.markers.matches(line)
    }

    /// Normalize one line.
    pub fn normalize(&self, line: &str) -> String {
        if self.is_reversed(line) {
            line.chars().rev().collect()
        } else {
            line.to_string()
        }
    }

    /// Normalize each line independently, keeping order and length.
    pub fn normalize_all<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines.iter().map(|l| self.normalize(l.as_ref())).collect()
    }
}

impl Default for LineNormalizer {
    fn default() -> Self {
        Self::new(MarkerSet::new(REVERSAL_MARKERS))
    }
}

/// Normalize a line with the default reversal markers.
pub fn normalize_line(line: &str) -> String {
    LineNormalizer::default().normalize(line)
}
