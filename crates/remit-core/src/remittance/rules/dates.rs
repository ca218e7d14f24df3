//! Printed (check) date locator.

use super::markers::MarkerSet;
use super::patterns::{PRINTED_MARKERS, SLASH_DATE};
use super::{FieldLocator, LineMatch};

/// Takes the first slash date on the first printed-marker line that has one.
///
/// The date is returned as written; component ranges are not checked.
#[derive(Debug, Clone)]
pub struct PrintedDateLocator {
    markers: MarkerSet,
}

impl PrintedDateLocator {
    pub fn new(markers: MarkerSet) -> Self {
        Self { markers }
    }
}

impl Default for PrintedDateLocator {
    fn default() -> Self {
        Self::new(MarkerSet::new(PRINTED_MARKERS))
    }
}

impl FieldLocator for PrintedDateLocator {
    type Output = String;

    fn locate<S: AsRef<str>>(&self, lines: &[S]) -> Option<LineMatch<String>> {
        lines.iter().enumerate().find_map(|(idx, line)| {
            let line = line.as_ref();
            if !self.markers.matches(line) {
                return None;
            }
            SLASH_DATE
                .find(line)
                .map(|m| LineMatch::new(m.as_str().to_string(), idx))
        })
    }
}
