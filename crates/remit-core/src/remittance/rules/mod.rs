//! Rule-based heuristics over remittance text lines.
//!
//! Every locator makes a single forward pass and keeps the first acceptable
//! match; later lines never override an earlier hit.

pub mod amounts;
pub mod claims;
pub mod dates;
pub mod markers;
pub mod normalize;
pub mod pages;
pub mod patterns;
pub mod practice;
pub mod trace;

pub use amounts::{
    extract_amount_from_line, extract_long_numeric_token, normalize_numeric_text,
    parse_amount_candidates, AmountCandidate, Reading,
};
pub use claims::{ClaimBlock, ClaimScanner, ClaimSummary};
pub use dates::PrintedDateLocator;
pub use markers::{MarkerSet, MarkerSets};
pub use normalize::{normalize_line, LineNormalizer};
pub use pages::PageCountLocator;
pub use practice::PracticeNameLocator;
pub use trace::{TraceFields, TraceLocator};

/// Trait for single-valued field locators.
pub trait FieldLocator {
    /// The type of value this locator produces.
    type Output;

    /// Locate the field in a normalized line sequence.
    fn locate<S: AsRef<str>>(&self, lines: &[S]) -> Option<LineMatch<Self::Output>>;
}

/// A located value and the index of the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<T> {
    /// Located value.
    pub value: T,
    /// Index into the normalized line sequence.
    pub line_index: usize,
}

impl<T> LineMatch<T> {
    pub fn new(value: T, line_index: usize) -> Self {
        Self { value, line_index }
    }
}
