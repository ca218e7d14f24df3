//! PDF text collaborators.
//!
//! The heuristics never look at PDF structure; they only consume the line
//! sequence produced by a [`TextExtractor`]. Two backends are provided:
//! [`PdfExtractBackend`] (primary) and [`LopdfExtractor`] (fallback, also the
//! structural [`PageCounter`]).

mod extractor;
mod text;
mod writer;

pub use extractor::LopdfExtractor;
pub use text::PdfExtractBackend;
pub use writer::write_text_pdf;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Turns PDF bytes into physical text lines, all pages concatenated.
pub trait TextExtractor: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Extract every text line of the document in reading order.
    fn extract_lines(&self, data: &[u8]) -> Result<Vec<String>>;
}

/// Reports the structural page count of a PDF.
pub trait PageCounter: Send + Sync {
    /// Number of pages in the document's page tree.
    fn page_count(&self, data: &[u8]) -> Result<u64>;
}

/// Split extracted text into lines on every universal line boundary.
///
/// Boundaries are `\n`, `\r\n`, `\r`, vertical tab, form feed, the file/group/
/// record separators, NEL, and the Unicode line and paragraph separators.
/// A trailing boundary does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}' => {
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
