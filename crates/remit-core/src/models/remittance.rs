//! Remittance input and result records.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One PDF to process, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// File name reported back in the result.
    pub filename: String,
    /// Raw PDF bytes.
    pub bytes: Vec<u8>,
    /// Payer label, copied verbatim into the result.
    pub insurance_name: String,
}

impl RawDocument {
    pub fn new(
        filename: impl Into<String>,
        bytes: Vec<u8>,
        insurance_name: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            insurance_name: insurance_name.into(),
        }
    }

    /// Read a document from disk, using the final path component as its file name.
    pub fn from_path(path: &Path, insurance_name: impl Into<String>) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(filename, bytes, insurance_name))
    }
}

/// Export column names, in order.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "File Name",
    "Insurance Name",
    "Practice Name",
    "Check #",
    "Check Date",
    "Claim Count",
    "Line Count",
    "Check Amount",
];

/// The exported remittance record.
///
/// Field names and their order form the export contract shared by the
/// JSON and CSV writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "File Name")]
    pub file_name: String,

    #[serde(rename = "Insurance Name")]
    pub insurance_name: String,

    /// Empty when no practice-name line was found.
    #[serde(rename = "Practice Name")]
    pub practice_name: String,

    /// Trace number; empty when absent.
    #[serde(rename = "Check #")]
    pub check_number: String,

    /// Printed date as it appears in the text, not validated.
    #[serde(rename = "Check Date")]
    pub check_date: String,

    #[serde(rename = "Claim Count")]
    pub claim_count: u32,

    /// Page count of the document.
    #[serde(rename = "Line Count")]
    pub page_count: u64,

    /// Trace amount at two decimal places; serialized as `""` when absent.
    #[serde(rename = "Check Amount", with = "check_amount")]
    pub check_amount: Option<Decimal>,
}

impl ExtractionResult {
    /// Check amount as exported: two fraction digits, or empty.
    pub fn check_amount_text(&self) -> String {
        check_amount::format(self.check_amount)
    }
}

mod check_amount {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(amount: Option<Decimal>) -> String {
        amount
            .map(|a| format!("{:.2}", a.round_dp(2)))
            .unwrap_or_default()
    }

    pub fn serialize<S: Serializer>(amount: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*amount))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Decimal::from_str(trimmed)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
