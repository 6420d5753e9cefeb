use serde::Serialize;
use std::io::Write;
use thiserror::Error;

use crate::models::responses::round2;
use crate::models::{MatchOutcome, MatchRecord};

/// Errors that can occur while exporting results
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Export column order, matching the field order of [`CsvMatchRow`]
pub const CSV_HEADERS: [&str; 8] = [
    "Mentee",
    "Mentor",
    "Score",
    "Department",
    "Industry_Matches",
    "Role_Match",
    "Interest_Overlap",
    "Keyword_Overlap",
];

/// Flat CSV record for one accepted pair
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CsvMatchRow {
    #[serde(rename = "Mentee")]
    pub mentee: String,
    #[serde(rename = "Mentor")]
    pub mentor: String,
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Industry_Matches")]
    pub industry_matches: String,
    #[serde(rename = "Role_Match")]
    pub role_match: bool,
    #[serde(rename = "Interest_Overlap")]
    pub interest_overlap: String,
    #[serde(rename = "Keyword_Overlap")]
    pub keyword_overlap: String,
}

impl From<&MatchRecord> for CsvMatchRow {
    fn from(record: &MatchRecord) -> Self {
        let b = &record.breakdown;
        Self {
            mentee: record.mentee.clone(),
            mentor: record.mentor.clone(),
            score: round2(record.score),
            department: b.department.matched.join(";"),
            industry_matches: b.industry.matched.join(";"),
            role_match: b.role.is_match(),
            interest_overlap: b.interest.matched.join(";"),
            keyword_overlap: b.keyword.matched.join(";"),
        }
    }
}

/// Write an outcome as CSV, a header and one row per accepted pair
pub fn export_csv<W: Write>(outcome: &MatchOutcome, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for record in &outcome.records {
        wtr.serialize(CsvMatchRow::from(record))?;
    }

    wtr.flush()?;
    Ok(())
}
