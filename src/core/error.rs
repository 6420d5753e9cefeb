use thiserror::Error;

/// Errors raised before any scoring begins
///
/// Scoring and assignment themselves are total over normalized input and never fail.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{dataset} dataset is missing required column '{field}'")]
    MissingField { dataset: &'static str, field: &'static str },

    #[error("{dataset} dataset row {row} has no name")]
    MissingName { dataset: &'static str, row: usize },

    #[error("{dataset} dataset contains '{name}' more than once")]
    DuplicateIdentity { dataset: &'static str, name: String },

    #[error("Invalid priority order: {0}")]
    InvalidPriorityOrder(String),

    #[error("Threshold {0} is outside the 0-100 range")]
    ThresholdOutOfRange(u8),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
}

impl MatchError {
    /// Stable machine-readable kind for API responses
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::MissingField { .. } => "missing_field",
            MatchError::MissingName { .. } => "missing_name",
            MatchError::DuplicateIdentity { .. } => "duplicate_identity",
            MatchError::InvalidPriorityOrder(_) => "invalid_priority_order",
            MatchError::ThresholdOutOfRange(_) => "threshold_out_of_range",
            MatchError::UnknownOption(_) => "unknown_option",
            MatchError::Csv(_) => "invalid_csv",
            MatchError::InvalidDataset(_) => "invalid_dataset",
        }
    }
}
