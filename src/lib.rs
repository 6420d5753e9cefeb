//! Mentor match - one-to-one pairing of mentors and mentees
//!
//! Both populations arrive as tabular records. Every mentor/mentee pair is scored under a
//! scoring policy, and the resulting matrix is turned into a one-to-one assignment either
//! greedily or with the Hungarian algorithm. Results carry per-criterion breakdowns and
//! can be exported as CSV.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    assign, build_matrix, normalize_list, normalize_text, score, MatchError, Matcher, ScoreMatrix, Similarity, Table,
};
pub use models::{MatchConfig, MatchOutcome, Mentee, Mentor, PolicyKind, PriorityOrder, Strategy};
pub use services::export_csv;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = MatchConfig::default();
        let outcome = Matcher::new(config).run(&[], &[]);
        assert!(outcome.records.is_empty());
        assert_eq!(normalize_text("  Data   Science "), "data science");
    }
}
