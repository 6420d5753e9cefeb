use serde::{Deserialize, Serialize};

use crate::core::catalogue::CataloguePattern;
use crate::models::domain::{MatchConfig, MatchOutcome, MatchRecord, PolicyKind, ScoreBreakdown, Strategy};

/// Round a score for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One result row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
    pub mentee: String,
    pub mentor: String,
    pub score: f64,
    #[serde(rename = "industryMatches")]
    pub industry_matches: Vec<String>,
    #[serde(rename = "roleMatch")]
    pub role_match: bool,
    #[serde(rename = "interestOverlap")]
    pub interest_overlap: Vec<String>,
    #[serde(rename = "keywordOverlap")]
    pub keyword_overlap: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

impl From<&MatchRecord> for MatchRow {
    fn from(record: &MatchRecord) -> Self {
        let b = &record.breakdown;
        Self {
            mentee: record.mentee.clone(),
            mentor: record.mentor.clone(),
            score: round2(record.score),
            industry_matches: b.industry.matched.clone(),
            role_match: b.role.is_match(),
            interest_overlap: b.interest.matched.clone(),
            keyword_overlap: b.keyword.matched.clone(),
            breakdown: b.clone(),
        }
    }
}

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    /// Present this token to the export endpoint to download these results
    #[serde(rename = "exportToken")]
    pub export_token: uuid::Uuid,
    pub strategy: Strategy,
    pub policy: PolicyKind,
    pub config: MatchConfig,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
    pub matches: Vec<MatchRow>,
    #[serde(rename = "unmatchedMentors")]
    pub unmatched_mentors: Vec<String>,
    #[serde(rename = "unmatchedMentees")]
    pub unmatched_mentees: Vec<String>,
}

impl MatchResponse {
    pub fn new(export_token: uuid::Uuid, config: MatchConfig, outcome: &MatchOutcome) -> Self {
        Self {
            export_token,
            strategy: outcome.strategy,
            policy: outcome.policy,
            config,
            total_score: round2(outcome.total_score),
            matches: outcome.records.iter().map(MatchRow::from).collect(),
            unmatched_mentors: outcome.unmatched_mentors.clone(),
            unmatched_mentees: outcome.unmatched_mentees.clone(),
        }
    }
}

/// Catalogue listing entry
#[derive(Debug, Clone, Serialize)]
pub struct CatalogueTopic {
    pub label: String,
    #[serde(flatten)]
    pub pattern: CataloguePattern,
}

impl From<&CataloguePattern> for CatalogueTopic {
    fn from(pattern: &CataloguePattern) -> Self {
        Self {
            label: pattern.label(),
            pattern: *pattern,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
