use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::MatchError;
use crate::core::normalize::{normalize_list, normalize_text};
use crate::core::similarity::Similarity;

/// Mentor row as read from a dataset, before normalization
#[derive(Debug, Clone, Default)]
pub struct RawMentor {
    pub name: String,
    pub department: String,
    pub company_category: String,
    pub industry_experience: String,
    pub job_role: String,
    pub interests: String,
    pub keywords: String,
}

/// Mentee row as read from a dataset, before normalization
#[derive(Debug, Clone, Default)]
pub struct RawMentee {
    pub name: String,
    pub department: String,
    /// 1st, 2nd and 3rd choice of industry
    pub industry_choices: [String; 3],
    pub job_role: String,
    pub interests: String,
    pub keywords: String,
}

/// Normalized mentor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mentor {
    pub name: String,
    pub department: String,
    /// Single company/industry category token
    #[serde(rename = "companyCategory")]
    pub company_category: String,
    /// Category tokens followed by industry-experience tokens
    pub industries: Vec<String>,
    pub role: String,
    pub interests: Vec<String>,
    pub keywords: Vec<String>,
    /// Whole keyword cell, used for catalogue topic detection
    #[serde(skip)]
    pub keyword_text: String,
}

/// Normalized mentee
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mentee {
    pub name: String,
    pub department: String,
    /// Ranked industry preferences; empty string for an unspecified slot
    #[serde(rename = "industryPrefs")]
    pub industry_prefs: [String; 3],
    pub role: String,
    pub interests: Vec<String>,
    pub keywords: Vec<String>,
    #[serde(skip)]
    pub keyword_text: String,
}

impl RawMentor {
    pub fn normalize(&self) -> Mentor {
        let mut industries = normalize_list(&self.company_category);
        for token in normalize_list(&self.industry_experience) {
            if !industries.contains(&token) {
                industries.push(token);
            }
        }

        Mentor {
            name: self.name.trim().to_string(),
            department: normalize_text(&self.department),
            company_category: normalize_text(&self.company_category),
            industries,
            role: normalize_text(&self.job_role),
            interests: normalize_list(&self.interests),
            keywords: normalize_list(&self.keywords),
            keyword_text: normalize_text(&self.keywords),
        }
    }
}

impl RawMentee {
    pub fn normalize(&self) -> Mentee {
        Mentee {
            name: self.name.trim().to_string(),
            department: normalize_text(&self.department),
            industry_prefs: [
                normalize_text(&self.industry_choices[0]),
                normalize_text(&self.industry_choices[1]),
                normalize_text(&self.industry_choices[2]),
            ],
            role: normalize_text(&self.job_role),
            interests: normalize_list(&self.interests),
            keywords: normalize_list(&self.keywords),
            keyword_text: normalize_text(&self.keywords),
        }
    }
}

/// Weighted comparison dimension of priority-weighted scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Industry,
    Role,
    Interest,
    Keyword,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Industry, Axis::Role, Axis::Interest, Axis::Keyword];

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Industry => "industry",
            Axis::Role => "role",
            Axis::Interest => "interest",
            Axis::Keyword => "keyword",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_text(s).as_str() {
            "industry" => Ok(Axis::Industry),
            "role" => Ok(Axis::Role),
            "interest" => Ok(Axis::Interest),
            "keyword" => Ok(Axis::Keyword),
            other => Err(MatchError::InvalidPriorityOrder(format!(
                "unknown axis '{}', expected one of industry, role, interest, keyword",
                other
            ))),
        }
    }
}

/// Ranking of the four axes, highest priority first
///
/// Rank position maps to a weight multiplier: 4, 3, 2, 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PriorityOrder([Axis; 4]);

impl PriorityOrder {
    /// Accepts exactly the four axes, each once
    pub fn new(axes: &[Axis]) -> Result<Self, MatchError> {
        if axes.len() != Axis::ALL.len() {
            return Err(MatchError::InvalidPriorityOrder(format!(
                "expected 4 axes, got {}",
                axes.len()
            )));
        }

        for axis in Axis::ALL {
            if !axes.contains(&axis) {
                return Err(MatchError::InvalidPriorityOrder(format!(
                    "axis '{}' is missing or another axis is repeated",
                    axis
                )));
            }
        }

        Ok(Self([axes[0], axes[1], axes[2], axes[3]]))
    }

    pub fn parse<S: AsRef<str>>(labels: &[S]) -> Result<Self, MatchError> {
        let axes = labels
            .iter()
            .map(|l| l.as_ref().parse::<Axis>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&axes)
    }

    pub fn axes(&self) -> &[Axis; 4] {
        &self.0
    }

    /// Weight multiplier for an axis
    pub fn weight(&self, axis: Axis) -> f64 {
        let rank = self.0.iter().position(|a| *a == axis).unwrap_or(self.0.len());
        (self.0.len() - rank) as f64
    }
}

impl Default for PriorityOrder {
    fn default() -> Self {
        Self(Axis::ALL)
    }
}

impl FromStr for PriorityOrder {
    type Err = MatchError;

    /// Comma-separated labels, e.g. `role,keyword,industry,interest`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let labels: Vec<&str> = s.split(',').collect();
        Self::parse(&labels)
    }
}

impl TryFrom<Vec<String>> for PriorityOrder {
    type Error = MatchError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(&labels)
    }
}

impl From<PriorityOrder> for Vec<String> {
    fn from(order: PriorityOrder) -> Self {
        order.0.iter().map(|a| a.as_str().to_string()).collect()
    }
}

/// How the score matrix is turned into pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest score first, accepting a pair while both sides are free
    Greedy,
    /// Maximum total score over all one-to-one pairings
    Optimal,
}

impl Strategy {
    /// Scoring policy this strategy is paired with unless overridden
    pub fn default_policy(self) -> PolicyKind {
        match self {
            Strategy::Greedy => PolicyKind::CategoryCatalogue,
            Strategy::Optimal => PolicyKind::PriorityWeighted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Optimal => "optimal",
        }
    }
}

impl FromStr for Strategy {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_text(s).as_str() {
            "greedy" => Ok(Strategy::Greedy),
            "optimal" => Ok(Strategy::Optimal),
            other => Err(MatchError::UnknownOption(format!("strategy '{}'", other))),
        }
    }
}

/// Scoring policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Fixed weights over department, ranked industry, role, interest count and keyword catalogue
    CategoryCatalogue,
    /// Axis weights from a user priority order
    PriorityWeighted,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::CategoryCatalogue => "category_catalogue",
            PolicyKind::PriorityWeighted => "priority_weighted",
        }
    }
}

/// Validated per-request matching configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchConfig {
    threshold: u8,
    #[serde(rename = "priorityOrder")]
    priority_order: PriorityOrder,
    strategy: Strategy,
    policy: PolicyKind,
    similarity: Similarity,
}

impl MatchConfig {
    /// Build a configuration; the policy follows the strategy
    pub fn new(threshold: u8, priority_order: PriorityOrder, strategy: Strategy) -> Result<Self, MatchError> {
        if threshold > 100 {
            return Err(MatchError::ThresholdOutOfRange(threshold));
        }

        Ok(Self {
            threshold,
            priority_order,
            strategy,
            policy: strategy.default_policy(),
            similarity: Similarity::default(),
        })
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_similarity(mut self, similarity: Similarity) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn priority_order(&self) -> &PriorityOrder {
        &self.priority_order
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn similarity(&self) -> Similarity {
        self.similarity
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 80,
            priority_order: PriorityOrder::default(),
            strategy: Strategy::Optimal,
            policy: PolicyKind::PriorityWeighted,
            similarity: Similarity::default(),
        }
    }
}

/// Contribution of one criterion to a pair score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisScore {
    pub points: f64,
    /// What matched: labels, `rank:token` pairs or overlapping tokens
    pub matched: Vec<String>,
}

impl AxisScore {
    pub fn new(points: f64, matched: Vec<String>) -> Self {
        Self { points, matched }
    }

    pub fn is_match(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Total pair score with its per-criterion breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub department: AxisScore,
    pub industry: AxisScore,
    pub role: AxisScore,
    pub interest: AxisScore,
    pub keyword: AxisScore,
}

impl ScoreBreakdown {
    pub fn from_parts(
        department: AxisScore,
        industry: AxisScore,
        role: AxisScore,
        interest: AxisScore,
        keyword: AxisScore,
    ) -> Self {
        let total = department.points + industry.points + role.points + interest.points + keyword.points;
        Self {
            total,
            department,
            industry,
            role,
            interest,
            keyword,
        }
    }
}

/// One accepted mentor/mentee pair joined back to identities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub mentee: String,
    pub mentor: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Complete result of one matching request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub records: Vec<MatchRecord>,
    pub total_score: f64,
    pub strategy: Strategy,
    pub policy: PolicyKind,
    pub unmatched_mentors: Vec<String>,
    pub unmatched_mentees: Vec<String>,
}
