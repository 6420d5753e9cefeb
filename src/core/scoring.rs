use crate::core::catalogue::{catalogue, Catalogue};
use crate::core::dataset::{MenteeField, MentorField};
use crate::core::similarity::{exact_eq, Similarity};
use crate::models::{Axis, AxisScore, MatchConfig, Mentee, Mentor, PolicyKind, PriorityOrder, ScoreBreakdown};

/// Points for a shared department (category-and-catalogue scoring)
pub const DEPARTMENT_POINTS: f64 = 8.0;
/// Points for a shared job role (category-and-catalogue scoring)
pub const ROLE_POINTS: f64 = 16.0;
/// Points per industry preference rank (category-and-catalogue scoring)
pub const CATEGORY_INDUSTRY_POINTS: [f64; 3] = [64.0, 32.0, 16.0];
/// Base points per industry preference rank, before the axis weight (priority-weighted scoring)
pub const PRIORITY_INDUSTRY_POINTS: [f64; 3] = [10.0, 6.0, 3.0];

/// A pairwise scoring rule
///
/// Implementations are pure: the same normalized pair always yields the same breakdown.
pub trait ScoringPolicy: Send + Sync {
    fn kind(&self) -> PolicyKind;

    /// Mentor columns this policy reads
    fn mentor_fields(&self) -> &'static [MentorField];

    /// Mentee columns this policy reads
    fn mentee_fields(&self) -> &'static [MenteeField];

    /// Total score with the per-criterion breakdown
    fn breakdown(&self, mentor: &Mentor, mentee: &Mentee) -> ScoreBreakdown;

    fn score(&self, mentor: &Mentor, mentee: &Mentee) -> f64 {
        self.breakdown(mentor, mentee).total
    }
}

/// Build the scoring policy a configuration selects
pub fn policy_for(config: &MatchConfig) -> Box<dyn ScoringPolicy> {
    match config.policy() {
        PolicyKind::CategoryCatalogue => Box::new(CategoryCataloguePolicy::new()),
        PolicyKind::PriorityWeighted => Box::new(PriorityWeightedPolicy::new(
            *config.priority_order(),
            config.threshold(),
            config.similarity(),
        )),
    }
}

/// Score one mentor/mentee pair under a configuration
pub fn score(mentor: &Mentor, mentee: &Mentee, config: &MatchConfig) -> ScoreBreakdown {
    policy_for(config).breakdown(mentor, mentee)
}

/// Fixed-weight scoring over department, ranked industry, role, interest overlap and
/// the keyword catalogue
pub struct CategoryCataloguePolicy {
    catalogue: &'static Catalogue,
}

impl CategoryCataloguePolicy {
    pub fn new() -> Self {
        Self { catalogue: catalogue() }
    }
}

impl Default for CategoryCataloguePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringPolicy for CategoryCataloguePolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::CategoryCatalogue
    }

    fn mentor_fields(&self) -> &'static [MentorField] {
        &[
            MentorField::Name,
            MentorField::Department,
            MentorField::CompanyCategory,
            MentorField::JobRole,
            MentorField::Interests,
            MentorField::Keywords,
        ]
    }

    fn mentee_fields(&self) -> &'static [MenteeField] {
        &[
            MenteeField::Name,
            MenteeField::Department,
            MenteeField::FirstChoice,
            MenteeField::SecondChoice,
            MenteeField::ThirdChoice,
            MenteeField::JobRole,
            MenteeField::Interests,
            MenteeField::Keywords,
        ]
    }

    fn breakdown(&self, mentor: &Mentor, mentee: &Mentee) -> ScoreBreakdown {
        let department = if exact_eq(&mentee.department, &mentor.department) {
            AxisScore::new(DEPARTMENT_POINTS, vec![mentor.department.clone()])
        } else {
            AxisScore::default()
        };

        let industry_matches =
            ranked_industry_matches(&mentee.industry_prefs, std::slice::from_ref(&mentor.company_category));
        let industry = industry_score(&industry_matches, |rank| CATEGORY_INDUSTRY_POINTS[rank - 1]);

        let role = if exact_eq(&mentee.role, &mentor.role) {
            AxisScore::new(ROLE_POINTS, vec![mentor.role.clone()])
        } else {
            AxisScore::default()
        };

        let shared_interests = shared_tokens(&mentee.interests, &mentor.interests);
        let interest = AxisScore::new(shared_interests.len() as f64, shared_interests);

        let topics = self.catalogue.shared_topics(&mentor.keyword_text, &mentee.keyword_text);
        let keyword = AxisScore::new(
            topics.iter().map(|t| t.points).sum(),
            topics.iter().map(|t| t.label()).collect(),
        );

        ScoreBreakdown::from_parts(department, industry, role, interest, keyword)
    }
}

/// Axis-weighted scoring driven by a user priority order
pub struct PriorityWeightedPolicy {
    priorities: PriorityOrder,
    threshold: u8,
    similarity: Similarity,
}

impl PriorityWeightedPolicy {
    pub fn new(priorities: PriorityOrder, threshold: u8, similarity: Similarity) -> Self {
        Self {
            priorities,
            threshold,
            similarity,
        }
    }
}

impl ScoringPolicy for PriorityWeightedPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::PriorityWeighted
    }

    fn mentor_fields(&self) -> &'static [MentorField] {
        &[
            MentorField::Name,
            MentorField::CompanyCategory,
            MentorField::IndustryExperience,
            MentorField::JobRole,
            MentorField::Interests,
            MentorField::Keywords,
        ]
    }

    fn mentee_fields(&self) -> &'static [MenteeField] {
        &[
            MenteeField::Name,
            MenteeField::FirstChoice,
            MenteeField::SecondChoice,
            MenteeField::ThirdChoice,
            MenteeField::JobRole,
            MenteeField::Interests,
            MenteeField::Keywords,
        ]
    }

    fn breakdown(&self, mentor: &Mentor, mentee: &Mentee) -> ScoreBreakdown {
        let industry_weight = self.priorities.weight(Axis::Industry);
        let industry_matches = ranked_industry_matches(&mentee.industry_prefs, &mentor.industries);
        let industry = industry_score(&industry_matches, |rank| {
            PRIORITY_INDUSTRY_POINTS[rank - 1] * industry_weight
        });

        let role = if self.similarity.fuzzy_eq(&mentee.role, &mentor.role, self.threshold) {
            AxisScore::new(self.priorities.weight(Axis::Role), vec![mentor.role.clone()])
        } else {
            AxisScore::default()
        };

        let shared_interests = shared_tokens(&mentee.interests, &mentor.interests);
        let interest = if shared_interests.is_empty() {
            AxisScore::default()
        } else {
            AxisScore::new(self.priorities.weight(Axis::Interest), shared_interests)
        };

        let shared_keywords = shared_tokens(&mentee.keywords, &mentor.keywords);
        let keyword = AxisScore::new(
            self.priorities.weight(Axis::Keyword) * shared_keywords.len() as f64,
            shared_keywords,
        );

        ScoreBreakdown::from_parts(AxisScore::default(), industry, role, interest, keyword)
    }
}

/// Match each ranked preference against the mentor's industry tokens
///
/// The first equal mentor token wins for a rank. A token already credited to a higher rank
/// is not credited again, so one mentor industry scores at most once per pair.
/// Returns `(rank, token)` with ranks starting at 1.
pub fn ranked_industry_matches<'a>(prefs: &[String; 3], industries: &'a [String]) -> Vec<(usize, &'a str)> {
    let mut matches: Vec<(usize, &'a str)> = Vec::new();

    for (idx, pref) in prefs.iter().enumerate() {
        let Some(token) = industries.iter().find(|ind| exact_eq(pref, ind)) else {
            continue;
        };
        if matches.iter().any(|(_, seen)| *seen == token.as_str()) {
            continue;
        }
        matches.push((idx + 1, token.as_str()));
    }

    matches
}

fn industry_score(matches: &[(usize, &str)], points: impl Fn(usize) -> f64) -> AxisScore {
    AxisScore::new(
        matches.iter().map(|(rank, _)| points(*rank)).sum(),
        matches.iter().map(|(rank, token)| format!("{}:{}", rank, token)).collect(),
    )
}

/// Tokens present in both lists, in the mentee's order, each reported once
pub fn shared_tokens(mentee_tokens: &[String], mentor_tokens: &[String]) -> Vec<String> {
    let mut shared: Vec<String> = Vec::new();

    for token in mentee_tokens {
        if token.is_empty() || shared.contains(token) {
            continue;
        }
        if mentor_tokens.contains(token) {
            shared.push(token.clone());
        }
    }

    shared
}
