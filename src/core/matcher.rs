use crate::core::{
    assignment::{assign, Pairing},
    dataset::{load_mentees, load_mentors, Table},
    error::MatchError,
    matrix::build_with_policy,
    scoring::{policy_for, ScoringPolicy},
};
use crate::models::{MatchConfig, MatchOutcome, MatchRecord, Mentee, Mentor};

/// Matching orchestrator
///
/// # Pipeline
/// 1. Schema check and normalization of both datasets
/// 2. Score matrix, one row per mentee and one column per mentor
/// 3. One-to-one assignment under the configured strategy
/// 4. Result assembly: identities and score breakdowns for every accepted pair
pub struct Matcher {
    config: MatchConfig,
    policy: Box<dyn ScoringPolicy>,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            policy: policy_for(&config),
            config,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Validate and normalize both datasets against the columns the policy reads
    pub fn prepare(&self, mentors: &Table, mentees: &Table) -> Result<(Vec<Mentor>, Vec<Mentee>), MatchError> {
        let mentors = load_mentors(mentors, self.policy.mentor_fields())?;
        let mentees = load_mentees(mentees, self.policy.mentee_fields())?;
        Ok((mentors, mentees))
    }

    /// Run the whole pipeline from raw tables
    pub fn match_tables(&self, mentors: &Table, mentees: &Table) -> Result<MatchOutcome, MatchError> {
        let (mentors, mentees) = self.prepare(mentors, mentees)?;
        Ok(self.run(&mentors, &mentees))
    }

    /// Pair already-normalized populations
    pub fn run(&self, mentors: &[Mentor], mentees: &[Mentee]) -> MatchOutcome {
        tracing::debug!(
            "Scoring {} mentors x {} mentees with {} policy",
            mentors.len(),
            mentees.len(),
            self.policy.kind().as_str()
        );

        let matrix = build_with_policy(self.policy.as_ref(), mentors, mentees);
        let pairings = assign(&matrix, self.config.strategy());
        let outcome = self.assemble(mentors, mentees, &pairings);

        tracing::info!(
            "Matched {} pairs ({} strategy, total score {:.2}, {} mentors and {} mentees unmatched)",
            outcome.records.len(),
            self.config.strategy().as_str(),
            outcome.total_score,
            outcome.unmatched_mentors.len(),
            outcome.unmatched_mentees.len()
        );

        outcome
    }

    fn assemble(&self, mentors: &[Mentor], mentees: &[Mentee], pairings: &[Pairing]) -> MatchOutcome {
        let mut mentor_matched = vec![false; mentors.len()];
        let mut mentee_matched = vec![false; mentees.len()];

        let records: Vec<MatchRecord> = pairings
            .iter()
            .map(|pair| {
                let mentor = &mentors[pair.mentor];
                let mentee = &mentees[pair.mentee];
                mentor_matched[pair.mentor] = true;
                mentee_matched[pair.mentee] = true;

                let breakdown = self.policy.breakdown(mentor, mentee);
                tracing::trace!("{} <- {}: {:?}", mentee.name, mentor.name, breakdown);

                MatchRecord {
                    mentee: mentee.name.clone(),
                    mentor: mentor.name.clone(),
                    score: pair.score,
                    breakdown,
                }
            })
            .collect();

        let unmatched_mentors = mentors
            .iter()
            .zip(&mentor_matched)
            .filter(|(_, matched)| !**matched)
            .map(|(m, _)| m.name.clone())
            .collect();
        let unmatched_mentees = mentees
            .iter()
            .zip(&mentee_matched)
            .filter(|(_, matched)| !**matched)
            .map(|(m, _)| m.name.clone())
            .collect();

        MatchOutcome {
            total_score: records.iter().map(|r| r.score).sum(),
            records,
            strategy: self.config.strategy(),
            policy: self.policy.kind(),
            unmatched_mentors,
            unmatched_mentees,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").field("config", &self.config).finish()
    }
}
