use crate::core::error::MatchError;
use crate::core::scoring::{policy_for, ScoringPolicy};
use crate::models::{MatchConfig, Mentee, Mentor};

/// Fixed-point factor used when scores are handed to the integer assignment solver
pub const SCORE_SCALE: f64 = 100.0;

/// Largest score a cell may hold; keeps the solver's label sums inside `i64`
pub const MAX_SCORE: f64 = 1e12;

// Tolerance for float noise such as 0.1 * 100 = 10.000000000000002
const SCALE_EPSILON: f64 = 1e-6;

/// Pair scores laid out with one row per mentee and one column per mentor
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    mentees: usize,
    mentors: usize,
    scores: Vec<f64>,
}

impl ScoreMatrix {
    /// Build from mentee rows; every row must hold one score per mentor
    ///
    /// Scores must be finite, within `0..=MAX_SCORE`, and carry at most two decimals, so the
    /// fixed-point copy handed to the optimal solver is exact.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatchError> {
        let mentees = rows.len();
        let mentors = rows.first().map(Vec::len).unwrap_or(0);

        if rows.iter().any(|row| row.len() != mentors) {
            return Err(MatchError::InvalidDataset(
                "score matrix rows have different lengths".to_string(),
            ));
        }

        for (mentee, row) in rows.iter().enumerate() {
            for (mentor, &value) in row.iter().enumerate() {
                check_score(value).map_err(|reason| {
                    MatchError::InvalidDataset(format!(
                        "score {} at mentee {}, mentor {} {}",
                        value, mentee, mentor, reason
                    ))
                })?;
            }
        }

        Ok(Self {
            mentees,
            mentors,
            scores: rows.into_iter().flatten().collect(),
        })
    }

    pub fn mentee_count(&self) -> usize {
        self.mentees
    }

    pub fn mentor_count(&self) -> usize {
        self.mentors
    }

    /// True when either population is empty
    pub fn is_empty(&self) -> bool {
        self.mentees == 0 || self.mentors == 0
    }

    #[inline]
    pub fn get(&self, mentee: usize, mentor: usize) -> f64 {
        self.scores[mentee * self.mentors + mentor]
    }

    /// Square fixed-point copy, zero-padded up to `max(mentees, mentors)`
    ///
    /// Row `i >= mentee_count()` or column `j >= mentor_count()` is a phantom entity.
    pub fn padded_square(&self) -> (usize, Vec<i64>) {
        let size = self.mentees.max(self.mentors);
        let mut cells = vec![0i64; size * size];

        for mentee in 0..self.mentees {
            for mentor in 0..self.mentors {
                cells[mentee * size + mentor] = (self.get(mentee, mentor) * SCORE_SCALE).round() as i64;
            }
        }

        (size, cells)
    }
}

fn check_score(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("is not a finite number");
    }
    if !(0.0..=MAX_SCORE).contains(&value) {
        return Err("is outside the accepted range");
    }
    let scaled = value * SCORE_SCALE;
    if (scaled - scaled.round()).abs() > SCALE_EPSILON {
        return Err("has more than two decimals");
    }
    Ok(())
}

/// Score every mentor/mentee pair under a configuration
pub fn build_matrix(mentors: &[Mentor], mentees: &[Mentee], config: &MatchConfig) -> ScoreMatrix {
    let policy = policy_for(config);
    build_with_policy(policy.as_ref(), mentors, mentees)
}

/// Score every mentor/mentee pair with an explicit policy
///
/// Policy scores are sums of whole points, so they always meet the `from_rows` contract.
pub fn build_with_policy(policy: &dyn ScoringPolicy, mentors: &[Mentor], mentees: &[Mentee]) -> ScoreMatrix {
    let scores = mentees
        .iter()
        .flat_map(|mentee| mentors.iter().map(move |mentor| policy.score(mentor, mentee)))
        .collect();

    ScoreMatrix {
        mentees: mentees.len(),
        mentors: mentors.len(),
        scores,
    }
}
