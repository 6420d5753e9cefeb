use pathfinding::kuhn_munkres::kuhn_munkres;
use pathfinding::matrix::Matrix;
use serde::Serialize;
use std::cmp::Ordering;

use crate::core::matrix::ScoreMatrix;
use crate::models::Strategy;

/// One accepted pair, as indices into the mentor and mentee populations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pairing {
    pub mentor: usize,
    pub mentee: usize,
    pub score: f64,
}

/// Turn a score matrix into a one-to-one pairing
///
/// Covers `min(mentors, mentees)` pairs; an empty population yields no pairs.
pub fn assign(matrix: &ScoreMatrix, strategy: Strategy) -> Vec<Pairing> {
    if matrix.is_empty() {
        return Vec::new();
    }

    match strategy {
        Strategy::Greedy => greedy(matrix),
        Strategy::Optimal => optimal(matrix),
    }
}

/// Highest score first, accepting a pair while both sides are still free
///
/// Ties keep generation order, mentor-major then mentee. The result is maximal but not
/// necessarily of maximum total score.
pub fn greedy(matrix: &ScoreMatrix) -> Vec<Pairing> {
    let mentors = matrix.mentor_count();
    let mentees = matrix.mentee_count();
    let limit = mentors.min(mentees);

    let mut candidates: Vec<Pairing> = Vec::with_capacity(mentors * mentees);
    for mentor in 0..mentors {
        for mentee in 0..mentees {
            candidates.push(Pairing {
                mentor,
                mentee,
                score: matrix.get(mentee, mentor),
            });
        }
    }

    // stable sort keeps generation order among equal scores
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut mentor_taken = vec![false; mentors];
    let mut mentee_taken = vec![false; mentees];
    let mut pairs = Vec::with_capacity(limit);

    for candidate in candidates {
        if pairs.len() == limit {
            break;
        }
        if mentor_taken[candidate.mentor] || mentee_taken[candidate.mentee] {
            continue;
        }
        mentor_taken[candidate.mentor] = true;
        mentee_taken[candidate.mentee] = true;
        pairs.push(candidate);
    }

    pairs
}

/// Maximum-total-score pairing (Kuhn-Munkres) over the zero-padded square matrix
///
/// Exact because every score is a whole number of hundredths no larger than `MAX_SCORE`.
/// Pairs involving a phantom row or column are dropped. Output is ordered by mentee.
pub fn optimal(matrix: &ScoreMatrix) -> Vec<Pairing> {
    let (size, cells) = matrix.padded_square();
    if size == 0 {
        return Vec::new();
    }

    let mut weights = Matrix::new(size, size, 0i64);
    for row in 0..size {
        for col in 0..size {
            weights[(row, col)] = cells[row * size + col];
        }
    }

    let (_, columns) = kuhn_munkres(&weights);

    columns
        .into_iter()
        .enumerate()
        .filter(|&(mentee, mentor)| mentee < matrix.mentee_count() && mentor < matrix.mentor_count())
        .map(|(mentee, mentor)| Pairing {
            mentor,
            mentee,
            score: matrix.get(mentee, mentor),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matrix::MAX_SCORE;

    fn matrix(rows: Vec<Vec<f64>>) -> ScoreMatrix {
        ScoreMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_greedy_picks_highest_first() {
        // rows are mentees, columns mentors
        let m = matrix(vec![vec![10.0, 9.0], vec![8.0, 1.0]]);
        let pairs = greedy(&m);

        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].mentor, pairs[0].mentee, pairs[0].score), (0, 0, 10.0));
        assert_eq!((pairs[1].mentor, pairs[1].mentee, pairs[1].score), (1, 1, 1.0));
    }

    #[test]
    fn test_optimal_beats_greedy() {
        let m = matrix(vec![vec![10.0, 9.0], vec![8.0, 1.0]]);
        let total: f64 = optimal(&m).iter().map(|p| p.score).sum();
        assert_eq!(total, 17.0);
    }

    #[test]
    fn test_optimal_resolves_hundredths() {
        let m = matrix(vec![vec![0.0, 0.01], vec![0.0, 0.0]]);
        let pairs = optimal(&m);

        assert!(pairs.contains(&Pairing { mentor: 1, mentee: 0, score: 0.01 }));
        assert_eq!(pairs.iter().map(|p| p.score).sum::<f64>(), 0.01);
    }

    #[test]
    fn test_optimal_at_score_ceiling() {
        let m = matrix(vec![vec![MAX_SCORE; 3]; 3]);
        let pairs = optimal(&m);

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.iter().map(|p| p.score).sum::<f64>(), 3.0 * MAX_SCORE);
    }

    #[test]
    fn test_greedy_ties_follow_generation_order() {
        let m = matrix(vec![vec![5.0, 5.0], vec![5.0, 5.0]]);
        let pairs = greedy(&m);

        assert_eq!((pairs[0].mentor, pairs[0].mentee), (0, 0));
        assert_eq!((pairs[1].mentor, pairs[1].mentee), (1, 1));
    }

    #[test]
    fn test_more_mentors_than_mentees() {
        let m = matrix(vec![vec![1.0, 7.0, 3.0], vec![2.0, 6.0, 0.0]]);

        for strategy in [Strategy::Greedy, Strategy::Optimal] {
            let pairs = assign(&m, strategy);
            assert_eq!(pairs.len(), 2);
            assert!(pairs.iter().all(|p| p.mentor < 3 && p.mentee < 2));
        }
    }

    #[test]
    fn test_more_mentees_than_mentors() {
        let m = matrix(vec![vec![0.0], vec![0.0], vec![4.0]]);

        let pairs = assign(&m, Strategy::Optimal);
        assert_eq!(pairs, vec![Pairing { mentor: 0, mentee: 2, score: 4.0 }]);
    }

    #[test]
    fn test_all_zero_still_pairs_genuine_entities() {
        let m = matrix(vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 0.0]]);

        let pairs = assign(&m, Strategy::Optimal);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_empty_population() {
        let m = matrix(vec![]);
        assert!(assign(&m, Strategy::Greedy).is_empty());
        assert!(assign(&m, Strategy::Optimal).is_empty());

        let no_mentors = matrix(vec![vec![], vec![]]);
        assert!(assign(&no_mentors, Strategy::Optimal).is_empty());
    }
}
