use serde::{Deserialize, Serialize};

/// String-similarity backend used for fuzzy equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    /// Token-sort ratio: whitespace tokens are sorted before an edit-distance ratio is taken
    TokenSort,
    /// No similarity measure, fuzzy equality is plain token equality
    Exact,
}

impl Default for Similarity {
    fn default() -> Self {
        if cfg!(feature = "fuzzy") {
            Similarity::TokenSort
        } else {
            Similarity::Exact
        }
    }
}

impl Similarity {
    /// Similarity on a 0-100 scale. Empty input never resembles anything.
    pub fn ratio(self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        match self {
            Similarity::TokenSort => token_sort_ratio(a, b),
            Similarity::Exact => {
                if a == b {
                    100.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Threshold fuzzy equality
    ///
    /// A threshold of 0 accepts any nonzero similarity.
    pub fn fuzzy_eq(self, a: &str, b: &str, threshold: u8) -> bool {
        let ratio = self.ratio(a, b);
        if threshold == 0 {
            ratio > 0.0
        } else {
            ratio >= f64::from(threshold)
        }
    }
}

/// Exact categorical equality over normalized tokens
///
/// Empty tokens are absent values and never match, not even each other.
#[inline]
pub fn exact_eq(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

#[cfg(feature = "fuzzy")]
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&sorted_tokens(a), &sorted_tokens(b)) * 100.0
}

#[cfg(not(feature = "fuzzy"))]
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    if a == b {
        100.0
    } else {
        0.0
    }
}

#[cfg(feature = "fuzzy")]
fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
