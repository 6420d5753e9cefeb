// Core algorithm exports
pub mod assignment;
pub mod catalogue;
pub mod dataset;
pub mod error;
pub mod matcher;
pub mod matrix;
pub mod normalize;
pub mod scoring;
pub mod similarity;

pub use assignment::{assign, Pairing};
pub use dataset::{load_mentees, load_mentors, MenteeField, MentorField, Table};
pub use error::MatchError;
pub use matcher::Matcher;
pub use matrix::{build_matrix, ScoreMatrix};
pub use normalize::{normalize_list, normalize_text};
pub use scoring::{score, CategoryCataloguePolicy, PriorityWeightedPolicy, ScoringPolicy};
pub use similarity::{exact_eq, Similarity};
