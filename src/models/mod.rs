// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Axis, AxisScore, MatchConfig, MatchOutcome, MatchRecord, Mentee, Mentor, PolicyKind, PriorityOrder, RawMentee,
    RawMentor, ScoreBreakdown, Strategy,
};
pub use requests::{DatasetPayload, MatchRequest};
pub use responses::{CatalogueTopic, ErrorResponse, HealthResponse, MatchResponse, MatchRow};
