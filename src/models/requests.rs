use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::core::dataset::Table;
use crate::core::error::MatchError;
use crate::core::similarity::Similarity;
use crate::models::domain::{MatchConfig, PolicyKind, PriorityOrder, Strategy};

/// One population, as CSV text or as JSON row objects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetPayload {
    Csv { csv: String },
    Rows { rows: Vec<Map<String, Value>> },
}

impl DatasetPayload {
    pub fn to_table(&self) -> Result<Table, MatchError> {
        match self {
            DatasetPayload::Csv { csv } => Table::from_csv(csv),
            DatasetPayload::Rows { rows } => Ok(Table::from_json_rows(rows)),
        }
    }
}

/// Request to pair two populations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    pub mentors: DatasetPayload,
    pub mentees: DatasetPayload,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub threshold: Option<u8>,
    /// Axis labels, highest priority first
    #[serde(default, alias = "priorityOrder")]
    pub priorities: Option<Vec<String>>,
    #[serde(default)]
    pub strategy: Option<Strategy>,
    #[serde(default)]
    pub policy: Option<PolicyKind>,
    #[serde(default)]
    pub similarity: Option<Similarity>,
}

impl MatchRequest {
    /// Resolve the request options against service defaults
    pub fn to_config(&self, defaults: &MatchConfig) -> Result<MatchConfig, MatchError> {
        let priorities = match &self.priorities {
            Some(labels) => PriorityOrder::parse(labels)?,
            None => *defaults.priority_order(),
        };
        let strategy = self.strategy.unwrap_or(defaults.strategy());

        let config = MatchConfig::new(self.threshold.unwrap_or(defaults.threshold()), priorities, strategy)?
            .with_policy(self.policy.unwrap_or(strategy.default_policy()))
            .with_similarity(self.similarity.unwrap_or(defaults.similarity()));

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Axis;

    fn request(json: &str) -> MatchRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_dataset_payload_variants() {
        let req = request(
            r#"{
                "mentors": {"csv": "Mentor Name\nAlice\n"},
                "mentees": {"rows": [{"UG_Full_Name": "Tom"}]}
            }"#,
        );

        assert!(matches!(req.mentors, DatasetPayload::Csv { .. }));
        assert_eq!(req.mentees.to_table().unwrap().len(), 1);
    }

    #[test]
    fn test_defaults_apply() {
        let req = request(r#"{"mentors": {"rows": []}, "mentees": {"rows": []}}"#);
        let config = req.to_config(&MatchConfig::default()).unwrap();

        assert_eq!(config.threshold(), 80);
        assert_eq!(config.strategy(), Strategy::Optimal);
        assert_eq!(config.policy(), PolicyKind::PriorityWeighted);
    }

    #[test]
    fn test_explicit_options() {
        let req = request(
            r#"{
                "mentors": {"rows": []},
                "mentees": {"rows": []},
                "threshold": 0,
                "priorityOrder": ["role", "keyword", "industry", "interest"],
                "strategy": "greedy"
            }"#,
        );
        let config = req.to_config(&MatchConfig::default()).unwrap();

        assert_eq!(config.threshold(), 0);
        assert_eq!(config.priority_order().axes()[0], Axis::Role);
        assert_eq!(config.policy(), PolicyKind::CategoryCatalogue);
    }

    #[test]
    fn test_invalid_priorities_rejected() {
        let req = request(
            r#"{"mentors": {"rows": []}, "mentees": {"rows": []}, "priorities": ["role", "role", "industry", "keyword"]}"#,
        );
        assert!(matches!(
            req.to_config(&MatchConfig::default()),
            Err(MatchError::InvalidPriorityOrder(_))
        ));
    }

    #[test]
    fn test_threshold_validation() {
        let req = request(r#"{"mentors": {"rows": []}, "mentees": {"rows": []}, "threshold": 150}"#);
        assert!(req.validate().is_err());
    }
}
