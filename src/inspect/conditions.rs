use serde::Serialize;

use crate::types::PodCondition;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FailedCondition {
    #[serde(rename = "type")]
    pub type_: String,
    pub reason: String,
    pub message: String,
}

/// Conditions that point at a problem: not true, and not a completed pod.
pub fn filter(conditions: &[PodCondition]) -> Vec<FailedCondition> {
    conditions
        .iter()
        .filter(|c| c.status != "True" && c.reason != "PodCompleted")
        .map(|c| FailedCondition {
            type_: c.type_.clone(),
            reason: c.reason.clone(),
            message: c.message.clone(),
        })
        .collect()
}
