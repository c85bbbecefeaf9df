use crate::error::DispatchError;
use crate::participant::Participant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CampaignRequest {
    #[serde(rename = "groupId", default)]
    pub target_group_id: String,
    #[serde(rename = "message", default)]
    pub message_body: String,
}

impl CampaignRequest {
    pub fn new(
        target_group_id: &str,
        message_body: &str,
    ) -> Self {
        Self {
            target_group_id: target_group_id.to_string(),
            message_body: message_body.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), DispatchError> {
        let mut missing = vec![];

        if self.target_group_id.trim().is_empty() {
            missing.push("groupId");
        }

        if self.message_body.trim().is_empty() {
            missing.push("message");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::InvalidRequest(format!("{} must not be empty", missing.join(" and "))))
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    pub sequence_index: usize,
    pub participant: Participant,
    pub outcome: Outcome,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResult {
    pub campaign_id: Uuid,
    pub group_id: String,
    pub group_size: usize,
    pub total_participants: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub cancelled: bool,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl CampaignResult {
    pub fn new(
        campaign_id: Uuid,
        group_id: &str,
        group_size: usize,
    ) -> Self {
        Self {
            campaign_id,
            group_id: group_id.to_string(),
            group_size,
            total_participants: 0,
            success_count: 0,
            failure_count: 0,
            cancelled: false,
            outcomes: Vec::with_capacity(group_size),
        }
    }

    /// Appends the outcome for the next participant and returns its sequence index.
    pub fn record(
        &mut self,
        participant: &Participant,
        outcome: Outcome,
    ) -> usize {
        if outcome.is_success() {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }

        self.total_participants += 1;

        let sequence_index = self.outcomes.len() + 1;
        self.outcomes.push(DeliveryOutcome {
            sequence_index,
            participant: participant.clone(),
            outcome,
        });

        sequence_index
    }

    pub fn pending(&self) -> usize {
        self.group_size.saturating_sub(self.total_participants)
    }
}
