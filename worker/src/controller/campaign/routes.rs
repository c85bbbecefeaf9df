use crate::infra::axum::AppJson;
use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::post;
use axum::Router;
use campaign_dispatcher::campaign::{CampaignRequest, CampaignResult, DeliveryOutcome, Outcome};
use serde::Serialize;
use tracing::info;

pub struct CampaignRoutes;

impl CampaignRoutes {
    pub fn routes(app_state: &AppState) -> Router {
        Router::new().route("/pushkontak", post(pushkontak_handler)).with_state(app_state.clone())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub success: bool,
    pub campaign_id: String,
    pub group_id: String,
    pub cancelled: bool,
    pub summary: CampaignSummary,
    pub results: Vec<DeliveryResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub not_attempted: usize,
}

#[derive(Serialize)]
pub struct DeliveryResult {
    pub index: usize,
    pub participant: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DeliveryOutcome> for DeliveryResult {
    fn from(outcome: &DeliveryOutcome) -> Self {
        let (status, error) = match &outcome.outcome {
            Outcome::Success => ("success", None),
            Outcome::Failure(reason) => ("failed", Some(reason.clone())),
        };

        Self {
            index: outcome.sequence_index,
            participant: outcome.participant.identifier.clone(),
            status,
            error,
        }
    }
}

impl From<CampaignResult> for CampaignResponse {
    fn from(result: CampaignResult) -> Self {
        Self {
            success: true,
            campaign_id: result.campaign_id.to_string(),
            group_id: result.group_id.clone(),
            cancelled: result.cancelled,
            summary: CampaignSummary {
                total: result.total_participants,
                success: result.success_count,
                failed: result.failure_count,
                not_attempted: result.pending(),
            },
            results: result.outcomes.iter().map(DeliveryResult::from).collect(),
        }
    }
}

async fn pushkontak_handler(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<CampaignRequest>,
) -> Result<AppJson<CampaignResponse>, AppError> {
    info!("POST /api/pushkontak for group {}", request.target_group_id);

    // Owned by its own task so a client disconnect cannot cut a campaign short.
    let dispatcher = app_state.dispatcher.clone();
    let capability = app_state.capability.clone();
    let campaign = tokio::spawn(async move { dispatcher.dispatch(&request, capability.as_ref()).await });

    let result = campaign.await??;

    Ok(AppJson(CampaignResponse::from(result)))
}
