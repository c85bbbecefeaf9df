use crate::capability::WhatsAppCapability;
use crate::connection_state::{ConnectionState, SessionEvent, SessionSnapshot, SessionTracker};
use crate::environment::Environment;
use crate::error::CapabilityError;
use crate::http_gateway::HttpGateway;
use crate::participant::{GroupSummary, Participant};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use tracing::log::{error, info};

#[derive(Deserialize)]
struct ParticipantsResponse {
    participants: Vec<Participant>,
}

#[derive(Deserialize)]
struct GroupsResponse {
    groups: Vec<GroupSummary>,
}

/// Talks to an external bridge process that wraps the WhatsApp client library.
///
/// The bridge serves `GET /groups`, `GET /groups/{id}/participants`,
/// `POST /messages` and `POST /connect`, and pushes its session callbacks back
/// to us; those land in the [`SessionTracker`] this capability reads from.
#[derive(Clone)]
pub struct BridgeCapability {
    gateway: HttpGateway,
    tracker: SessionTracker,
}

impl BridgeCapability {
    pub fn new(
        gateway: HttpGateway,
        tracker: SessionTracker,
    ) -> Self {
        Self { gateway, tracker }
    }

    pub fn from_env(tracker: SessionTracker) -> Result<Self, CapabilityError> {
        let bridge_url = Environment::string("BRIDGE_URL", "http://localhost:3001");
        let timeout = Environment::u64("BRIDGE_TIMEOUT_IN_MILLIS", 15000);

        info!("Using WhatsApp bridge at {bridge_url}");

        Ok(Self::new(HttpGateway::new(&bridge_url, timeout)?, tracker))
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    fn segments_url(
        &self,
        segments: &[&str],
    ) -> Result<Url, CapabilityError> {
        let mut url = Url::parse(&self.gateway.base_url).map_err(|error| CapabilityError::new(&error.to_string(), "Invalid bridge url"))?;

        url.path_segments_mut()
            .map_err(|_| CapabilityError::new(&self.gateway.base_url, "Bridge url cannot be a base"))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn ensure_success(
        response: Result<Response, reqwest_middleware::Error>,
        message: &str,
    ) -> Result<Response, CapabilityError> {
        let response = response.map_err(|error| CapabilityError::new(&error.to_string(), message))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or("unknown".to_string());
        Err(CapabilityError::new(&format!("bridge responded with status {status} and body {body}"), message))
    }
}

#[async_trait]
impl WhatsAppCapability for BridgeCapability {
    async fn connection_state(&self) -> ConnectionState {
        self.tracker.state()
    }

    #[instrument(skip_all, name = "bridge_fetch_group_participants")]
    async fn fetch_group_participants(
        &self,
        group_id: &str,
    ) -> Result<Vec<Participant>, CapabilityError> {
        let url = self.segments_url(&["groups", group_id, "participants"])?;
        let result = self.gateway.client.get(url).send().await;

        if let Ok(response) = &result {
            if response.status() == StatusCode::NOT_FOUND {
                return Err(CapabilityError::new(&format!("group {group_id} not found"), "Group lookup failed"));
            }
        }

        let response = Self::ensure_success(result, "Group lookup failed").await?;

        response
            .json::<ParticipantsResponse>()
            .await
            .map(|body| body.participants)
            .map_err(|error| CapabilityError::new(&error.to_string(), "Failed to decode group participants"))
    }

    #[instrument(skip_all, name = "bridge_send_message")]
    async fn send_message(
        &self,
        participant_id: &str,
        body: &str,
    ) -> Result<(), CapabilityError> {
        let payload = json!({ "to": participant_id, "body": body });

        let result = self
            .gateway
            .client
            .post(self.gateway.url("messages"))
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await;

        Self::ensure_success(result, "Failed to send message").await.map(|_| ()).inspect_err(|error| {
            error!("Failed to send message to {participant_id} cause {}", error.cause);
        })
    }

    async fn list_groups(&self) -> Result<Vec<GroupSummary>, CapabilityError> {
        let result = self.gateway.client.get(self.gateway.url("groups")).send().await;
        let response = Self::ensure_success(result, "Failed to list groups").await?;

        response
            .json::<GroupsResponse>()
            .await
            .map(|body| body.groups)
            .map_err(|error| CapabilityError::new(&error.to_string(), "Failed to decode groups"))
    }

    async fn connect(&self) -> Result<SessionSnapshot, CapabilityError> {
        let result = self.gateway.client.post(self.gateway.url("connect")).send().await;
        Self::ensure_success(result, "Failed to request connection").await?;

        self.tracker.apply(&SessionEvent::ConnectRequested);

        Ok(self.tracker.snapshot())
    }
}
