use crate::infra::error::AppError;
use crate::infra::settings::WorkerSettings;
use campaign_dispatcher::bridge_capability::BridgeCapability;
use campaign_dispatcher::campaign_dispatcher::CampaignDispatcher;
use campaign_dispatcher::capability::WhatsAppCapability;
use campaign_dispatcher::connection_state::SessionTracker;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::log::warn;

#[derive(Clone)]
pub struct AppState {
    pub capability: Arc<dyn WhatsAppCapability>,
    pub tracker: SessionTracker,
    pub dispatcher: Arc<CampaignDispatcher>,
    pub bridge_token: Option<String>,
}

impl AppState {
    pub fn new(
        capability: Arc<dyn WhatsAppCapability>,
        tracker: SessionTracker,
        dispatcher: CampaignDispatcher,
    ) -> Self {
        Self {
            capability,
            tracker,
            dispatcher: Arc::new(dispatcher),
            bridge_token: None,
        }
    }

    pub fn with_bridge_token(
        self,
        bridge_token: Option<String>,
    ) -> Self {
        Self { bridge_token, ..self }
    }

    pub fn from_settings(
        settings: &WorkerSettings,
        cancellation: CancellationToken,
    ) -> Result<Self, AppError> {
        let tracker = SessionTracker::default();
        let capability = BridgeCapability::from_env(tracker.clone())
            .map_err(|error| AppError::new(&error.to_string(), "Failed to create WhatsApp bridge capability"))?;
        let dispatcher = CampaignDispatcher::new(settings.dispatch.clone()).with_cancellation(cancellation);

        if settings.bridge_token.is_none() {
            warn!("BRIDGE_EVENTS_TOKEN is not set, /api/session-events accepts events from any caller");
        }

        Ok(Self::new(Arc::new(capability), tracker, dispatcher).with_bridge_token(settings.bridge_token.clone()))
    }
}
