use crate::campaign::{CampaignRequest, CampaignResult, Outcome};
use crate::capability::WhatsAppCapability;
use crate::connection_state::ConnectionState;
use crate::dispatch_settings::DispatchSettings;
use crate::error::DispatchError;
use crate::message_variation;
use crate::pacer::{Pacer, TokioPacer};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use tracing::log::{info, warn};
use uuid::Uuid;

/// Where the current (or last) campaign is in its lifecycle.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DispatchPhase {
    Idle,
    Validating,
    Counting,
    #[serde(rename_all = "camelCase")]
    Sending {
        index: usize,
        total: usize,
        succeeded: usize,
        failed: usize,
    },
    Completed,
    Rejected,
    /// The dispatch stopped without finishing, for example because its task panicked.
    Aborted,
}

impl DispatchPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatchPhase::Idle | DispatchPhase::Completed | DispatchPhase::Rejected | DispatchPhase::Aborted)
    }
}

/// Publishes `Aborted` when a dispatch is dropped in a non-terminal phase.
struct PhaseGuard<'a> {
    phase: &'a watch::Sender<DispatchPhase>,
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.phase.send_if_modified(|phase| {
            if phase.is_terminal() {
                return false;
            }

            warn!("Campaign aborted while in phase {phase:?}");
            *phase = DispatchPhase::Aborted;

            true
        });
    }
}

/// Sends one message to every participant of a group, one at a time.
///
/// A dispatcher is bound to a single WhatsApp session: only one campaign may
/// be in flight at once, and the pause between sends is the rate limit.
pub struct CampaignDispatcher {
    settings: DispatchSettings,
    pacer: Arc<dyn Pacer>,
    in_flight: Mutex<()>,
    phase: watch::Sender<DispatchPhase>,
    cancellation: CancellationToken,
}

impl CampaignDispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        let (phase, _) = watch::channel(DispatchPhase::Idle);

        Self {
            settings,
            pacer: Arc::new(TokioPacer),
            in_flight: Mutex::new(()),
            phase,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_pacer(
        self,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self { pacer, ..self }
    }

    pub fn with_cancellation(
        self,
        cancellation: CancellationToken,
    ) -> Self {
        Self { cancellation, ..self }
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    pub fn phase(&self) -> DispatchPhase {
        *self.phase.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<DispatchPhase> {
        self.phase.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    #[instrument(skip_all, name = "dispatch_campaign", fields(group_id = %request.target_group_id))]
    pub async fn dispatch(
        &self,
        request: &CampaignRequest,
        capabilities: &dyn WhatsAppCapability,
    ) -> Result<CampaignResult, DispatchError> {
        request.validate()?;

        let _guard = self.in_flight.try_lock().map_err(|_| DispatchError::CampaignAlreadyRunning)?;
        let _phase_guard = PhaseGuard { phase: &self.phase };

        self.publish(DispatchPhase::Validating);

        let state = capabilities.connection_state().await;
        if state != ConnectionState::Connected {
            return self.reject(DispatchError::NotConnected(state.to_string()));
        }

        self.publish(DispatchPhase::Counting);

        let participants = match capabilities.fetch_group_participants(&request.target_group_id).await {
            Ok(participants) if participants.is_empty() => {
                return self.reject(DispatchError::GroupLookupError(format!("group {} returned no participants", request.target_group_id)));
            },
            Ok(participants) => participants,
            Err(error) => return self.reject(DispatchError::GroupLookupError(error.reason())),
        };

        let limit = self.settings.max_participants_per_campaign;
        if participants.len() > limit {
            return self.reject(DispatchError::TooManyParticipants {
                found: participants.len(),
                limit,
            });
        }

        let campaign_id = Uuid::now_v7();
        let total = participants.len();
        let mut result = CampaignResult::new(campaign_id, &request.target_group_id, total);

        info!("Campaign {campaign_id} started for group {} with {total} participants", request.target_group_id);

        for (position, participant) in participants.iter().enumerate() {
            if self.cancellation.is_cancelled() {
                warn!("Campaign {campaign_id} cancelled with {} participants pending", total - position);
                result.cancelled = true;
                break;
            }

            self.publish(DispatchPhase::Sending {
                index: position + 1,
                total,
                succeeded: result.success_count,
                failed: result.failure_count,
            });

            let body = if self.settings.message_variation {
                message_variation::vary(&request.message_body)
            } else {
                request.message_body.clone()
            };

            let delay = match capabilities.send_message(&participant.identifier, &body).await {
                Ok(()) => {
                    let index = result.record(participant, Outcome::Success);
                    info!("Campaign {campaign_id} [{index}/{total}] sent to {}", participant.identifier);
                    self.settings.success_delay()
                },
                Err(error) => {
                    let reason = error.reason();
                    let index = result.record(participant, Outcome::Failure(reason.clone()));
                    warn!("Campaign {campaign_id} [{index}/{total}] failed for {}: {reason}", participant.identifier);
                    self.settings.failure_delay()
                },
            };

            if position + 1 < total {
                self.pause(delay).await;
            }
        }

        self.publish(DispatchPhase::Completed);

        info!(
            "Campaign {campaign_id} finished: {} sent, {} failed, {} not attempted",
            result.success_count,
            result.failure_count,
            result.pending()
        );

        Ok(result)
    }

    async fn pause(
        &self,
        delay: Duration,
    ) {
        tokio::select! {
            _ = self.pacer.pause(delay) => {},
            _ = self.cancellation.cancelled() => {},
        }
    }

    fn reject(
        &self,
        error: DispatchError,
    ) -> Result<CampaignResult, DispatchError> {
        warn!("Campaign rejected: {error}");
        self.publish(DispatchPhase::Rejected);
        Err(error)
    }

    fn publish(
        &self,
        phase: DispatchPhase,
    ) {
        self.phase.send_replace(phase);
    }
}
