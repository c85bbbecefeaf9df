use crate::connection_state::{ConnectionState, SessionSnapshot};
use crate::error::CapabilityError;
use crate::participant::{GroupSummary, Participant};
use async_trait::async_trait;

/// What the campaign dispatcher and the HTTP surface need from a WhatsApp
/// session. The protocol, authentication and transport all live behind it.
#[async_trait]
pub trait WhatsAppCapability: Send + Sync {
    async fn connection_state(&self) -> ConnectionState;

    /// Participants of `group_id` in the order the platform returns them.
    async fn fetch_group_participants(
        &self,
        group_id: &str,
    ) -> Result<Vec<Participant>, CapabilityError>;

    async fn send_message(
        &self,
        participant_id: &str,
        body: &str,
    ) -> Result<(), CapabilityError>;

    async fn list_groups(&self) -> Result<Vec<GroupSummary>, CapabilityError>;

    /// Asks the session to (re)connect and returns the state right after the request.
    async fn connect(&self) -> Result<SessionSnapshot, CapabilityError>;
}
