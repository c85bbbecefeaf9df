use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::log::{debug, info};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    AwaitingScan,
    Connecting,
    Connected,
    AuthFailed,
}

impl fmt::Display for ConnectionState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::AwaitingScan => "awaiting_scan",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::AuthFailed => "auth_failed",
        };

        write!(f, "{name}")
    }
}

/// Callbacks raised by the WhatsApp client behind the bridge.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    ConnectRequested,
    #[serde(rename = "qr")]
    QrReceived {
        qr: String,
    },
    Authenticated,
    Ready,
    AuthFailure,
    Disconnected,
}

impl ConnectionState {
    /// Transition table. `None` means the event does not apply in this state.
    pub fn next(
        self,
        event: &SessionEvent,
    ) -> Option<ConnectionState> {
        use ConnectionState::*;

        match (self, event) {
            (Disconnected | AuthFailed, SessionEvent::ConnectRequested) => Some(Connecting),
            (Disconnected | Connecting | AwaitingScan | AuthFailed, SessionEvent::QrReceived { .. }) => Some(AwaitingScan),
            (Connecting | AwaitingScan, SessionEvent::Authenticated) => Some(Connecting),
            (Disconnected | Connecting | AwaitingScan, SessionEvent::Ready) => Some(Connected),
            (Disconnected | Connecting | AwaitingScan | Connected, SessionEvent::AuthFailure) => Some(AuthFailed),
            (Connecting | AwaitingScan | Connected | AuthFailed, SessionEvent::Disconnected) => Some(Disconnected),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: ConnectionState,
    pub qr_code: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }
}

/// Owns the session's connection state. Every mutation goes through
/// [`SessionTracker::apply`]; readers only ever see immutable snapshots.
#[derive(Clone)]
pub struct SessionTracker {
    sender: Arc<watch::Sender<SessionSnapshot>>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new(ConnectionState::Disconnected)
    }
}

impl SessionTracker {
    pub fn new(initial: ConnectionState) -> Self {
        let (sender, _) = watch::channel(SessionSnapshot {
            state: initial,
            qr_code: None,
            updated_at: Utc::now(),
        });

        Self { sender: Arc::new(sender) }
    }

    pub fn state(&self) -> ConnectionState {
        self.sender.borrow().state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.sender.subscribe()
    }

    /// Applies `event` and returns the resulting state. Events that do not
    /// apply to the current state leave it untouched.
    pub fn apply(
        &self,
        event: &SessionEvent,
    ) -> ConnectionState {
        let mut resulting = self.state();

        self.sender.send_if_modified(|snapshot| match snapshot.state.next(event) {
            Some(next) => {
                info!("WhatsApp session {} -> {}", snapshot.state, next);

                snapshot.qr_code = match (next, event) {
                    (ConnectionState::AwaitingScan, SessionEvent::QrReceived { qr }) => Some(qr.clone()),
                    _ => None,
                };
                snapshot.state = next;
                snapshot.updated_at = Utc::now();
                resulting = next;

                true
            },
            None => {
                debug!("Ignoring session event {:?} in state {}", event, snapshot.state);
                resulting = snapshot.state;

                false
            },
        });

        resulting
    }
}
