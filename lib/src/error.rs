use std::fmt;

/// Failure reported by the WhatsApp session collaborator for a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityError {
    pub cause: String,
    pub message: Option<String>,
}

impl CapabilityError {
    pub fn new(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn reason(&self) -> String {
        match &self.message {
            Some(message) if !message.is_empty() => format!("{message}: {}", self.cause),
            _ => self.cause.clone(),
        }
    }
}

impl std::error::Error for CapabilityError {}

impl fmt::Display for CapabilityError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Whole-campaign failures. Per-participant send errors never surface here,
/// they are absorbed into the campaign result.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    InvalidRequest(String),
    NotConnected(String),
    GroupLookupError(String),
    TooManyParticipants { found: usize, limit: usize },
    CampaignAlreadyRunning,
}

impl DispatchError {
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::InvalidRequest(_) => "InvalidRequest",
            DispatchError::NotConnected(_) => "NotConnected",
            DispatchError::GroupLookupError(_) => "GroupLookupError",
            DispatchError::TooManyParticipants { .. } => "TooManyParticipants",
            DispatchError::CampaignAlreadyRunning => "CampaignAlreadyRunning",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::InvalidRequest(_) | DispatchError::NotConnected(_) | DispatchError::TooManyParticipants { .. } => 400,
            DispatchError::CampaignAlreadyRunning => 409,
            DispatchError::GroupLookupError(_) => 500,
        }
    }
}

impl std::error::Error for DispatchError {}

impl fmt::Display for DispatchError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            DispatchError::InvalidRequest(reason) => write!(f, "Invalid campaign request: {reason}"),
            DispatchError::NotConnected(state) => write!(f, "WhatsApp session is not connected (current state: {state})"),
            DispatchError::GroupLookupError(reason) => write!(f, "Failed to resolve group participants: {reason}"),
            DispatchError::TooManyParticipants { found, limit } => {
                write!(f, "Group has {found} participants, above the campaign limit of {limit}")
            },
            DispatchError::CampaignAlreadyRunning => write!(f, "Another campaign is already running on this session"),
        }
    }
}
