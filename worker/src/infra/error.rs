use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campaign_dispatcher::error::{CapabilityError, DispatchError};
use serde_json::json;
use std::fmt;
use tokio::task::JoinError;
use tracing::{error, info};

#[derive(Debug)]
pub struct AppError {
    pub status_code: StatusCode,
    pub error: String,
    pub cause: String,
    pub message: Option<String>,
}

impl AppError {
    pub fn new(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error: "InternalError".to_string(),
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn with_status(
        self,
        status_code: StatusCode,
        error: &str,
    ) -> Self {
        Self {
            status_code,
            error: error.to_string(),
            ..self
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.error,
            "message": self.message.clone().unwrap_or(self.cause.clone()),
            "cause": self.cause,
        }));

        if self.status_code.is_server_error() {
            error!("{}", self.cause);
        } else if self.status_code.is_client_error() {
            info!("{}", self.cause);
        }

        (self.status_code, body).into_response()
    }
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl From<JsonRejection> for AppError {
    fn from(inner: JsonRejection) -> Self {
        Self {
            status_code: inner.status(),
            error: "InvalidRequest".to_string(),
            cause: inner.to_string(),
            message: Some(inner.body_text()),
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(inner: DispatchError) -> Self {
        let status_code = StatusCode::from_u16(inner.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self {
            status_code,
            error: inner.kind().to_string(),
            cause: inner.to_string(),
            message: Some(inner.to_string()),
        }
    }
}

impl From<CapabilityError> for AppError {
    fn from(inner: CapabilityError) -> Self {
        Self::new(&inner.cause, inner.message.as_deref().unwrap_or("WhatsApp session call failed")).with_status(StatusCode::INTERNAL_SERVER_ERROR, "SessionError")
    }
}

impl From<JoinError> for AppError {
    fn from(inner: JoinError) -> Self {
        Self::new(&inner.to_string(), "Campaign task stopped unexpectedly").with_status(StatusCode::INTERNAL_SERVER_ERROR, "CampaignAborted")
    }
}
