use crate::infra::axum::{AppJson, BridgeTokenAuth};
use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use campaign_dispatcher::connection_state::SessionEvent;
use serde_json::{json, Value};
use tower_http::validate_request::ValidateRequestHeaderLayer;
use tracing::info;

pub struct SessionRoutes;

impl SessionRoutes {
    pub fn routes(app_state: &AppState) -> Router {
        let session_events = Router::new().route("/session-events", post(session_event_handler));
        let session_events = match &app_state.bridge_token {
            Some(token) => session_events.route_layer(ValidateRequestHeaderLayer::custom(BridgeTokenAuth::new(token))),
            None => session_events,
        };

        Router::new()
            .route("/status", get(status_handler))
            .route("/connect", post(connect_handler))
            .merge(session_events)
            .with_state(app_state.clone())
    }
}

async fn status_handler(State(app_state): State<AppState>) -> Json<Value> {
    let session = app_state.tracker.snapshot();

    Json(json!({
        "status": "ready",
        "connected": session.is_connected(),
        "connectionState": session.state,
        "qrCode": session.qr_code,
        "updatedAt": session.updated_at,
        "campaignRunning": app_state.dispatcher.is_running(),
        "campaign": app_state.dispatcher.phase(),
    }))
}

async fn connect_handler(State(app_state): State<AppState>) -> Result<Json<Value>, AppError> {
    info!("POST /api/connect");

    let session = app_state.capability.connect().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Connection requested, scan the QR code from /api/status if prompted",
        "connectionState": session.state,
        "qrCode": session.qr_code,
    })))
}

async fn session_event_handler(
    State(app_state): State<AppState>,
    AppJson(event): AppJson<SessionEvent>,
) -> Json<Value> {
    let state = app_state.tracker.apply(&event);

    Json(json!({
        "success": true,
        "connectionState": state,
    }))
}
