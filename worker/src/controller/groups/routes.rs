use crate::infra::axum::AppJson;
use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use campaign_dispatcher::connection_state::ConnectionState;
use campaign_dispatcher::error::DispatchError;
use campaign_dispatcher::participant::Contact;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

pub struct GroupRoutes;

impl GroupRoutes {
    pub fn routes(app_state: &AppState) -> Router {
        Router::new()
            .route("/groups", get(groups_handler))
            .route("/save-contacts", post(save_contacts_handler))
            .with_state(app_state.clone())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveContactsRequest {
    #[serde(default)]
    group_id: String,
}

async fn ensure_connected(app_state: &AppState) -> Result<(), AppError> {
    match app_state.capability.connection_state().await {
        ConnectionState::Connected => Ok(()),
        state => Err(DispatchError::NotConnected(state.to_string()).into()),
    }
}

async fn groups_handler(State(app_state): State<AppState>) -> Result<Json<Value>, AppError> {
    ensure_connected(&app_state).await?;

    let groups = app_state.capability.list_groups().await?;

    info!("Listed {} WhatsApp groups", groups.len());

    Ok(Json(json!({
        "success": true,
        "total": groups.len(),
        "groups": groups,
    })))
}

async fn save_contacts_handler(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<SaveContactsRequest>,
) -> Result<Json<Value>, AppError> {
    if request.group_id.trim().is_empty() {
        return Err(DispatchError::InvalidRequest("groupId must not be empty".to_string()).into());
    }

    ensure_connected(&app_state).await?;

    let participants = app_state
        .capability
        .fetch_group_participants(&request.group_id)
        .await
        .map_err(|error| DispatchError::GroupLookupError(error.reason()))?;

    let contacts = participants.iter().map(Contact::from).collect::<Vec<Contact>>();

    Ok(Json(json!({
        "success": true,
        "groupId": request.group_id,
        "total": contacts.len(),
        "contacts": contacts,
    })))
}
