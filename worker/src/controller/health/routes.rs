use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

pub struct HealthRoutes;

impl HealthRoutes {
    pub fn routes() -> Router {
        Router::new().route("/", get(health_handler))
    }
}

async fn health_handler() -> Json<Value> {
    debug!("GET /health");
    Json(json!({
        "status": "OK",
        "message": "Server is healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
