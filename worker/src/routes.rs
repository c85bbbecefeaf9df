use crate::controller::campaign::routes::CampaignRoutes;
use crate::controller::groups::routes::GroupRoutes;
use crate::controller::health::routes::HealthRoutes;
use crate::controller::session::routes::SessionRoutes;
use crate::infra::axum::AppLayers;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;

pub struct Routes;

impl Routes {
    pub async fn routes(app_state: &AppState) -> Router {
        let api = Router::new()
            .merge(SessionRoutes::routes(app_state))
            .merge(GroupRoutes::routes(app_state))
            .merge(CampaignRoutes::routes(app_state));

        AppLayers::apply(Router::new().route("/", get(root_handler)).nest("/health", HealthRoutes::routes()).nest("/api", api))
    }
}

async fn root_handler() -> &'static str {
    "WhatsApp campaign dispatcher is running"
}
