use crate::infra::error::AppError;
use axum::body::Body;
use axum::extract::FromRequest;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::validate_request::ValidateRequest;

/// JSON extractor whose rejections render through [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

pub struct AppLayers;

impl AppLayers {
    pub fn apply(router: Router) -> Router {
        router
            .layer(OtelInResponseLayer::default())
            .layer(OtelAxumLayer::default())
            .layer(CatchPanicLayer::new())
            .layer(CorsLayer::permissive())
    }
}

pub const BRIDGE_TOKEN_HEADER: &str = "x-bridge-token";

/// Rejects requests whose `x-bridge-token` header does not carry the shared secret.
#[derive(Clone)]
pub struct BridgeTokenAuth {
    token: String,
}

impl BridgeTokenAuth {
    pub fn new(token: &str) -> Self {
        Self { token: token.to_string() }
    }
}

impl ValidateRequest<Body> for BridgeTokenAuth {
    type ResponseBody = Body;

    fn validate(
        &mut self,
        request: &mut Request<Body>,
    ) -> Result<(), Response<Self::ResponseBody>> {
        let provided = request.headers().get(BRIDGE_TOKEN_HEADER).and_then(|value| value.to_str().ok());

        match provided {
            Some(token) if token == self.token => Ok(()),
            Some(_) => Err(AppError::new("Invalid bridge token", "Session events require a valid bridge token")
                .with_status(StatusCode::UNAUTHORIZED, "Unauthorized")
                .into_response()),
            None => Err(AppError::new("Missing bridge token", "Session events require a valid bridge token")
                .with_status(StatusCode::UNAUTHORIZED, "Unauthorized")
                .into_response()),
        }
    }
}
