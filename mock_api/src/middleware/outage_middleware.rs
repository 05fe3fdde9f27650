use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::MockState;

/// Answers 503 for every request while the failure switch is on.
pub async fn outage_middleware(
    State(state): State<MockState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if state.is_failing() {
        log::warn!("rejecting {} {} (outage switch on)", req.method(), req.uri());
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "message": "Service unavailable" })),
        )
            .into_response();
    }
    next.run(req).await
}
