use crate::domain::routing::ROUTING_DECISION_KEY;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let channel_ok = state.bus.get(ROUTING_DECISION_KEY).await.is_ok();

    let status = if channel_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "ready": channel_ok,
            "channel": channel_ok,
            "routing": state.router.decision().as_str(),
        })),
    )
        .into_response()
}

pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"alive": true}))).into_response()
}
