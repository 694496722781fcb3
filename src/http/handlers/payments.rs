use crate::domain::payment::PaymentRequest;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Intake boundary: decode, attempt admission, answer 204 unconditionally.
/// The caller never learns about forwarding or upstream results.
pub async fn accept_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(request)) = payload else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    state.queue.enqueue(request);
    StatusCode::NO_CONTENT.into_response()
}
