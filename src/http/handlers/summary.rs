use crate::domain::payment::Summary;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /payments-summary?from=..&to=.. — both params optional together: if
/// either is missing the summary is zeroed, not an error.
pub async fn payment_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let (Some(from), Some(to)) = (query.from, query.to) else {
        return (StatusCode::OK, Json(Summary::default())).into_response();
    };

    let Some(from) = parse_timestamp(&from) else {
        return (StatusCode::BAD_REQUEST, "invalid 'from' timestamp").into_response();
    };
    let Some(to) = parse_timestamp(&to) else {
        return (StatusCode::BAD_REQUEST, "invalid 'to' timestamp").into_response();
    };

    (StatusCode::OK, Json(state.summary.summarize(from, to))).into_response()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
