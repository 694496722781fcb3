use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use payment_router::domain::payment::{ProcessorKind, RoutedPayment};
use payment_router::domain::routing::{HealthSample, PROBE_TIMEOUT_SENTINEL_MS};
use payment_router::processors::http::HttpProcessor;
use payment_router::processors::PaymentProcessor;
use serde_json::{json, Value};
use std::net::SocketAddr;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn processor(addr: SocketAddr) -> HttpProcessor {
    HttpProcessor {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        probe_timeout_ms: 500,
        forward_timeout_ms: 500,
    }
}

#[tokio::test]
async fn healthy_probe_decodes_sample() {
    let app = Router::new().route(
        "/payments/service-health",
        get(|| async { Json(json!({"failing": false, "minResponseTime": 42})) }),
    );
    let addr = serve(app).await;

    let sample = processor(addr).check_health().await;
    assert_eq!(
        sample,
        HealthSample {
            failing: false,
            min_response_time: 42
        }
    );
}

#[tokio::test]
async fn probe_timeout_yields_sentinel_not_error() {
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            if let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        }
    });

    let sample = processor(addr).check_health().await;
    assert!(sample.failing);
    assert_eq!(sample.min_response_time, PROBE_TIMEOUT_SENTINEL_MS);
}

#[tokio::test]
async fn refused_connection_is_hard_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sample = processor(addr).check_health().await;
    assert_eq!(sample, HealthSample::hard_failure());
}

#[tokio::test]
async fn undecodable_health_body_is_hard_failure() {
    let app = Router::new().route(
        "/payments/service-health",
        get(|| async { "service is fine" }),
    );
    let addr = serve(app).await;

    let sample = processor(addr).check_health().await;
    assert_eq!(sample, HealthSample::hard_failure());
}

#[tokio::test]
async fn error_status_is_hard_failure() {
    let app = Router::new().route(
        "/payments/service-health",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = serve(app).await;

    let sample = processor(addr).check_health().await;
    assert_eq!(sample, HealthSample::hard_failure());
}

#[tokio::test]
async fn forward_posts_expected_wire_body() {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Value>(1);
    let app = Router::new().route(
        "/payments",
        post(move |Json(body): Json<Value>| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(body).await;
                StatusCode::OK
            }
        }),
    );
    let addr = serve(app).await;

    let payment = RoutedPayment {
        correlation_id: "abc".to_string(),
        amount: 50.0,
        requested_at: Utc::now(),
        processor: ProcessorKind::Default,
    };
    processor(addr).forward_payment(&payment).await.unwrap();

    let body = rx.recv().await.unwrap();
    assert_eq!(body["correlation_id"], "abc");
    assert_eq!(body["amount"], 50.0);
    let requested_at = body["requestedAt"].as_str().unwrap();
    chrono::DateTime::parse_from_rfc3339(requested_at).unwrap();
    // The upstream wire body carries exactly these three fields.
    assert_eq!(body.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn forward_error_status_is_reported() {
    let app = Router::new().route(
        "/payments",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = serve(app).await;

    let payment = RoutedPayment {
        correlation_id: "abc".to_string(),
        amount: 50.0,
        requested_at: Utc::now(),
        processor: ProcessorKind::Default,
    };
    assert!(processor(addr).forward_payment(&payment).await.is_err());
}
