use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub mod bus;
pub mod config;
pub mod domain {
    pub mod payment;
    pub mod routing;
}
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod payments;
        pub mod summary;
    }
}
pub mod processors;
pub mod service {
    pub mod admission;
    pub mod forwarder;
    pub mod prober;
}
pub mod summary {
    pub mod listener;
    pub mod store;
}

#[derive(Clone)]
pub struct AppState {
    pub queue: service::admission::AdmissionQueue,
    pub summary: Arc<summary::store::SummaryStore>,
    pub router: Arc<domain::routing::RouterState>,
    pub bus: Arc<dyn bus::StateChannel>,
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/payments", post(http::handlers::payments::accept_payment))
        .route("/payments-summary", get(http::handlers::summary::payment_summary))
        .route("/ops/readiness", get(http::handlers::ops::readiness))
        .route("/ops/liveness", get(http::handlers::ops::liveness))
        .with_state(state)
}
