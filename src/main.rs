use payment_router::bus::channel_redis::RedisChannel;
use payment_router::bus::StateChannel;
use payment_router::config::AppConfig;
use payment_router::domain::routing::RouterState;
use payment_router::processors::http::HttpProcessor;
use payment_router::processors::PaymentProcessor;
use payment_router::service::admission::AdmissionQueue;
use payment_router::service::forwarder::Forwarder;
use payment_router::service::prober::HealthProber;
use payment_router::summary::listener::{run_periodic_cleanup, SummaryListener};
use payment_router::summary::store::SummaryStore;
use payment_router::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const SUMMARY_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let bus: Arc<dyn StateChannel> = Arc::new(RedisChannel::new(&cfg.redis_url)?);
    let router = Arc::new(RouterState::new());
    let store = Arc::new(SummaryStore::new());

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .build()?;

    let default_processor: Arc<dyn PaymentProcessor> = Arc::new(HttpProcessor {
        base_url: cfg.default_processor_url.clone(),
        client: client.clone(),
        probe_timeout_ms: cfg.probe_timeout_ms,
        forward_timeout_ms: cfg.forward_timeout_ms,
    });
    let fallback_processor: Arc<dyn PaymentProcessor> = Arc::new(HttpProcessor {
        base_url: cfg.fallback_processor_url.clone(),
        client,
        probe_timeout_ms: cfg.probe_timeout_ms,
        forward_timeout_ms: cfg.forward_timeout_ms,
    });

    let (queue, queue_rx) = AdmissionQueue::bounded(cfg.queue_capacity);
    let shutdown = CancellationToken::new();

    let prober = HealthProber {
        default_processor: default_processor.clone(),
        fallback_processor: fallback_processor.clone(),
        router: router.clone(),
        bus: bus.clone(),
        interval: Duration::from_millis(cfg.probe_interval_ms),
    };
    tokio::spawn(prober.run(shutdown.clone()));

    let forwarder = Forwarder {
        rx: queue_rx,
        router: router.clone(),
        default_processor,
        fallback_processor,
        bus: bus.clone(),
        topic: cfg.payments_topic.clone(),
    };
    tokio::spawn(forwarder.run(shutdown.clone()));

    let listener = SummaryListener {
        bus: bus.clone(),
        topic: cfg.payments_topic.clone(),
        store: store.clone(),
    };
    tokio::spawn(listener.run(shutdown.clone()));
    tokio::spawn(run_periodic_cleanup(
        store.clone(),
        SUMMARY_CLEANUP_INTERVAL,
        shutdown.clone(),
    ));

    let state = AppState {
        queue,
        summary: store,
        router,
        bus,
    };
    let app = payment_router::api_router(state);

    let tcp = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(tcp, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    // Stop the background loops and give in-flight upstream calls a moment.
    shutdown.cancel();
    tokio::time::sleep(SHUTDOWN_GRACE).await;
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install ctrl-c handler: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => tracing::error!("failed to install SIGTERM handler: {}", err),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received");
    shutdown.cancel();
}
