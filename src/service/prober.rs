use crate::bus::StateChannel;
use crate::domain::routing::{decide, RouterState, RoutingDecision, ROUTING_DECISION_KEY};
use crate::processors::PaymentProcessor;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Probes both upstreams on a fixed cadence and is the only writer of the
/// routing decision.
pub struct HealthProber {
    pub default_processor: Arc<dyn PaymentProcessor>,
    pub fallback_processor: Arc<dyn PaymentProcessor>,
    pub router: Arc<RouterState>,
    pub bus: Arc<dyn StateChannel>,
    pub interval: Duration,
}

impl HealthProber {
    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            let started = std::time::Instant::now();

            let decision = self.cycle().await;
            tracing::debug!(decision = decision.as_str(), "probe cycle complete");

            // Mirrored for operators; routing itself never reads this back.
            if let Err(err) = self.bus.set(ROUTING_DECISION_KEY, decision.as_str()).await {
                tracing::warn!("failed to mirror routing decision: {}", err);
            }

            // Drift-corrected: sleep only for what is left of the interval.
            let wait = self.interval.saturating_sub(started.elapsed());
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    /// One probe cycle. Both probes run in parallel and both must complete
    /// (or time out) before the decision is made; the cycle always produces
    /// a decision.
    pub async fn cycle(&self) -> RoutingDecision {
        let (default_sample, fallback_sample) = tokio::join!(
            self.default_processor.check_health(),
            self.fallback_processor.check_health(),
        );

        let decision = decide(default_sample, fallback_sample);
        self.router.set_decision(decision);
        decision
    }
}
