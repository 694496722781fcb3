use crate::bus::StateChannel;
use crate::domain::payment::RoutedPayment;
use crate::summary::store::SummaryStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Feeds the local summary store from the broadcast topic. Undecodable
/// payloads are logged and skipped; the loop only stops on shutdown or when
/// the subscription stream ends.
pub struct SummaryListener {
    pub bus: Arc<dyn StateChannel>,
    pub topic: String,
    pub store: Arc<SummaryStore>,
}

impl SummaryListener {
    pub async fn run(self, shutdown: CancellationToken) {
        let mut rx = match self.bus.subscribe(&self.topic).await {
            Ok(rx) => rx,
            Err(err) => {
                tracing::error!(topic = %self.topic, "subscribe failed: {}", err);
                return;
            }
        };

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                received = rx.recv() => match received {
                    None => {
                        tracing::error!(topic = %self.topic, "subscription stream ended");
                        return;
                    }
                    Some(payload) => match RoutedPayment::decode(&payload) {
                        Ok(payment) => {
                            tracing::debug!(
                                correlation_id = %payment.correlation_id,
                                "payment record received"
                            );
                            self.store.record(payment);
                        }
                        Err(err) => {
                            tracing::warn!("skipping undecodable payment record: {}", err);
                        }
                    },
                },
            }
        }
    }
}

/// Ticks the store's age/size cleanup independently of message arrival.
pub async fn run_periodic_cleanup(
    store: Arc<SummaryStore>,
    every: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately; skip it.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => return,
            _ = ticker.tick() => {
                store.cleanup_old_entries();
                tracing::debug!(size = store.len(), "summary cleanup pass complete");
            }
        }
    }
}
