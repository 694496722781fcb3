use crate::bus::StateChannel;
use crate::domain::payment::{PaymentRequest, ProcessorKind, RoutedPayment};
use crate::domain::routing::RouterState;
use crate::processors::PaymentProcessor;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const RETRY_BACKOFF_INITIAL: Duration = Duration::from_millis(100);
const RETRY_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Single consumer of the admission queue. While the routing decision is
/// queue-only, dequeued payments are parked and retried with a capped
/// backoff; parked payments are never dropped but may be reordered relative
/// to later arrivals. Once a target is selected the payment is stamped,
/// handed to that upstream, and broadcast as processed regardless of how the
/// upstream call went.
pub struct Forwarder {
    pub rx: mpsc::Receiver<PaymentRequest>,
    pub router: Arc<RouterState>,
    pub default_processor: Arc<dyn PaymentProcessor>,
    pub fallback_processor: Arc<dyn PaymentProcessor>,
    pub bus: Arc<dyn StateChannel>,
    pub topic: String,
}

impl Forwarder {
    pub async fn run(mut self, shutdown: CancellationToken) {
        let mut parked: VecDeque<PaymentRequest> = VecDeque::new();
        let mut backoff = RETRY_BACKOFF_INITIAL;

        loop {
            // While queue-only, parked payments wait for the prober to flip
            // the decision. New arrivals stay in the intake queue, which is
            // the bound on total buffering.
            if self.router.decision().target().is_none() && !parked.is_empty() {
                tokio::select! {
                    _ = shutdown.cancelled() => return,
                    _ = tokio::time::sleep(backoff) => {
                        backoff = (backoff * 2).min(RETRY_BACKOFF_MAX);
                    }
                }
                continue;
            }

            let item = if let Some(item) = parked.pop_front() {
                item
            } else {
                tokio::select! {
                    _ = shutdown.cancelled() => return,
                    received = self.rx.recv() => match received {
                        Some(item) => item,
                        None => return,
                    },
                }
            };

            match self.router.decision().target() {
                None => parked.push_back(item),
                Some(kind) => {
                    backoff = RETRY_BACKOFF_INITIAL;
                    self.forward(item, kind).await;
                }
            }
        }
    }

    async fn forward(&self, item: PaymentRequest, kind: ProcessorKind) {
        let payment = RoutedPayment {
            correlation_id: item.correlation_id,
            amount: item.amount,
            requested_at: chrono::Utc::now(),
            processor: kind,
        };

        // Outcome does not branch further logic: once handed to an upstream
        // attempt the payment counts as processed.
        if let Err(err) = self.processor_for(kind).forward_payment(&payment).await {
            tracing::warn!(
                correlation_id = %payment.correlation_id,
                processor = ?kind,
                "upstream call failed: {}",
                err
            );
        }

        match payment.encode() {
            Ok(bytes) => {
                if let Err(err) = self.bus.publish(&self.topic, bytes).await {
                    tracing::error!(
                        correlation_id = %payment.correlation_id,
                        "failed to publish payment record: {}",
                        err
                    );
                }
            }
            Err(err) => {
                tracing::error!(
                    correlation_id = %payment.correlation_id,
                    "failed to encode payment record: {}",
                    err
                );
            }
        }
    }

    fn processor_for(&self, kind: ProcessorKind) -> &Arc<dyn PaymentProcessor> {
        match kind {
            ProcessorKind::Default => &self.default_processor,
            ProcessorKind::Fallback => &self.fallback_processor,
        }
    }
}
