use crate::domain::payment::PaymentRequest;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Bounded intake buffer between HTTP admission and the drain loop.
/// Producers never block: at capacity the payment is dropped and the drop is
/// visible only in the logs. Admission is best-effort by contract.
#[derive(Clone)]
pub struct AdmissionQueue {
    tx: mpsc::Sender<PaymentRequest>,
}

impl AdmissionQueue {
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<PaymentRequest>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn enqueue(&self, request: PaymentRequest) {
        match self.tx.try_send(request) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(
                    correlation_id = %dropped.correlation_id,
                    "admission queue full, payment dropped"
                );
            }
            Err(TrySendError::Closed(dropped)) => {
                tracing::error!(
                    correlation_id = %dropped.correlation_id,
                    "admission queue closed, payment dropped"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str) -> PaymentRequest {
        PaymentRequest {
            correlation_id: id.to_string(),
            amount: 10.0,
        }
    }

    #[tokio::test]
    async fn overflow_drops_without_blocking() {
        let (queue, mut rx) = AdmissionQueue::bounded(3);
        for id in ["a", "b", "c", "d"] {
            queue.enqueue(request(id));
        }

        // The first three survive in FIFO order; the fourth was dropped.
        for expected in ["a", "b", "c"] {
            assert_eq!(rx.recv().await.unwrap().correlation_id, expected);
        }
        assert!(rx.try_recv().is_err());
    }
}
