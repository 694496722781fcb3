use crate::domain::payment::RoutedPayment;
use crate::domain::routing::HealthSample;
use crate::processors::PaymentProcessor;
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Scriptable upstream for tests: health is settable, forwarded payments are
/// recorded, and forwarding can be made to fail.
pub struct MockProcessor {
    health: Mutex<HealthSample>,
    reject_forwards: AtomicBool,
    forwarded: Mutex<Vec<RoutedPayment>>,
}

impl MockProcessor {
    pub fn healthy() -> Self {
        Self {
            health: Mutex::new(HealthSample {
                failing: false,
                min_response_time: 100,
            }),
            reject_forwards: AtomicBool::new(false),
            forwarded: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        let mock = Self::healthy();
        mock.set_health(HealthSample::hard_failure());
        mock
    }

    pub fn set_health(&self, sample: HealthSample) {
        *self.health.lock() = sample;
    }

    pub fn set_reject_forwards(&self, reject: bool) {
        self.reject_forwards.store(reject, Ordering::Relaxed);
    }

    pub fn forwarded(&self) -> Vec<RoutedPayment> {
        self.forwarded.lock().clone()
    }

    pub fn forwarded_count(&self) -> usize {
        self.forwarded.lock().len()
    }
}

#[async_trait::async_trait]
impl PaymentProcessor for MockProcessor {
    async fn check_health(&self) -> HealthSample {
        *self.health.lock()
    }

    async fn forward_payment(&self, payment: &RoutedPayment) -> Result<()> {
        self.forwarded.lock().push(payment.clone());
        if self.reject_forwards.load(Ordering::Relaxed) {
            anyhow::bail!("mock processor rejected payment");
        }
        Ok(())
    }
}
