use crate::domain::payment::RoutedPayment;
use crate::domain::routing::HealthSample;
use anyhow::Result;

pub mod http;
pub mod mock;

/// One upstream payment processor. The prober and forwarder depend only on
/// this seam; which slot (default or fallback) an implementation fills is the
/// caller's business.
#[async_trait::async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Probe the upstream's health endpoint. Never errors: transport
    /// failures, bad statuses, undecodable bodies, and timeouts all come
    /// back as a failing sample.
    async fn check_health(&self) -> HealthSample;

    /// Hand one payment to the upstream. The caller treats the payment as
    /// resolved whether or not this succeeds.
    async fn forward_payment(&self, payment: &RoutedPayment) -> Result<()>;
}
