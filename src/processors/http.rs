use crate::domain::payment::RoutedPayment;
use crate::domain::routing::HealthSample;
use crate::processors::PaymentProcessor;
use anyhow::Result;
use serde_json::json;

/// Real upstream reached over HTTP. The shared `reqwest::Client` carries the
/// connection pool; a pooled connection is returned on every exit path,
/// including timeouts.
pub struct HttpProcessor {
    pub base_url: String,
    pub client: reqwest::Client,
    pub probe_timeout_ms: u64,
    pub forward_timeout_ms: u64,
}

#[async_trait::async_trait]
impl PaymentProcessor for HttpProcessor {
    async fn check_health(&self) -> HealthSample {
        let url = format!("{}/payments/service-health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_millis(self.probe_timeout_ms))
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => match r.json::<HealthSample>().await {
                Ok(sample) => sample,
                Err(e) if e.is_timeout() => HealthSample::timed_out(),
                Err(_) => HealthSample::hard_failure(),
            },
            Ok(_) => HealthSample::hard_failure(),
            Err(e) if e.is_timeout() => HealthSample::timed_out(),
            Err(_) => HealthSample::hard_failure(),
        }
    }

    async fn forward_payment(&self, payment: &RoutedPayment) -> Result<()> {
        let url = format!("{}/payments", self.base_url);
        let body = json!({
            "correlation_id": payment.correlation_id,
            "amount": payment.amount,
            "requestedAt": payment.requested_at,
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.forward_timeout_ms))
            .send()
            .await?;

        if !resp.status().is_success() {
            anyhow::bail!("processor returned {}", resp.status());
        }
        Ok(())
    }
}
