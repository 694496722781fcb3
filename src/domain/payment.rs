use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Inbound payment submission. The correlation id is caller-chosen and
/// assumed globally unique; nothing here deduplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub correlation_id: String,
    pub amount: f64,
}

/// Which upstream processor handled a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorKind {
    Default,
    Fallback,
}

/// A payment at the moment it left the drain loop: the original request plus
/// the dequeue timestamp and the upstream it was handed to. This is the unit
/// published on the broadcast topic and stored in the summary store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedPayment {
    pub correlation_id: String,
    pub amount: f64,
    #[serde(rename = "requestedAt")]
    pub requested_at: chrono::DateTime<chrono::Utc>,
    pub processor: ProcessorKind,
}

impl RoutedPayment {
    /// Encode for the broadcast topic.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a payload received from the broadcast topic.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketTotals {
    pub total_requests: u64,
    pub total_amount: f64,
}

/// Range-summary response shape: one bucket per upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub default: BucketTotals,
    pub fallback: BucketTotals,
}

impl Summary {
    pub fn bucket_mut(&mut self, processor: ProcessorKind) -> &mut BucketTotals {
        match processor {
            ProcessorKind::Default => &mut self.default,
            ProcessorKind::Fallback => &mut self.fallback,
        }
    }
}
