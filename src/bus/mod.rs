use anyhow::Result;
use tokio::sync::mpsc;

pub mod channel_memory;
pub mod channel_redis;

/// The shared key-value/pub-sub store, consumed strictly through this seam.
/// Exactly one topic carries payment-record broadcasts; get/set exist for
/// small operator-visible diagnostics.
#[async_trait::async_trait]
pub trait StateChannel: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()>;

    /// Subscribe to a topic. Only payloads published after the subscription
    /// is established are delivered; the receiver closes when the underlying
    /// stream ends.
    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<Vec<u8>>>;
}
