use crate::domain::payment::{RoutedPayment, Summary};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::RwLock;

pub const MAX_SUMMARY_SIZE: usize = 10_000;
pub const MAX_AGE_HOURS: i64 = 24;

/// Per-process materialized view of every payment record seen on the
/// broadcast topic, in arrival order. Queries only reflect locally-received
/// messages; convergence across processes comes from the channel, not from
/// this store.
pub struct SummaryStore {
    entries: RwLock<IndexMap<String, RoutedPayment>>,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// Upsert one received record. A replay of an already-seen correlation id
    /// overwrites in place without moving its position. If the store grew
    /// past its cap, cleanup runs before the lock is released.
    pub fn record(&self, payment: RoutedPayment) {
        let mut entries = self.entries.write();
        entries.insert(payment.correlation_id.clone(), payment);
        if entries.len() > MAX_SUMMARY_SIZE {
            Self::cleanup(&mut entries, Utc::now());
        }
    }

    /// Periodic-task entry point.
    pub fn cleanup_old_entries(&self) {
        self.cleanup_before(Utc::now());
    }

    /// Drop entries older than the retention window relative to `now`, then
    /// drop oldest-first down to the size cap. Idempotent.
    pub fn cleanup_before(&self, now: DateTime<Utc>) {
        let mut entries = self.entries.write();
        Self::cleanup(&mut entries, now);
    }

    fn cleanup(entries: &mut IndexMap<String, RoutedPayment>, now: DateTime<Utc>) {
        let cutoff = now - chrono::Duration::hours(MAX_AGE_HOURS);
        entries.retain(|_, payment| payment.requested_at >= cutoff);

        if entries.len() > MAX_SUMMARY_SIZE {
            let excess = entries.len() - MAX_SUMMARY_SIZE;
            entries.drain(..excess);
        }
    }

    /// Range scan, oldest to newest, both bounds strictly exclusive.
    pub fn summarize(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Summary {
        let entries = self.entries.read();
        let mut summary = Summary::default();
        for payment in entries.values() {
            if payment.requested_at > from && payment.requested_at < to {
                let bucket = summary.bucket_mut(payment.processor);
                bucket.total_requests += 1;
                bucket.total_amount += payment.amount;
            }
        }
        summary
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Correlation ids in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl Default for SummaryStore {
    fn default() -> Self {
        Self::new()
    }
}
