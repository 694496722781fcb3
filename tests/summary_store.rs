use chrono::{DateTime, Duration, Utc};
use payment_router::domain::payment::{ProcessorKind, RoutedPayment, Summary};
use payment_router::summary::store::{SummaryStore, MAX_SUMMARY_SIZE};

fn payment(
    id: &str,
    amount: f64,
    requested_at: DateTime<Utc>,
    processor: ProcessorKind,
) -> RoutedPayment {
    RoutedPayment {
        correlation_id: id.to_string(),
        amount,
        requested_at,
        processor,
    }
}

#[test]
fn upsert_overwrites_in_place_without_moving() {
    let store = SummaryStore::new();
    let now = Utc::now();

    store.record(payment("a", 10.0, now, ProcessorKind::Default));
    store.record(payment("b", 20.0, now, ProcessorKind::Default));
    store.record(payment("a", 99.0, now, ProcessorKind::Default));

    assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);

    let summary = store.summarize(now - Duration::hours(1), now + Duration::hours(1));
    assert_eq!(summary.default.total_requests, 2);
    assert_eq!(summary.default.total_amount, 119.0);
}

#[test]
fn cleanup_drops_entries_past_retention() {
    let store = SummaryStore::new();
    let now = Utc::now();

    store.record(payment("old", 1.0, now - Duration::hours(25), ProcessorKind::Default));
    store.record(payment("fresh", 1.0, now - Duration::minutes(30), ProcessorKind::Default));

    store.cleanup_before(now);

    assert_eq!(store.len(), 1);
    assert_eq!(store.keys(), vec!["fresh".to_string()]);
}

#[test]
fn cleanup_is_idempotent_on_empty_store() {
    let store = SummaryStore::new();
    store.cleanup_before(Utc::now());
    assert!(store.is_empty());
}

#[test]
fn size_cap_evicts_oldest_first() {
    let store = SummaryStore::new();
    let now = Utc::now();

    for i in 0..MAX_SUMMARY_SIZE + 5 {
        store.record(payment(&format!("p{i}"), 1.0, now, ProcessorKind::Default));
    }

    // record() runs cleanup inline whenever the cap is exceeded.
    assert_eq!(store.len(), MAX_SUMMARY_SIZE);
    assert_eq!(store.keys().first().map(String::as_str), Some("p5"));
}

#[test]
fn summarize_excludes_exact_boundaries() {
    let store = SummaryStore::new();
    let from = Utc::now();
    let to = from + Duration::minutes(10);

    store.record(payment("at-from", 1.0, from, ProcessorKind::Default));
    store.record(payment("inside", 2.0, from + Duration::minutes(5), ProcessorKind::Default));
    store.record(payment("at-to", 4.0, to, ProcessorKind::Default));

    let summary = store.summarize(from, to);
    assert_eq!(summary.default.total_requests, 1);
    assert_eq!(summary.default.total_amount, 2.0);
}

#[test]
fn summarize_on_empty_store_is_zeroed() {
    let store = SummaryStore::new();
    let now = Utc::now();
    assert_eq!(store.summarize(now - Duration::hours(1), now), Summary::default());
}

#[test]
fn summarize_buckets_by_processor() {
    let store = SummaryStore::new();
    let now = Utc::now();

    store.record(payment("d1", 50.0, now, ProcessorKind::Default));
    store.record(payment("d2", 150.0, now, ProcessorKind::Default));
    store.record(payment("f1", 30.0, now, ProcessorKind::Fallback));

    let summary = store.summarize(now - Duration::hours(1), now + Duration::hours(1));
    assert_eq!(summary.default.total_requests, 2);
    assert_eq!(summary.default.total_amount, 200.0);
    assert_eq!(summary.fallback.total_requests, 1);
    assert_eq!(summary.fallback.total_amount, 30.0);
}
