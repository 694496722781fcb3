use chrono::Utc;
use payment_router::domain::payment::{ProcessorKind, RoutedPayment};

#[test]
fn broadcast_record_round_trips() {
    let payment = RoutedPayment {
        correlation_id: uuid::Uuid::new_v4().to_string(),
        amount: 1234.56,
        requested_at: Utc::now(),
        processor: ProcessorKind::Fallback,
    };

    let bytes = payment.encode().unwrap();
    let decoded = RoutedPayment::decode(&bytes).unwrap();
    assert_eq!(decoded, payment);
}

#[test]
fn garbage_payload_fails_to_decode() {
    assert!(RoutedPayment::decode(b"definitely not a payment record").is_err());
}
