//! Tests for replaying raw stored events.

mod common;

use account_replay::account::{AccountStatus, ClosureReason, Currency, ReplayError, StreamViolation};
use account_replay::envelope::RawEvent;
use account_replay::replay::{ReplayConfig, Replayer};
use common::{EventFactory, init_tracing, sequenced};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use serde_json::json;

#[fixture]
fn replayer() -> Replayer {
    init_tracing();
    Replayer::default()
}

fn created_raw(sequence: u64) -> RawEvent {
    RawEvent::new(
        sequence,
        "AccountCreated",
        json!({
            "account_id": "ACC-RAW",
            "initial_balance": "500.00",
            "currency": "EUR",
            "customer_id": "CUST-RAW"
        }),
    )
}

#[rstest]
fn raw_log_replays_like_typed_log(replayer: Replayer) {
    let raw = vec![
        created_raw(1),
        RawEvent::new(2, "MoneyWithdrawn", json!({ "amount": "120.50" })),
        RawEvent::new(
            3,
            "AccountDeactivated",
            json!({ "reason": "ComplianceReview", "timestamp": "2024-02-01T10:00:00Z" }),
        ),
    ];

    let state = replayer.replay_raw(&raw).unwrap().unwrap();

    assert_eq!(state.account_id, "ACC-RAW");
    assert_eq!(state.currency, Currency::EUR);
    assert_eq!(state.balance, Decimal::new(37950, 2));
    assert_eq!(state.status, AccountStatus::Disabled);
    assert_eq!(state.log[0].detail, "ComplianceReview");
}

#[rstest]
fn empty_raw_log_is_absent(replayer: Replayer) {
    assert_eq!(replayer.replay_raw(&[]), Ok(None));
}

#[rstest]
fn unknown_event_type_is_not_supported(replayer: Replayer) {
    let raw = vec![
        created_raw(1),
        RawEvent::new(2, "InterestAccrued", json!({ "amount": "1.00" })),
    ];

    let error = replayer.replay_raw(&raw).unwrap_err();

    assert_eq!(
        error,
        ReplayError::EventTypeNotSupported {
            sequence: 2,
            event_type: "InterestAccrued".to_string(),
        }
    );
    assert_eq!(error.code(), 162);
    assert_eq!(error.label(), "ERROR_EVENT_NOT_SUPPORTED");
}

#[rstest]
fn malformed_payload_is_an_invalid_stream(replayer: Replayer) {
    let raw = vec![
        created_raw(1),
        RawEvent::new(2, "MoneyDeposited", json!({ "sum": "1.00" })),
    ];

    let error = replayer.replay_raw(&raw).unwrap_err();

    assert!(matches!(
        error,
        ReplayError::InvalidEventStream(StreamViolation::MalformedPayload { sequence: 2, .. })
    ));
    assert_eq!(error.code(), 511);
}

#[rstest]
fn numbering_is_checked_before_decoding(replayer: Replayer) {
    let raw = vec![
        created_raw(1),
        RawEvent::new(2, "InterestAccrued", json!({})),
        RawEvent::new(4, "MoneyDeposited", json!({ "amount": "1.00" })),
    ];

    assert!(matches!(
        replayer.replay_raw(&raw),
        Err(ReplayError::InvalidEventStream(
            StreamViolation::SequenceMismatch { position: 3, .. }
        ))
    ));
}

#[rstest]
fn decoding_completes_before_rules_apply(replayer: Replayer) {
    // The deposit at 2 breaks the ceiling, but the unknown type at 3 is found first.
    let raw = vec![
        created_raw(1),
        RawEvent::new(2, "MoneyDeposited", json!({ "amount": "9999.00" })),
        RawEvent::new(3, "InterestAccrued", json!({})),
    ];

    assert!(matches!(
        replayer.replay_raw(&raw),
        Err(ReplayError::EventTypeNotSupported { sequence: 3, .. })
    ));
}

#[rstest]
fn max_events_applies_to_raw_logs() {
    init_tracing();
    let replayer = Replayer::new(ReplayConfig::default().with_max_events(1));

    let result = replayer.replay_raw(&[created_raw(1), created_raw(2)]);

    assert_eq!(
        result,
        Err(ReplayError::InvalidEventStream(StreamViolation::TooManyEvents {
            limit: 1,
            actual: 2,
        }))
    );
}

#[rstest]
fn typed_log_survives_conversion_to_raw(replayer: Replayer) {
    let events = sequenced([
        EventFactory::created_usd(100),
        EventFactory::deposited(40),
        EventFactory::currency_changed(Currency::JPY, Decimal::from(21_000), 3),
        EventFactory::closed(ClosureReason::BankDecision, 4),
    ]);
    let raw: Vec<RawEvent> = events
        .iter()
        .map(|event| event.to_raw().unwrap())
        .collect();

    assert_eq!(replayer.replay_raw(&raw), replayer.replay(&events));
}

#[rstest]
fn raw_event_serializes_as_stored_record() {
    let raw = RawEvent::new(7, "MoneyDeposited", json!({ "amount": "3.00" }));

    let value = serde_json::to_value(&raw).unwrap();

    assert_eq!(
        value,
        json!({
            "sequence": 7,
            "event_type": "MoneyDeposited",
            "payload": { "amount": "3.00" }
        })
    );
    assert_eq!(serde_json::from_value::<RawEvent>(value).unwrap(), raw);
}
