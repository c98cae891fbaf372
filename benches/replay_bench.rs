//! Benchmark for account replay.
//!
//! Measures replay throughput over logs of growing length, for typed events,
//! for raw events that have to be decoded first, and for the cost of the
//! strict sequence check.

use account_replay::account::{
    AccountCreated, AccountEvent, Currency, Event, MoneyDeposited, MoneyWithdrawn,
};
use account_replay::envelope::RawEvent;
use account_replay::replay::{ReplayConfig, Replayer, SequencePolicy};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::hint::black_box;

/// Creation followed by alternating deposits and withdrawals of one unit.
fn build_log(length: u64) -> Vec<Event> {
    let created = AccountEvent::Created(AccountCreated {
        account_id: "ACC-BENCH".to_string(),
        initial_balance: Decimal::from(1_000),
        currency: Currency::USD,
        customer_id: None,
    });

    std::iter::once(Event::new(1, created))
        .chain((2..=length).map(|sequence| {
            let amount = Decimal::new(125, 2);
            let event = if sequence % 2 == 0 {
                AccountEvent::Deposited(MoneyDeposited::new(amount))
            } else {
                AccountEvent::Withdrawn(MoneyWithdrawn::new(amount))
            };
            Event::new(sequence, event)
        }))
        .collect()
}

// =============================================================================
// Typed Replay Benchmark
// =============================================================================

fn benchmark_replay(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("replay");
    let replayer = Replayer::default();

    for length in [10_u64, 100, 1_000, 10_000] {
        let events = build_log(length);
        group.throughput(Throughput::Elements(length));

        group.bench_with_input(
            BenchmarkId::new("typed", length),
            &events,
            |bencher, events| {
                bencher.iter(|| black_box(replayer.replay(black_box(events))));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Raw Replay Benchmark
// =============================================================================

fn benchmark_replay_raw(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("replay_raw");
    let replayer = Replayer::default();

    for length in [10_u64, 100, 1_000] {
        let raw: Vec<RawEvent> = build_log(length)
            .iter()
            .filter_map(|event| event.to_raw().ok())
            .collect();
        group.throughput(Throughput::Elements(length));

        group.bench_with_input(BenchmarkId::new("raw", length), &raw, |bencher, raw| {
            bencher.iter(|| black_box(replayer.replay_raw(black_box(raw))));
        });
    }

    group.finish();
}

// =============================================================================
// Sequence Policy Benchmark
// =============================================================================

fn benchmark_sequence_policy(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sequence_policy");
    let events = build_log(10_000);

    for policy in [SequencePolicy::Strict, SequencePolicy::Permissive] {
        let replayer = Replayer::new(ReplayConfig::default().with_sequence_policy(policy));

        group.bench_with_input(
            BenchmarkId::new(policy.name(), events.len()),
            &events,
            |bencher, events| {
                bencher.iter(|| black_box(replayer.replay(black_box(events))));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_replay,
    benchmark_replay_raw,
    benchmark_sequence_policy
);

criterion_main!(benches);
