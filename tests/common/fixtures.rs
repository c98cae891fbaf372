//! Event factories for integration tests.

use account_replay::account::{
    AccountActivated, AccountClosed, AccountCreated, AccountDeactivated, AccountEvent,
    ClosureReason, Currency, CurrencyChanged, DeactivationReason, Event, MoneyDeposited,
    MoneyWithdrawn,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

pub const ACCOUNT_ID: &str = "ACC-0001";
pub const CUSTOMER_ID: &str = "CUST-0001";

/// Fixed instant the factory timestamps count from.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
}

/// Timestamp `minutes` after [`epoch`].
pub fn at(minutes: i64) -> DateTime<Utc> {
    epoch() + Duration::minutes(minutes)
}

pub struct EventFactory;

impl EventFactory {
    pub fn created(initial_balance: Decimal, currency: Currency) -> AccountEvent {
        AccountEvent::Created(AccountCreated {
            account_id: ACCOUNT_ID.to_string(),
            initial_balance,
            currency,
            customer_id: Some(CUSTOMER_ID.to_string()),
        })
    }

    pub fn created_usd(initial_balance: i64) -> AccountEvent {
        Self::created(Decimal::from(initial_balance), Currency::USD)
    }

    pub fn deposited(amount: i64) -> AccountEvent {
        AccountEvent::Deposited(MoneyDeposited::new(Decimal::from(amount)))
    }

    pub fn withdrawn(amount: i64) -> AccountEvent {
        AccountEvent::Withdrawn(MoneyWithdrawn::new(Decimal::from(amount)))
    }

    pub fn deposited_exact(amount: Decimal) -> AccountEvent {
        AccountEvent::Deposited(MoneyDeposited::new(amount))
    }

    pub fn withdrawn_exact(amount: Decimal) -> AccountEvent {
        AccountEvent::Withdrawn(MoneyWithdrawn::new(amount))
    }

    pub fn deactivated(reason: DeactivationReason, minutes: i64) -> AccountEvent {
        AccountEvent::Deactivated(AccountDeactivated {
            reason,
            timestamp: at(minutes),
        })
    }

    pub fn activated(minutes: i64) -> AccountEvent {
        AccountEvent::Activated(AccountActivated {
            timestamp: at(minutes),
        })
    }

    pub fn closed(reason: ClosureReason, minutes: i64) -> AccountEvent {
        AccountEvent::Closed(AccountClosed {
            reason,
            timestamp: at(minutes),
        })
    }

    pub fn currency_changed(
        new_currency: Currency,
        new_balance: Decimal,
        minutes: i64,
    ) -> AccountEvent {
        AccountEvent::CurrencyChanged(CurrencyChanged {
            new_currency,
            new_balance,
            timestamp: at(minutes),
        })
    }
}

/// Numbers `events` 1, 2, 3, ... in order.
pub fn sequenced<I>(events: I) -> Vec<Event>
where
    I: IntoIterator<Item = AccountEvent>,
{
    (1..)
        .zip(events)
        .map(|(sequence, event)| Event::new(sequence, event))
        .collect()
}

/// Numbers `events` with the given sequence numbers.
pub fn numbered<I>(sequences: &[u64], events: I) -> Vec<Event>
where
    I: IntoIterator<Item = AccountEvent>,
{
    sequences
        .iter()
        .zip(events)
        .map(|(sequence, event)| Event::new(*sequence, event))
        .collect()
}
