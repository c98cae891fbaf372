//! The account aggregate and its transition rules.
//!
//! [`Aggregate`] is the value threaded through a replay. It starts out
//! [`Aggregate::Uninitialized`] and becomes [`Aggregate::Open`] once an
//! `AccountCreated` event has been applied. Each call to
//! [`Aggregate::apply`] consumes the current aggregate and returns the next
//! one, so a replay is a plain `try_fold` over the event log.
//!
//! # Transition Rules
//!
//! | Event | Precondition | Effect |
//! |-------|--------------|--------|
//! | `AccountCreated` | uninitialized | opens the account, status `Enabled` |
//! | `MoneyDeposited` | enabled, `amount <= balance` | `balance += amount` |
//! | `MoneyWithdrawn` | enabled, `amount <= balance` | `balance -= amount` |
//! | `AccountDeactivated` | created | status `Disabled`, `DEACTIVATE` entry |
//! | `AccountActivated` | created | if disabled: status `Enabled`, `ACTIVATE` entry |
//! | `AccountClosed` | created | status `Closed`, `CLOSURE` entry |
//! | `CurrencyChanged` | created | currency and balance reset, status `Disabled`, `CURRENCY-CHANGE` entry |
//!
//! Deposits are capped by the current balance: a deposit larger than the
//! balance is rejected with [`ReplayError::MaxBalanceExceeded`]. An account
//! opened with a zero balance therefore accepts no deposits until its
//! balance is reset by a currency change. A money movement whose result does
//! not fit in a `Decimal` is rejected the same way.
//!
//! Initial balances, amounts and reset balances must fit the currency's
//! minor unit (see [`Currency::admits`](crate::account::Currency::admits));
//! anything finer fails with [`StreamViolation::PrecisionExceeded`].
//!
//! Under [`ClosurePolicy::Absorbing`] a closed account rejects every later
//! event. Under [`ClosurePolicy::MonetaryOnly`] only deposits and
//! withdrawals are rejected, and lifecycle events keep being applied.

use rust_decimal::Decimal;

use crate::account::currency::Currency;
use crate::account::errors::{ReplayError, ReplayResult, StreamViolation};
use crate::account::events::{
    AccountActivated, AccountClosed, AccountCreated, AccountDeactivated, AccountEvent,
    CurrencyChanged, Event, MoneyDeposited, MoneyWithdrawn,
};
use crate::account::state::{AccountState, AccountStatus, LogKind, LogMessage};
use crate::replay::config::ClosurePolicy;

/// Detail of the log entry written when a disabled account is enabled again.
pub const REACTIVATION_DETAIL: &str = "Account reactivated";

/// An account aggregate in the middle of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Aggregate {
    /// No `AccountCreated` event has been applied yet.
    #[default]
    Uninitialized,
    /// The account exists.
    Open(AccountState),
}

impl Aggregate {
    /// Applies one event, returning the next aggregate.
    ///
    /// # Errors
    ///
    /// Returns the [`ReplayError`] of the first rule the event violates. The
    /// consumed aggregate is dropped in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use account_replay::account::{
    ///     AccountCreated, AccountEvent, Aggregate, Currency, Event, MoneyWithdrawn,
    /// };
    /// use account_replay::replay::ClosurePolicy;
    /// use rust_decimal::Decimal;
    ///
    /// let created = Event::new(
    ///     1,
    ///     AccountEvent::Created(AccountCreated {
    ///         account_id: "ACC-1".to_string(),
    ///         initial_balance: Decimal::from(100),
    ///         currency: Currency::EUR,
    ///         customer_id: None,
    ///     }),
    /// );
    /// let withdrawal = Event::new(2, AccountEvent::Withdrawn(MoneyWithdrawn::new(Decimal::from(30))));
    ///
    /// let aggregate = Aggregate::Uninitialized
    ///     .apply(&created, ClosurePolicy::Absorbing)?
    ///     .apply(&withdrawal, ClosurePolicy::Absorbing)?;
    ///
    /// let state = aggregate.into_state().unwrap();
    /// assert_eq!(state.balance, Decimal::from(70));
    /// assert_eq!(state.version, 2);
    /// # Ok::<(), account_replay::account::ReplayError>(())
    /// ```
    pub fn apply(self, event: &Event, closure: ClosurePolicy) -> ReplayResult<Self> {
        match (self, &event.event) {
            (Self::Uninitialized, AccountEvent::Created(created)) => {
                open_account(created, event.sequence).map(Self::Open)
            }
            (Self::Uninitialized, other) => Err(ReplayError::AccountNotCreated {
                sequence: event.sequence,
                event_type: other.event_type(),
            }),
            (Self::Open(_), AccountEvent::Created(_)) => Err(StreamViolation::DuplicateCreation {
                sequence: event.sequence,
            }
            .into()),
            (Self::Open(state), _) => transition(state, event, closure).map(Self::Open),
        }
    }

    /// Returns `true` once the account has been created.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Borrows the account state, if the account exists.
    #[must_use]
    pub const fn state(&self) -> Option<&AccountState> {
        match self {
            Self::Uninitialized => None,
            Self::Open(state) => Some(state),
        }
    }

    /// Consumes the aggregate and returns the account state, if any.
    #[must_use]
    pub fn into_state(self) -> Option<AccountState> {
        match self {
            Self::Uninitialized => None,
            Self::Open(state) => Some(state),
        }
    }
}

fn open_account(created: &AccountCreated, sequence: u64) -> ReplayResult<AccountState> {
    ensure_precision(created.initial_balance, created.currency, sequence)?;

    Ok(AccountState {
        account_id: created.account_id.clone(),
        balance: created.initial_balance,
        currency: created.currency,
        customer_id: created.customer_id.clone(),
        status: AccountStatus::Enabled,
        log: Vec::new(),
        version: 1,
    })
}

fn transition(
    mut state: AccountState,
    event: &Event,
    closure: ClosurePolicy,
) -> ReplayResult<AccountState> {
    let sequence = event.sequence;

    if closure.is_absorbing() && state.status.is_closed() {
        return Err(ReplayError::AccountClosed {
            sequence,
            account_id: state.account_id,
        });
    }

    match &event.event {
        AccountEvent::Deposited(MoneyDeposited { amount }) => {
            ensure_accepts_money(&state, sequence)?;
            ensure_precision(*amount, state.currency, sequence)?;
            let balance = state.balance;
            let ceiling_exceeded = || ReplayError::MaxBalanceExceeded {
                sequence,
                amount: *amount,
                balance,
            };
            if *amount > balance {
                return Err(ceiling_exceeded());
            }
            state.balance = balance.checked_add(*amount).ok_or_else(ceiling_exceeded)?;
        }

        AccountEvent::Withdrawn(MoneyWithdrawn { amount }) => {
            ensure_accepts_money(&state, sequence)?;
            ensure_precision(*amount, state.currency, sequence)?;
            if *amount > state.balance {
                return Err(ReplayError::InsufficientFunds {
                    sequence,
                    amount: *amount,
                    balance: state.balance,
                });
            }
            // Only a negative amount can overflow here.
            let balance = state.balance;
            state.balance = balance.checked_sub(*amount).ok_or_else(|| {
                ReplayError::MaxBalanceExceeded {
                    sequence,
                    amount: *amount,
                    balance,
                }
            })?;
        }

        AccountEvent::Deactivated(AccountDeactivated { reason, timestamp }) => {
            state.status = AccountStatus::Disabled;
            state.log.push(LogMessage::new(
                LogKind::Deactivate,
                reason.to_string(),
                *timestamp,
            ));
        }

        AccountEvent::Activated(AccountActivated { timestamp }) => {
            if state.status.is_disabled() {
                state.status = AccountStatus::Enabled;
                state.log.push(LogMessage::new(
                    LogKind::Activate,
                    REACTIVATION_DETAIL,
                    *timestamp,
                ));
            }
        }

        AccountEvent::Closed(AccountClosed { reason, timestamp }) => {
            let detail = format!(
                "Reason: {reason}, Closing Balance: '{}'",
                state.whole_balance()
            );
            state
                .log
                .push(LogMessage::new(LogKind::Closure, detail, *timestamp));
            state.status = AccountStatus::Closed;
        }

        AccountEvent::CurrencyChanged(CurrencyChanged {
            new_currency,
            new_balance,
            timestamp,
        }) => {
            ensure_precision(*new_balance, *new_currency, sequence)?;
            let detail = format!(
                "Change currency from '{}' to '{new_currency}'",
                state.currency
            );
            state
                .log
                .push(LogMessage::new(LogKind::CurrencyChange, detail, *timestamp));
            state.currency = *new_currency;
            state.balance = *new_balance;
            state.status = AccountStatus::Disabled;
        }

        // Handled by `Aggregate::apply`.
        AccountEvent::Created(_) => {
            return Err(StreamViolation::DuplicateCreation { sequence }.into());
        }
    }

    state.version += 1;
    Ok(state)
}

fn ensure_precision(amount: Decimal, currency: Currency, sequence: u64) -> ReplayResult<()> {
    if currency.admits(amount) {
        Ok(())
    } else {
        Err(StreamViolation::PrecisionExceeded {
            sequence,
            amount,
            currency,
        }
        .into())
    }
}

fn ensure_accepts_money(state: &AccountState, sequence: u64) -> ReplayResult<()> {
    match state.status {
        AccountStatus::Enabled => Ok(()),
        AccountStatus::Disabled => Err(ReplayError::AccountDisabled {
            sequence,
            account_id: state.account_id.clone(),
        }),
        AccountStatus::Closed => Err(ReplayError::AccountClosed {
            sequence,
            account_id: state.account_id.clone(),
        }),
    }
}
