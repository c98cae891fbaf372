//! Domain events for the account aggregate.
//!
//! Events are immutable records of facts that already happened to an
//! account. The replayer only ever borrows them.
//!
//! # Available Events
//!
//! - [`AccountCreated`] - The account was opened with an initial balance
//! - [`MoneyDeposited`] - Money was paid into the account
//! - [`MoneyWithdrawn`] - Money was taken out of the account
//! - [`AccountDeactivated`] - The account was disabled
//! - [`AccountActivated`] - A disabled account was enabled again
//! - [`AccountClosed`] - The account was closed for good
//! - [`CurrencyChanged`] - The account was moved to another currency
//!
//! Every event travels inside an [`Event`] envelope that carries the
//! externally assigned sequence number.
//!
//! # Examples
//!
//! ```rust
//! use account_replay::account::{AccountCreated, AccountEvent, Currency, Event, MoneyDeposited};
//! use rust_decimal::Decimal;
//!
//! let created = Event::new(
//!     1,
//!     AccountEvent::Created(AccountCreated {
//!         account_id: "ACC-1".to_string(),
//!         initial_balance: Decimal::from(100),
//!         currency: Currency::USD,
//!         customer_id: Some("CUST-1".to_string()),
//!     }),
//! );
//! let deposit = Event::new(2, AccountEvent::Deposited(MoneyDeposited::new(Decimal::from(50))));
//!
//! assert_eq!(created.event_type(), "AccountCreated");
//! assert_eq!(deposit.sequence, 2);
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::currency::Currency;

/// Why an account was deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeactivationReason {
    /// The customer asked for the account to be suspended.
    CustomerRequest,
    /// Activity on the account looked fraudulent.
    SuspiciousActivity,
    /// The account saw no activity for a long period.
    Dormancy,
    /// The account is under compliance review.
    ComplianceReview,
}

impl fmt::Display for DeactivationReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CustomerRequest => "CustomerRequest",
            Self::SuspiciousActivity => "SuspiciousActivity",
            Self::Dormancy => "Dormancy",
            Self::ComplianceReview => "ComplianceReview",
        };
        formatter.write_str(text)
    }
}

/// Why an account was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClosureReason {
    /// The customer asked for the account to be closed.
    CustomerRequest,
    /// The account was closed after confirmed fraud.
    Fraud,
    /// The account was dormant beyond the retention period.
    Dormancy,
    /// The bank terminated the relationship.
    BankDecision,
}

impl fmt::Display for ClosureReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CustomerRequest => "CustomerRequest",
            Self::Fraud => "Fraud",
            Self::Dormancy => "Dormancy",
            Self::BankDecision => "BankDecision",
        };
        formatter.write_str(text)
    }
}

/// Event raised when an account is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreated {
    /// Identifier of the new account.
    pub account_id: String,
    /// Balance the account starts with.
    pub initial_balance: Decimal,
    /// Currency the account is held in.
    pub currency: Currency,
    /// Owning customer, if known.
    pub customer_id: Option<String>,
}

impl AccountCreated {
    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type() -> &'static str {
        "AccountCreated"
    }
}

/// Event raised when money is deposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyDeposited {
    /// Amount paid in.
    pub amount: Decimal,
}

impl MoneyDeposited {
    /// Creates a deposit of `amount`.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type() -> &'static str {
        "MoneyDeposited"
    }
}

/// Event raised when money is withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyWithdrawn {
    /// Amount taken out.
    pub amount: Decimal,
}

impl MoneyWithdrawn {
    /// Creates a withdrawal of `amount`.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type() -> &'static str {
        "MoneyWithdrawn"
    }
}

/// Event raised when an account is deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDeactivated {
    /// Why the account was deactivated.
    pub reason: DeactivationReason,
    /// When the deactivation happened.
    pub timestamp: DateTime<Utc>,
}

impl AccountDeactivated {
    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type() -> &'static str {
        "AccountDeactivated"
    }
}

/// Event raised when a deactivated account is enabled again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountActivated {
    /// When the activation happened.
    pub timestamp: DateTime<Utc>,
}

impl AccountActivated {
    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type() -> &'static str {
        "AccountActivated"
    }
}

/// Event raised when an account is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClosed {
    /// Why the account was closed.
    pub reason: ClosureReason,
    /// When the closure happened.
    pub timestamp: DateTime<Utc>,
}

impl AccountClosed {
    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type() -> &'static str {
        "AccountClosed"
    }
}

/// Event raised when an account is moved to another currency.
///
/// The new balance is authoritative: it replaces the old balance outright
/// instead of being derived from an exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyChanged {
    /// Currency the account is held in from now on.
    pub new_currency: Currency,
    /// Balance in the new currency.
    pub new_balance: Decimal,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
}

impl CurrencyChanged {
    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type() -> &'static str {
        "CurrencyChanged"
    }
}

/// All events that can occur on an account.
///
/// The set is closed: adding a new kind of event means adding a variant
/// here, and every `match` over it has to handle the new case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AccountEvent {
    /// The account was created.
    Created(AccountCreated),
    /// Money was deposited.
    Deposited(MoneyDeposited),
    /// Money was withdrawn.
    Withdrawn(MoneyWithdrawn),
    /// The account was deactivated.
    Deactivated(AccountDeactivated),
    /// The account was activated again.
    Activated(AccountActivated),
    /// The account was closed.
    Closed(AccountClosed),
    /// The account currency was changed.
    CurrencyChanged(CurrencyChanged),
}

impl AccountEvent {
    /// Names of every supported event type.
    pub const EVENT_TYPES: [&'static str; 7] = [
        AccountCreated::event_type(),
        MoneyDeposited::event_type(),
        MoneyWithdrawn::event_type(),
        AccountDeactivated::event_type(),
        AccountActivated::event_type(),
        AccountClosed::event_type(),
        CurrencyChanged::event_type(),
    ];

    /// Returns the event type as a string.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Created(_) => AccountCreated::event_type(),
            Self::Deposited(_) => MoneyDeposited::event_type(),
            Self::Withdrawn(_) => MoneyWithdrawn::event_type(),
            Self::Deactivated(_) => AccountDeactivated::event_type(),
            Self::Activated(_) => AccountActivated::event_type(),
            Self::Closed(_) => AccountClosed::event_type(),
            Self::CurrencyChanged(_) => CurrencyChanged::event_type(),
        }
    }

    /// Returns when the event happened, for the kinds that record it.
    ///
    /// Creation, deposits and withdrawals carry no timestamp of their own.
    #[must_use]
    pub const fn occurred_at(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Deactivated(event) => Some(&event.timestamp),
            Self::Activated(event) => Some(&event.timestamp),
            Self::Closed(event) => Some(&event.timestamp),
            Self::CurrencyChanged(event) => Some(&event.timestamp),
            Self::Created(_) | Self::Deposited(_) | Self::Withdrawn(_) => None,
        }
    }
}

/// An account event together with its position in the account's history.
///
/// `sequence` is assigned by whoever owns the log and starts at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// 1-based position of the event in the log.
    pub sequence: u64,
    /// The event itself.
    pub event: AccountEvent,
}

impl Event {
    /// Wraps `event` at position `sequence`.
    #[must_use]
    pub const fn new(sequence: u64, event: AccountEvent) -> Self {
        Self { sequence, event }
    }

    /// Returns the type name of the wrapped event.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}
