//! Account snapshot produced by a replay.
//!
//! [`AccountState`] is what a caller receives once every event of a log has
//! been applied. It is a plain owned value: the replayer keeps no reference
//! to it after returning.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::currency::Currency;

/// Operational status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    /// The account accepts deposits and withdrawals.
    Enabled,
    /// The account is suspended; monetary events are rejected.
    Disabled,
    /// The account is closed. This status is terminal.
    Closed,
}

impl AccountStatus {
    /// Returns `true` if the status is `Enabled`.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Returns `true` if the status is `Disabled`.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Returns `true` if the status is `Closed`.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Kind of an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    /// The account was deactivated.
    #[serde(rename = "DEACTIVATE")]
    Deactivate,
    /// The account was activated again.
    #[serde(rename = "ACTIVATE")]
    Activate,
    /// The account was closed.
    #[serde(rename = "CLOSURE")]
    Closure,
    /// The account currency was changed.
    #[serde(rename = "CURRENCY-CHANGE")]
    CurrencyChange,
}

impl LogKind {
    /// Returns the label written to the audit trail.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Deactivate => "DEACTIVATE",
            Self::Activate => "ACTIVATE",
            Self::Closure => "CLOSURE",
            Self::CurrencyChange => "CURRENCY-CHANGE",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// One entry of the account's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    /// What happened.
    pub kind: LogKind,
    /// Human-readable description.
    pub detail: String,
    /// Timestamp taken from the event that produced the entry.
    pub timestamp: DateTime<Utc>,
}

impl LogMessage {
    /// Creates a log entry.
    #[must_use]
    pub fn new(kind: LogKind, detail: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            timestamp,
        }
    }
}

/// Reconstructed state of one account.
///
/// An `AccountState` only exists once an `AccountCreated` event has been
/// applied, so `account_id` is always present. A log that never creates the
/// account cannot produce a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Identifier assigned at creation.
    pub account_id: String,
    /// Current balance in `currency`.
    pub balance: Decimal,
    /// Currency the balance is held in.
    pub currency: Currency,
    /// Owning customer, if known.
    pub customer_id: Option<String>,
    /// Current status.
    pub status: AccountStatus,
    /// Append-only audit trail in application order.
    pub log: Vec<LogMessage>,
    /// Number of events applied so far.
    pub version: u64,
}

impl AccountState {
    /// Returns the balance truncated toward zero to whole currency units.
    ///
    /// This is the figure reported as the closing balance in closure log
    /// entries.
    ///
    /// ```rust
    /// use account_replay::account::{AccountState, AccountStatus, Currency};
    /// use rust_decimal::Decimal;
    ///
    /// let state = AccountState {
    ///     account_id: "ACC-1".to_string(),
    ///     balance: Decimal::new(1299, 2),
    ///     currency: Currency::USD,
    ///     customer_id: None,
    ///     status: AccountStatus::Enabled,
    ///     log: Vec::new(),
    ///     version: 1,
    /// };
    ///
    /// assert_eq!(state.whole_balance(), Decimal::from(12));
    /// ```
    #[must_use]
    pub fn whole_balance(&self) -> Decimal {
        self.balance.trunc()
    }

    /// Returns the log entries of the given kind, in order.
    pub fn log_entries(&self, kind: LogKind) -> impl Iterator<Item = &LogMessage> {
        self.log.iter().filter(move |entry| entry.kind == kind)
    }
}
