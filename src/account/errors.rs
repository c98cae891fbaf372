//! Replay errors for the account aggregate.
//!
//! Every variant aborts the whole replay. Each carries the sequence number
//! of the offending event plus whatever context the rule that fired had at
//! hand, and maps to a stable numeric code and label through
//! [`ReplayError::code`] and [`ReplayError::label`].
//!
//! | Variant | Code | Label |
//! |---|---|---|
//! | `InvalidEventStream` | 511 | `ERROR_INVALID_EVENT_STREAM` |
//! | `AccountNotCreated` | 128 | `ERROR_ACCOUNT_UNINSTANTIATED` |
//! | `AccountDisabled` | 344 | `ERROR_TRANSACTION_REJECTED_ACCOUNT_DEACTIVATED` |
//! | `AccountClosed` | 502 | `ERROR_ACCOUNT_CLOSED` |
//! | `MaxBalanceExceeded` | 281 | `ERROR_BALANCE_SUCCEED_MAX_BALANCE` |
//! | `InsufficientFunds` | 285 | `ERROR_BALANCE_IN_NEGATIVE` |
//! | `EventTypeNotSupported` | 162 | `ERROR_EVENT_NOT_SUPPORTED` |

use std::fmt;

use rust_decimal::Decimal;

use crate::account::currency::Currency;

/// Ways in which an event log can be structurally broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamViolation {
    /// The event at `position` (1-based) does not carry sequence `position`.
    SequenceMismatch {
        /// 1-based position in the input.
        position: usize,
        /// Sequence number that position requires.
        expected: u64,
        /// Sequence number the event carried.
        found: u64,
    },
    /// A second `AccountCreated` event arrived for an existing account.
    DuplicateCreation {
        /// Sequence number of the repeated creation.
        sequence: u64,
    },
    /// The log is longer than the configured cap.
    TooManyEvents {
        /// Configured maximum.
        limit: usize,
        /// Length of the log that was offered.
        actual: usize,
    },
    /// An amount or balance has more decimal places than its currency's
    /// minor unit allows.
    PrecisionExceeded {
        /// Sequence number of the offending event.
        sequence: u64,
        /// The offending amount.
        amount: Decimal,
        /// Currency the amount is expressed in.
        currency: Currency,
    },
    /// A raw event of a known type carried a payload that could not be decoded.
    MalformedPayload {
        /// Sequence number of the raw event.
        sequence: u64,
        /// Declared event type.
        event_type: String,
        /// Decoder message.
        message: String,
    },
}

impl fmt::Display for StreamViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SequenceMismatch {
                position,
                expected,
                found,
            } => write!(
                formatter,
                "event at position {position} has sequence {found}, expected {expected}"
            ),
            Self::DuplicateCreation { sequence } => {
                write!(formatter, "account created twice (event {sequence})")
            }
            Self::TooManyEvents { limit, actual } => {
                write!(formatter, "{actual} events exceed the limit of {limit}")
            }
            Self::PrecisionExceeded {
                sequence,
                amount,
                currency,
            } => write!(
                formatter,
                "{amount} has more than {} decimal places for {currency} (event {sequence})",
                currency.decimal_places()
            ),
            Self::MalformedPayload {
                sequence,
                event_type,
                message,
            } => write!(
                formatter,
                "malformed {event_type} payload (event {sequence}): {message}"
            ),
        }
    }
}

/// Errors that abort a replay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// The log itself is malformed.
    #[error("511 ERROR_INVALID_EVENT_STREAM: {0}")]
    InvalidEventStream(StreamViolation),

    /// An event other than `AccountCreated` arrived before the account existed.
    #[error("128 ERROR_ACCOUNT_UNINSTANTIATED: {event_type} (event {sequence}) arrived before the account was created")]
    AccountNotCreated {
        /// Sequence number of the rejected event.
        sequence: u64,
        /// Type of the rejected event.
        event_type: &'static str,
    },

    /// A monetary event arrived while the account was disabled.
    #[error("344 ERROR_TRANSACTION_REJECTED_ACCOUNT_DEACTIVATED: account {account_id} is disabled (event {sequence})")]
    AccountDisabled {
        /// Sequence number of the rejected event.
        sequence: u64,
        /// The disabled account.
        account_id: String,
    },

    /// An event arrived after the account was closed.
    #[error("502 ERROR_ACCOUNT_CLOSED: account {account_id} is closed (event {sequence})")]
    AccountClosed {
        /// Sequence number of the rejected event.
        sequence: u64,
        /// The closed account.
        account_id: String,
    },

    /// A deposit was larger than the current balance, which caps deposits, or
    /// a money movement would take the balance past the largest
    /// representable amount.
    #[error("281 ERROR_BALANCE_SUCCEED_MAX_BALANCE: {amount} takes the balance of {balance} past its ceiling (event {sequence})")]
    MaxBalanceExceeded {
        /// Sequence number of the rejected event.
        sequence: u64,
        /// Requested amount.
        amount: Decimal,
        /// Balance at the time of the event.
        balance: Decimal,
    },

    /// A withdrawal was larger than the available balance.
    #[error("285 ERROR_BALANCE_IN_NEGATIVE: withdrawal of {amount} exceeds the available balance of {balance} (event {sequence})")]
    InsufficientFunds {
        /// Sequence number of the rejected event.
        sequence: u64,
        /// Requested withdrawal.
        amount: Decimal,
        /// Balance at the time of the withdrawal.
        balance: Decimal,
    },

    /// A raw event named a type the replayer does not know.
    #[error("162 ERROR_EVENT_NOT_SUPPORTED: {event_type} (event {sequence})")]
    EventTypeNotSupported {
        /// Sequence number of the rejected event.
        sequence: u64,
        /// The unknown type name.
        event_type: String,
    },
}

impl ReplayError {
    /// Returns the numeric error code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::InvalidEventStream(_) => 511,
            Self::AccountNotCreated { .. } => 128,
            Self::AccountDisabled { .. } => 344,
            Self::AccountClosed { .. } => 502,
            Self::MaxBalanceExceeded { .. } => 281,
            Self::InsufficientFunds { .. } => 285,
            Self::EventTypeNotSupported { .. } => 162,
        }
    }

    /// Returns the symbolic error label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InvalidEventStream(_) => "ERROR_INVALID_EVENT_STREAM",
            Self::AccountNotCreated { .. } => "ERROR_ACCOUNT_UNINSTANTIATED",
            Self::AccountDisabled { .. } => "ERROR_TRANSACTION_REJECTED_ACCOUNT_DEACTIVATED",
            Self::AccountClosed { .. } => "ERROR_ACCOUNT_CLOSED",
            Self::MaxBalanceExceeded { .. } => "ERROR_BALANCE_SUCCEED_MAX_BALANCE",
            Self::InsufficientFunds { .. } => "ERROR_BALANCE_IN_NEGATIVE",
            Self::EventTypeNotSupported { .. } => "ERROR_EVENT_NOT_SUPPORTED",
        }
    }

    /// Returns `true` for the two balance-bound violations.
    ///
    /// `MaxBalanceExceeded` and `InsufficientFunds` are reported separately,
    /// but callers that treat every balance bound as one failure kind can
    /// match on this instead.
    #[must_use]
    pub const fn is_balance_violation(&self) -> bool {
        matches!(
            self,
            Self::MaxBalanceExceeded { .. } | Self::InsufficientFunds { .. }
        )
    }

    /// Returns the sequence number of the event that caused the error, if
    /// the error is tied to a single event.
    #[must_use]
    pub const fn sequence(&self) -> Option<u64> {
        match self {
            Self::InvalidEventStream(StreamViolation::SequenceMismatch { found, .. }) => {
                Some(*found)
            }
            Self::InvalidEventStream(
                StreamViolation::DuplicateCreation { sequence }
                | StreamViolation::PrecisionExceeded { sequence, .. }
                | StreamViolation::MalformedPayload { sequence, .. },
            )
            | Self::AccountNotCreated { sequence, .. }
            | Self::AccountDisabled { sequence, .. }
            | Self::AccountClosed { sequence, .. }
            | Self::MaxBalanceExceeded { sequence, .. }
            | Self::InsufficientFunds { sequence, .. }
            | Self::EventTypeNotSupported { sequence, .. } => Some(*sequence),
            Self::InvalidEventStream(StreamViolation::TooManyEvents { .. }) => None,
        }
    }
}

impl From<StreamViolation> for ReplayError {
    fn from(violation: StreamViolation) -> Self {
        Self::InvalidEventStream(violation)
    }
}

/// Result type of replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;
