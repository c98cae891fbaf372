//! Account domain: events, state, errors and the aggregate that ties them
//! together.
//!
//! - [`currency`] - Supported currency codes
//! - [`events`] - Domain events and the sequenced [`Event`] envelope
//! - [`state`] - The reconstructed [`AccountState`] and its audit log
//! - [`errors`] - [`ReplayError`] and its numeric codes
//! - [`aggregate`] - [`Aggregate`] and the per-event transition rules

pub mod aggregate;
pub mod currency;
pub mod errors;
pub mod events;
pub mod state;

pub use aggregate::{Aggregate, REACTIVATION_DETAIL};
pub use currency::{Currency, UnsupportedCurrency};
pub use errors::{ReplayError, ReplayResult, StreamViolation};
pub use events::{
    AccountActivated, AccountClosed, AccountCreated, AccountDeactivated, AccountEvent,
    ClosureReason, CurrencyChanged, DeactivationReason, Event, MoneyDeposited, MoneyWithdrawn,
};
pub use state::{AccountState, AccountStatus, LogKind, LogMessage};
