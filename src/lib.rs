//! # account-replay
//!
//! Deterministic reconstruction of financial account state from an ordered
//! log of domain events.
//!
//! ## Overview
//!
//! An account's history is stored as a sequence of facts (created, money
//! deposited, deactivated, closed, ...). Replaying that sequence through the
//! account's transition rules yields the current [`AccountState`], or the
//! first rule the log violates as a typed [`ReplayError`].
//!
//! - **[`account`]**: events, state, errors and the [`Aggregate`] transition
//!   rules
//! - **[`replay`]**: the [`Replayer`] and its [`ReplayConfig`]
//! - **[`envelope`]**: decoding of untyped stored events
//!
//! Replays are pure and synchronous. Nothing is persisted, published or
//! shared between calls.
//!
//! ## Example
//!
//! ```rust
//! use account_replay::prelude::*;
//! use chrono::Utc;
//! use rust_decimal::Decimal;
//!
//! let events = vec![
//!     Event::new(
//!         1,
//!         AccountEvent::Created(AccountCreated {
//!             account_id: "ACC-1".to_string(),
//!             initial_balance: Decimal::from(100),
//!             currency: Currency::USD,
//!             customer_id: Some("CUST-1".to_string()),
//!         }),
//!     ),
//!     Event::new(
//!         2,
//!         AccountEvent::Deactivated(AccountDeactivated {
//!             reason: DeactivationReason::Dormancy,
//!             timestamp: Utc::now(),
//!         }),
//!     ),
//!     Event::new(3, AccountEvent::Deposited(MoneyDeposited::new(Decimal::from(10)))),
//! ];
//!
//! let error = Replayer::default().replay(&events).unwrap_err();
//! assert_eq!(error.code(), 344);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod account;
pub mod envelope;
pub mod replay;

pub use account::{AccountState, Aggregate, Event, ReplayError, ReplayResult};
pub use replay::{ReplayConfig, Replayer, replay};

/// Prelude module for convenient imports.
///
/// ```rust
/// use account_replay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::account::*;
    pub use crate::envelope::RawEvent;
    pub use crate::replay::{ClosurePolicy, ReplayConfig, Replayer, SequencePolicy, replay};
}

static_assertions::assert_impl_all!(account::AccountState: Send, Sync, Clone);
static_assertions::assert_impl_all!(account::Event: Send, Sync, Clone);
static_assertions::assert_impl_all!(account::ReplayError: Send, Sync, std::error::Error);
static_assertions::assert_impl_all!(replay::Replayer: Send, Sync, Copy);
static_assertions::assert_impl_all!(envelope::RawEvent: Send, Sync);
