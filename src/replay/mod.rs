//! Event replay.
//!
//! [`Replayer`] rebuilds an [`AccountState`] from the ordered event log of a
//! single account. A replay is a pure fold: it performs no I/O, holds no
//! state between calls, and either returns the finished snapshot or the
//! first [`ReplayError`] it hits. A failed replay never exposes a partially
//! applied account.
//!
//! # Steps
//!
//! 1. An empty log yields `Ok(None)`.
//! 2. The log length is checked against [`ReplayConfig::max_events`].
//! 3. Under [`SequencePolicy::Strict`] every sequence number must equal the
//!    event's 1-based position. The whole log is checked before any event is
//!    applied.
//! 4. Events are applied in order through [`Aggregate::apply`].
//!
//! # Examples
//!
//! ```rust
//! use account_replay::account::{
//!     AccountCreated, AccountEvent, AccountStatus, Currency, Event, MoneyDeposited,
//! };
//! use account_replay::replay::replay;
//! use rust_decimal::Decimal;
//!
//! let events = vec![
//!     Event::new(
//!         1,
//!         AccountEvent::Created(AccountCreated {
//!             account_id: "ACC-1".to_string(),
//!             initial_balance: Decimal::from(100),
//!             currency: Currency::USD,
//!             customer_id: None,
//!         }),
//!     ),
//!     Event::new(2, AccountEvent::Deposited(MoneyDeposited::new(Decimal::from(50)))),
//! ];
//!
//! let state = replay(&events)?.unwrap();
//! assert_eq!(state.balance, Decimal::from(150));
//! assert_eq!(state.status, AccountStatus::Enabled);
//! # Ok::<(), account_replay::account::ReplayError>(())
//! ```

pub mod config;

pub use config::{
    CLOSURE_POLICY_KEY, ClosurePolicy, ConfigError, MAX_EVENTS_KEY, ReplayConfig,
    SEQUENCE_POLICY_KEY, SequencePolicy, UnknownPolicy,
};

use crate::account::{
    AccountState, Aggregate, Event, ReplayError, ReplayResult, StreamViolation,
};
use crate::envelope::RawEvent;

/// Replays account event logs under a fixed configuration.
///
/// A `Replayer` is immutable and can be shared freely between threads;
/// concurrent replays of different logs do not interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Replayer {
    config: ReplayConfig,
}

impl Replayer {
    /// Creates a replayer with the given configuration.
    #[must_use]
    pub const fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Replays `events` and returns the resulting account state.
    ///
    /// Returns `Ok(None)` for an empty log.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReplayError`] encountered. Structural problems of
    /// the log are reported before any event is applied.
    pub fn replay(&self, events: &[Event]) -> ReplayResult<Option<AccountState>> {
        let span = tracing::debug_span!("replay", events = events.len());
        let _entered = span.enter();

        self.validate(events.iter().map(|event| event.sequence), events.len())
            .and_then(|()| self.fold(events))
            .inspect_err(report_rejection)
    }

    /// Decodes and replays a log of raw events.
    ///
    /// Sequence numbers are checked on the raw records first, then every
    /// record is decoded, then the decoded log is replayed.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Replayer::replay`], returns
    /// [`ReplayError::EventTypeNotSupported`] for an unknown event type and
    /// [`StreamViolation::MalformedPayload`] for a payload that does not
    /// match its declared type.
    pub fn replay_raw(&self, raw_events: &[RawEvent]) -> ReplayResult<Option<AccountState>> {
        let span = tracing::debug_span!("replay_raw", events = raw_events.len());
        let _entered = span.enter();

        self.validate(raw_events.iter().map(|raw| raw.sequence), raw_events.len())
            .and_then(|()| {
                raw_events
                    .iter()
                    .map(RawEvent::decode)
                    .collect::<ReplayResult<Vec<_>>>()
            })
            .and_then(|events| self.fold(&events))
            .inspect_err(report_rejection)
    }

    fn validate<I>(&self, sequences: I, length: usize) -> ReplayResult<()>
    where
        I: IntoIterator<Item = u64>,
    {
        if let Some(limit) = self.config.max_events
            && length > limit
        {
            return Err(StreamViolation::TooManyEvents {
                limit,
                actual: length,
            }
            .into());
        }

        match self.config.sequence_policy {
            SequencePolicy::Strict => check_sequence(sequences),
            SequencePolicy::Permissive => Ok(()),
        }
    }

    fn fold(&self, events: &[Event]) -> ReplayResult<Option<AccountState>> {
        let closure = self.config.closure_policy;

        let aggregate = events
            .iter()
            .try_fold(Aggregate::Uninitialized, |aggregate, event| {
                let next = aggregate.apply(event, closure)?;
                tracing::debug!(
                    sequence = event.sequence,
                    event_type = event.event_type(),
                    "event applied"
                );
                Ok::<_, ReplayError>(next)
            })?;

        let state = aggregate.into_state();
        if let Some(state) = &state {
            tracing::info!(
                account_id = %state.account_id,
                version = state.version,
                status = ?state.status,
                "replay completed"
            );
        }
        Ok(state)
    }
}

/// Replays `events` with the default configuration.
///
/// Equivalent to `Replayer::default().replay(events)`: sequence numbers are
/// validated strictly and closure rejects every later event.
///
/// # Errors
///
/// See [`Replayer::replay`].
pub fn replay(events: &[Event]) -> ReplayResult<Option<AccountState>> {
    Replayer::default().replay(events)
}

/// Checks that the `n`-th sequence number is `n`, counting from 1.
///
/// # Errors
///
/// Returns [`StreamViolation::SequenceMismatch`] for the first position
/// whose sequence number differs.
///
/// # Examples
///
/// ```rust
/// use account_replay::replay::check_sequence;
///
/// assert!(check_sequence([1, 2, 3]).is_ok());
/// assert!(check_sequence([1, 3]).is_err());
/// ```
pub fn check_sequence<I>(sequences: I) -> ReplayResult<()>
where
    I: IntoIterator<Item = u64>,
{
    (1_usize..)
        .zip(1_u64..)
        .zip(sequences)
        .find(|((_, expected), found)| expected != found)
        .map_or(Ok(()), |((position, expected), found)| {
            Err(StreamViolation::SequenceMismatch {
                position,
                expected,
                found,
            }
            .into())
        })
}

fn report_rejection(error: &ReplayError) {
    tracing::warn!(
        code = error.code(),
        label = error.label(),
        sequence = ?error.sequence(),
        error = %error,
        "replay rejected"
    );
}
