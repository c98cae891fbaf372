//! Untyped event records.
//!
//! Event stores usually hand events over as a type name next to a JSON
//! payload. [`RawEvent`] is that shape, and [`RawEvent::decode`] turns it
//! into a typed [`Event`]. This is the only place where an event type the
//! replayer does not know can show up, so it is where
//! [`ReplayError::EventTypeNotSupported`] originates.
//!
//! # Examples
//!
//! ```rust
//! use account_replay::account::AccountEvent;
//! use account_replay::envelope::RawEvent;
//! use serde_json::json;
//!
//! let raw = RawEvent::new(2, "MoneyDeposited", json!({ "amount": "25.00" }));
//! let event = raw.decode()?;
//!
//! assert_eq!(event.sequence, 2);
//! assert!(matches!(event.event, AccountEvent::Deposited(_)));
//! # Ok::<(), account_replay::account::ReplayError>(())
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::account::{
    AccountActivated, AccountClosed, AccountCreated, AccountDeactivated, AccountEvent,
    CurrencyChanged, Event, MoneyDeposited, MoneyWithdrawn, ReplayError, ReplayResult,
    StreamViolation,
};

/// An event as stored: sequence number, type name and JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// 1-based position of the event in the log.
    pub sequence: u64,
    /// Type name, one of [`AccountEvent::EVENT_TYPES`].
    pub event_type: String,
    /// Event payload.
    pub payload: Value,
}

impl RawEvent {
    /// Creates a raw event.
    #[must_use]
    pub fn new(sequence: u64, event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            sequence,
            event_type: event_type.into(),
            payload,
        }
    }

    /// Decodes the record into a typed event.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::EventTypeNotSupported`] if `event_type` is not
    /// a known event type, and [`StreamViolation::MalformedPayload`] if the
    /// payload does not match the type.
    pub fn decode(&self) -> ReplayResult<Event> {
        let event = match self.event_type.as_str() {
            name if name == AccountCreated::event_type() => {
                AccountEvent::Created(self.payload()?)
            }
            name if name == MoneyDeposited::event_type() => {
                AccountEvent::Deposited(self.payload()?)
            }
            name if name == MoneyWithdrawn::event_type() => {
                AccountEvent::Withdrawn(self.payload()?)
            }
            name if name == AccountDeactivated::event_type() => {
                AccountEvent::Deactivated(self.payload()?)
            }
            name if name == AccountActivated::event_type() => {
                AccountEvent::Activated(self.payload()?)
            }
            name if name == AccountClosed::event_type() => AccountEvent::Closed(self.payload()?),
            name if name == CurrencyChanged::event_type() => {
                AccountEvent::CurrencyChanged(self.payload()?)
            }
            _ => {
                return Err(ReplayError::EventTypeNotSupported {
                    sequence: self.sequence,
                    event_type: self.event_type.clone(),
                });
            }
        };

        Ok(Event::new(self.sequence, event))
    }

    fn payload<T: DeserializeOwned>(&self) -> ReplayResult<T> {
        T::deserialize(&self.payload).map_err(|error| {
            StreamViolation::MalformedPayload {
                sequence: self.sequence,
                event_type: self.event_type.clone(),
                message: error.to_string(),
            }
            .into()
        })
    }
}

impl Event {
    /// Converts the event into its stored representation.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the payload cannot be represented as
    /// JSON.
    pub fn to_raw(&self) -> Result<RawEvent, serde_json::Error> {
        let payload = match &self.event {
            AccountEvent::Created(event) => serde_json::to_value(event),
            AccountEvent::Deposited(event) => serde_json::to_value(event),
            AccountEvent::Withdrawn(event) => serde_json::to_value(event),
            AccountEvent::Deactivated(event) => serde_json::to_value(event),
            AccountEvent::Activated(event) => serde_json::to_value(event),
            AccountEvent::Closed(event) => serde_json::to_value(event),
            AccountEvent::CurrencyChanged(event) => serde_json::to_value(event),
        }?;

        Ok(RawEvent::new(self.sequence, self.event_type(), payload))
    }
}
