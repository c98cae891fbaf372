//! Currency codes supported by the account aggregate.
//!
//! The set of currencies is closed: an account can only be created in, or
//! converted to, one of the codes listed here.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
}

impl Currency {
    /// All supported currencies, in declaration order.
    pub const ALL: [Self; 5] = [Self::USD, Self::EUR, Self::GBP, Self::JPY, Self::CHF];

    /// Returns the number of decimal places of the currency's minor unit.
    ///
    /// JPY has no minor unit. Every other supported currency uses cents.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        match self {
            Self::JPY => 0,
            Self::USD | Self::EUR | Self::GBP | Self::CHF => 2,
        }
    }

    /// Returns `true` if `amount` can be expressed in the currency's minor
    /// unit.
    ///
    /// Trailing zeros do not count, so `100.00` is a valid JPY amount while
    /// `100.5` is not.
    ///
    /// ```rust
    /// use account_replay::account::Currency;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Currency::JPY.admits(Decimal::new(10000, 2)));
    /// assert!(!Currency::JPY.admits(Decimal::new(1005, 1)));
    /// assert!(Currency::USD.admits(Decimal::new(1005, 2)));
    /// assert!(!Currency::USD.admits(Decimal::new(1, 3)));
    /// ```
    #[must_use]
    pub fn admits(&self, amount: Decimal) -> bool {
        amount.normalize().scale() <= self.decimal_places()
    }

    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::JPY => "JPY",
            Self::CHF => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

/// Error returned when parsing an unknown currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported currency code: {0}")]
pub struct UnsupportedCurrency(pub String);

impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnsupportedCurrency(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Currency::USD, "USD")]
    #[case(Currency::EUR, "EUR")]
    #[case(Currency::GBP, "GBP")]
    #[case(Currency::JPY, "JPY")]
    #[case(Currency::CHF, "CHF")]
    fn display_uses_iso_code(#[case] currency: Currency, #[case] expected: &str) {
        assert_eq!(currency.to_string(), expected);
    }

    #[rstest]
    fn decimal_places_follow_minor_unit() {
        assert_eq!(Currency::JPY.decimal_places(), 0);
        assert_eq!(Currency::USD.decimal_places(), 2);
        assert_eq!(Currency::CHF.decimal_places(), 2);
    }

    #[rstest]
    #[case(Currency::JPY, Decimal::from(1500), true)]
    #[case(Currency::JPY, Decimal::new(150_000, 2), true)]
    #[case(Currency::JPY, Decimal::new(1, 3), false)]
    #[case(Currency::EUR, Decimal::new(-1999, 2), true)]
    #[case(Currency::EUR, Decimal::new(19_990, 3), true)]
    #[case(Currency::CHF, Decimal::new(19_991, 3), false)]
    #[case(Currency::GBP, Decimal::MAX, true)]
    fn admits_follows_minor_unit(
        #[case] currency: Currency,
        #[case] amount: Decimal,
        #[case] expected: bool,
    ) {
        assert_eq!(currency.admits(amount), expected);
    }

    #[rstest]
    #[case("usd", Currency::USD)]
    #[case(" eur ", Currency::EUR)]
    #[case("JPY", Currency::JPY)]
    fn from_str_is_case_insensitive(#[case] input: &str, #[case] expected: Currency) {
        assert_eq!(input.parse::<Currency>(), Ok(expected));
    }

    #[rstest]
    fn from_str_rejects_unknown_code() {
        assert_eq!(
            "XAU".parse::<Currency>(),
            Err(UnsupportedCurrency("XAU".to_string()))
        );
    }

    #[rstest]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
    }
}
