//! Money primitives with precise decimal arithmetic
//!
//! Balances in this system are signed `Decimal` values, but the magnitude of
//! a single cash movement is always strictly positive - the direction lives
//! in the entry type, never in the number. `Amount` encodes that invariant
//! in the type system so a zero or negative movement cannot be constructed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Egp,
    Sar,
    Aed,
    Kwd,
    Jpy,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::Jpy => 0,
            Currency::Kwd => 3,
            _ => 2,
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Egp => "EGP",
            Currency::Sar => "SAR",
            Currency::Aed => "AED",
            Currency::Kwd => "KWD",
            Currency::Jpy => "JPY",
        }
    }

    /// Parses an ISO 4217 code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            "EGP" => Some(Currency::Egp),
            "SAR" => Some(Currency::Sar),
            "AED" => Some(Currency::Aed),
            "KWD" => Some(Currency::Kwd),
            "JPY" => Some(Currency::Jpy),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur constructing an amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount must be positive, got {0}")]
    NotPositive(Decimal),
}

/// A strictly positive cash magnitude
///
/// Every ledger transaction carries an `Amount`; whether it raises or lowers
/// a balance is decided by the transaction's entry type. Constructing an
/// `Amount` from a zero or negative decimal fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates an amount, rejecting zero and negative values
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying decimal magnitude
    pub fn get(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Decimal {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn amount_is_always_positive(value in 1i64..1_000_000_000i64) {
            let amount = Amount::new(Decimal::new(value, 2)).unwrap();
            prop_assert!(amount.get() > Decimal::ZERO);
        }

        #[test]
        fn non_positive_is_always_rejected(value in -1_000_000_000i64..=0i64) {
            prop_assert!(Amount::new(Decimal::new(value, 2)).is_err());
        }
    }
}
