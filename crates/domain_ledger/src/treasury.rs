//! Treasuries
//!
//! A treasury is a cash box or bank account transactions are posted
//! against. The entity stores only the `initial_balance` seed; the current
//! balance is always recomputed from the transaction stream (see
//! [`crate::service::LedgerService::treasury_balance`]). There is no stored
//! running balance to drift.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, TreasuryId};

/// Kind of treasury
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreasuryType {
    Cash,
    Bank,
    PettyCash,
}

impl TreasuryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreasuryType::Cash => "CASH",
            TreasuryType::Bank => "BANK",
            TreasuryType::PettyCash => "PETTY_CASH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CASH" => Some(TreasuryType::Cash),
            "BANK" => Some(TreasuryType::Bank),
            "PETTY_CASH" => Some(TreasuryType::PettyCash),
            _ => None,
        }
    }
}

/// A cash box or bank account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasury {
    /// Unique identifier
    pub id: TreasuryId,
    /// Name; unique across treasuries
    pub name: String,
    /// Kind of treasury
    pub treasury_type: TreasuryType,
    /// Currency all amounts in this treasury are denominated in
    pub currency: Currency,
    /// Balance at the moment the treasury was opened
    pub initial_balance: Decimal,
    /// Alert threshold; the insights feed flags balances below it
    pub min_balance: Decimal,
    /// Default treasury for new transactions
    pub is_default: bool,
    /// Inactive treasuries refuse new transactions
    pub is_active: bool,
    /// Set when the treasury was closed
    pub closed_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Treasury {
    /// Creates an active treasury with zero balances
    pub fn new(
        name: impl Into<String>,
        treasury_type: TreasuryType,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TreasuryId::new_v7(),
            name: name.into(),
            treasury_type,
            currency,
            initial_balance: Decimal::ZERO,
            min_balance: Decimal::ZERO,
            is_default: false,
            is_active: true,
            closed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the opening balance
    pub fn with_initial_balance(mut self, balance: Decimal) -> Self {
        self.initial_balance = balance;
        self
    }

    /// Sets the low-balance alert threshold
    pub fn with_min_balance(mut self, min: Decimal) -> Self {
        self.min_balance = min;
        self
    }

    /// Closes the treasury; no further transactions are accepted
    pub fn close(&mut self) {
        self.is_active = false;
        self.closed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}
