//! Customer records
//!
//! A record is an invoice-like obligation the customer owes, reduced over
//! time by payments. Its status is never stored independently of the
//! numbers: it is recomputed from `(paid_amount, total_amount)` on every
//! mutation, so the two can never drift apart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Amount, CustomerId, RecordId};

use crate::error::LedgerError;

/// Settlement state of a record, derived from its amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordStatus {
    Open,
    Partial,
    Paid,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Open => "OPEN",
            RecordStatus::Partial => "PARTIAL",
            RecordStatus::Paid => "PAID",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(RecordStatus::Open),
            "PARTIAL" => Some(RecordStatus::Partial),
            "PAID" => Some(RecordStatus::Paid),
            _ => None,
        }
    }
}

/// Derives the status from the paid and total amounts
///
/// paid = 0 is OPEN, 0 < paid < total is PARTIAL, paid = total is PAID.
pub fn derive_status(paid_amount: Decimal, total_amount: Decimal) -> RecordStatus {
    if paid_amount <= Decimal::ZERO {
        RecordStatus::Open
    } else if paid_amount < total_amount {
        RecordStatus::Partial
    } else {
        RecordStatus::Paid
    }
}

/// An invoice-like obligation owed by a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Unique identifier
    pub id: RecordId,
    /// Owning customer
    pub customer_id: CustomerId,
    /// Short title, shown on statements
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Full amount owed; always positive
    pub total_amount: Decimal,
    /// Accumulated payments; 0 <= paid_amount <= total_amount
    pub paid_amount: Decimal,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Derived settlement state
    pub status: RecordStatus,
    /// Created timestamp; drives statement ordering
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl CustomerRecord {
    /// Creates an open record
    pub fn new(customer_id: CustomerId, title: impl Into<String>, total: Amount) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new_v7(),
            customer_id,
            title: title.into(),
            description: None,
            total_amount: total.get(),
            paid_amount: Decimal::ZERO,
            due_date: None,
            status: RecordStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Amount still owed on this record
    pub fn remaining(&self) -> Decimal {
        self.total_amount - self.paid_amount
    }

    /// True once fully paid
    pub fn is_settled(&self) -> bool {
        self.status == RecordStatus::Paid
    }

    /// Applies a payment, recomputing the status
    ///
    /// # Errors
    ///
    /// `InvalidAmount` if the payment is non-positive or exceeds the
    /// remaining balance. Overpayment is never accepted.
    pub fn apply_payment(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(
                amount,
                "payment amount must be positive",
            ));
        }
        let remaining = self.remaining();
        if amount > remaining {
            return Err(LedgerError::invalid_amount(
                amount,
                format!("payment exceeds remaining balance {remaining}"),
            ));
        }
        self.paid_amount += amount;
        self.status = derive_status(self.paid_amount, self.total_amount);
        self.updated_at = Utc::now();
        Ok(())
    }
}
