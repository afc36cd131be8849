//! Cash transactions
//!
//! A transaction is an atomic, immutable cash movement posted against a
//! treasury, optionally tied to a customer. The amount is always a positive
//! magnitude; direction is carried exclusively by [`EntryType`].
//!
//! Transactions are created three ways: manual entry, payment allocation
//! against a customer record, and reversal of a prior transaction. Once
//! posted they are never edited or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{Amount, CustomerId, RecordId, TransactionId, TreasuryId};

use crate::error::LedgerError;

/// Direction of a cash movement
///
/// `Debit` increases what the customer owes; cash left the treasury.
/// `Credit` decreases what the customer owes; cash entered the treasury.
/// This is the canonical pair for the whole system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    Debit,
    Credit,
}

impl EntryType {
    /// Returns the opposite direction, used when building a reversal
    pub fn opposite(&self) -> Self {
        match self {
            EntryType::Debit => EntryType::Credit,
            EntryType::Credit => EntryType::Debit,
        }
    }

    /// Returns the stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Debit => "DEBIT",
            EntryType::Credit => "CREDIT",
        }
    }

    /// Parses the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DEBIT" => Some(EntryType::Debit),
            "CREDIT" => Some(EntryType::Credit),
            _ => None,
        }
    }
}

/// How the cash moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Cheque,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Transfer => "TRANSFER",
            PaymentMethod::Cheque => "CHEQUE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CASH" => Some(PaymentMethod::Cash),
            "TRANSFER" => Some(PaymentMethod::Transfer),
            "CHEQUE" => Some(PaymentMethod::Cheque),
            _ => None,
        }
    }
}

/// What caused this transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    /// Entered by hand
    Manual,
    /// Emitted by a payment against a customer record
    CustomerRecord,
    /// Emitted by a reversal of a prior transaction
    Adjustment,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Manual => "MANUAL",
            ReferenceType::CustomerRecord => "CUSTOMER_RECORD",
            ReferenceType::Adjustment => "ADJUSTMENT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MANUAL" => Some(ReferenceType::Manual),
            "CUSTOMER_RECORD" => Some(ReferenceType::CustomerRecord),
            "ADJUSTMENT" => Some(ReferenceType::Adjustment),
            _ => None,
        }
    }
}

/// An immutable ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashTransaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Treasury the cash moved through
    pub treasury_id: TreasuryId,
    /// Customer whose balance this movement affects, if any
    pub customer_id: Option<CustomerId>,
    /// Direction of the movement
    pub entry_type: EntryType,
    /// Positive magnitude; the sign lives in `entry_type`
    pub amount: Amount,
    /// How the cash moved
    pub payment_method: PaymentMethod,
    /// Human-readable description, shown on statements
    pub description: String,
    /// What caused this transaction
    pub reference_type: ReferenceType,
    /// The record or transaction that caused this one
    pub reference_id: Option<Uuid>,
    /// Posting time; drives statement ordering
    pub created_at: DateTime<Utc>,
}

impl CashTransaction {
    /// Creates a manual entry
    pub fn manual(
        treasury_id: TreasuryId,
        entry_type: EntryType,
        amount: Amount,
        payment_method: PaymentMethod,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new_v7(),
            treasury_id,
            customer_id: None,
            entry_type,
            amount,
            payment_method,
            description: description.into(),
            reference_type: ReferenceType::Manual,
            reference_id: None,
            created_at: Utc::now(),
        }
    }

    /// Attaches the customer this movement belongs to
    pub fn for_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Creates the credit entry emitted when a payment is applied to a record
    pub fn record_payment(
        treasury_id: TreasuryId,
        customer_id: CustomerId,
        record_id: RecordId,
        amount: Amount,
        payment_method: PaymentMethod,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new_v7(),
            treasury_id,
            customer_id: Some(customer_id),
            entry_type: EntryType::Credit,
            amount,
            payment_method,
            description: description.into(),
            reference_type: ReferenceType::CustomerRecord,
            reference_id: Some(*record_id.as_uuid()),
            created_at: Utc::now(),
        }
    }

    /// Creates the compensating entry that negates `original`
    ///
    /// Same treasury, customer, amount, and method; opposite direction.
    /// The original is referenced by id and left untouched.
    pub fn reversal_of(original: &CashTransaction, reason: &str) -> Self {
        Self {
            id: TransactionId::new_v7(),
            treasury_id: original.treasury_id,
            customer_id: original.customer_id,
            entry_type: original.entry_type.opposite(),
            amount: original.amount,
            payment_method: original.payment_method,
            description: format!("Reversal of {}: {}", original.id, reason),
            reference_type: ReferenceType::Adjustment,
            reference_id: Some(*original.id.as_uuid()),
            created_at: Utc::now(),
        }
    }

    /// Signed effect on the customer's balance: Debit raises it
    pub fn customer_delta(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount.get(),
            EntryType::Credit => -self.amount.get(),
        }
    }

    /// Signed effect on the treasury's cash: Credit brings cash in
    pub fn treasury_delta(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => -self.amount.get(),
            EntryType::Credit => self.amount.get(),
        }
    }

    /// True if this transaction is itself a reversal
    pub fn is_reversal(&self) -> bool {
        self.reference_type == ReferenceType::Adjustment
    }
}

/// Input for a manual ledger entry
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub treasury_id: TreasuryId,
    pub customer_id: Option<CustomerId>,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub description: String,
}

impl NewTransaction {
    /// Validates the amount and builds the transaction
    pub fn build(self) -> Result<CashTransaction, LedgerError> {
        let amount = Amount::new(self.amount).map_err(|_| {
            LedgerError::invalid_amount(self.amount, "transaction amount must be positive")
        })?;
        let mut txn = CashTransaction::manual(
            self.treasury_id,
            self.entry_type,
            amount,
            self.payment_method,
            self.description,
        );
        txn.customer_id = self.customer_id;
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(value: Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_entry_type_opposite() {
        assert_eq!(EntryType::Debit.opposite(), EntryType::Credit);
        assert_eq!(EntryType::Credit.opposite(), EntryType::Debit);
    }

    #[test]
    fn test_customer_delta_signs() {
        let treasury = TreasuryId::new();
        let debit = CashTransaction::manual(
            treasury,
            EntryType::Debit,
            amount(dec!(100)),
            PaymentMethod::Cash,
            "advance",
        );
        let credit = CashTransaction::manual(
            treasury,
            EntryType::Credit,
            amount(dec!(40)),
            PaymentMethod::Cash,
            "repayment",
        );

        assert_eq!(debit.customer_delta(), dec!(100));
        assert_eq!(credit.customer_delta(), dec!(-40));
        assert_eq!(debit.treasury_delta(), dec!(-100));
        assert_eq!(credit.treasury_delta(), dec!(40));
    }

    #[test]
    fn test_reversal_negates_original() {
        let original = CashTransaction::manual(
            TreasuryId::new(),
            EntryType::Debit,
            amount(dec!(250)),
            PaymentMethod::Transfer,
            "stock advance",
        )
        .for_customer(CustomerId::new());

        let reversal = CashTransaction::reversal_of(&original, "entered twice");

        assert_eq!(reversal.entry_type, EntryType::Credit);
        assert_eq!(reversal.amount, original.amount);
        assert_eq!(reversal.treasury_id, original.treasury_id);
        assert_eq!(reversal.customer_id, original.customer_id);
        assert_eq!(reversal.reference_type, ReferenceType::Adjustment);
        assert_eq!(reversal.reference_id, Some(*original.id.as_uuid()));
        assert!(reversal.description.contains("entered twice"));
        assert_eq!(
            original.customer_delta() + reversal.customer_delta(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_new_transaction_rejects_non_positive() {
        let input = NewTransaction {
            treasury_id: TreasuryId::new(),
            customer_id: None,
            entry_type: EntryType::Debit,
            amount: dec!(0),
            payment_method: PaymentMethod::Cash,
            description: "zero".into(),
        };
        assert!(matches!(
            input.build(),
            Err(LedgerError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_reference_type_serde_form() {
        let json = serde_json::to_string(&ReferenceType::CustomerRecord).unwrap();
        assert_eq!(json, "\"CUSTOMER_RECORD\"");
    }
}
