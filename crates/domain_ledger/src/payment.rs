//! Payment allocation
//!
//! Applies a payment against a customer record: the record's paid amount
//! and status are updated and a matching credit transaction is posted
//! against the chosen treasury, both committed as one atomic unit through
//! [`crate::ports::RecordStore::commit_payment`].

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use core_kernel::{Amount, RecordId, TreasuryId};

use crate::error::LedgerError;
use crate::ports::{RecordStore, TreasuryStore};
use crate::transaction::{CashTransaction, PaymentMethod};

/// A request to pay down a customer record
#[derive(Debug, Clone, Deserialize)]
pub struct PayRecordRequest {
    pub record_id: RecordId,
    pub amount: Decimal,
    pub treasury_id: TreasuryId,
    pub payment_method: PaymentMethod,
    pub description: Option<String>,
}

/// Applies payments to records
#[derive(Clone)]
pub struct PaymentAllocator {
    records: Arc<dyn RecordStore>,
    treasuries: Arc<dyn TreasuryStore>,
}

impl PaymentAllocator {
    pub fn new(records: Arc<dyn RecordStore>, treasuries: Arc<dyn TreasuryStore>) -> Self {
        Self {
            records,
            treasuries,
        }
    }

    /// Applies the payment and returns the emitted transaction
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown record or treasury
    /// - `InactiveEntity` if the treasury is closed
    /// - `InvalidAmount` for a non-positive payment or one exceeding the
    ///   record's remaining balance; the record and ledger are untouched
    pub async fn pay(&self, request: PayRecordRequest) -> Result<CashTransaction, LedgerError> {
        let mut record = self
            .records
            .get(request.record_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Record", request.record_id))?;

        let treasury = self
            .treasuries
            .get(request.treasury_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Treasury", request.treasury_id))?;
        if !treasury.is_active {
            return Err(LedgerError::inactive("Treasury", treasury.id));
        }

        let amount = Amount::new(request.amount).map_err(|_| {
            LedgerError::invalid_amount(request.amount, "payment amount must be positive")
        })?;
        record.apply_payment(amount.get())?;

        let description = request
            .description
            .unwrap_or_else(|| format!("Payment for {}", record.title));
        let txn = CashTransaction::record_payment(
            treasury.id,
            record.customer_id,
            record.id,
            amount,
            request.payment_method,
            description,
        );

        self.records.commit_payment(&record, &txn).await?;

        info!(
            record = %record.id,
            transaction = %txn.id,
            amount = %amount,
            status = record.status.as_str(),
            "payment allocated"
        );
        Ok(txn)
    }
}
