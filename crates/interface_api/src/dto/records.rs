//! Record DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{Amount, CustomerId, TreasuryId};
use domain_ledger::{CustomerRecord, LedgerError, PaymentMethod};

/// Body for creating a customer record
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub customer_id: CustomerId,
    pub title: String,
    pub description: Option<String>,
    pub total_amount: Decimal,
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateRecordRequest {
    /// Validates the total and builds the record entity
    pub fn build(self) -> Result<CustomerRecord, LedgerError> {
        let total = Amount::new(self.total_amount).map_err(|_| {
            LedgerError::invalid_amount(self.total_amount, "record total must be positive")
        })?;
        let mut record = CustomerRecord::new(self.customer_id, self.title, total);
        if let Some(description) = self.description {
            record = record.with_description(description);
        }
        if let Some(due_date) = self.due_date {
            record = record.with_due_date(due_date);
        }
        Ok(record)
    }
}

/// Body for paying down a record; the record id comes from the path
#[derive(Debug, Deserialize)]
pub struct PayRecordBody {
    pub amount: Decimal,
    pub treasury_id: TreasuryId,
    pub payment_method: PaymentMethod,
    pub description: Option<String>,
}
