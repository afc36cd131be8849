//! Statement generation
//!
//! A statement fuses three event sources into one chronological,
//! running-balance view:
//!
//! 1. an opening-balance pseudo-event dated at the customer's creation,
//! 2. every record, as a debit for its full original amount, and
//! 3. every transaction, as a debit or credit per its entry type.
//!
//! Payments against records are NOT folded back into the record line; they
//! appear as their own credit transactions. The merge is a stable sort by
//! date over the concatenation (opening, records, transactions), so events
//! sharing a timestamp keep that input order. Generation is read-only and
//! deterministic: unchanged data always yields an identical statement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use core_kernel::CustomerId;

use domain_customer::{Customer, CustomerStore};

use crate::error::LedgerError;
use crate::ports::{LedgerStore, RecordStore, TransactionFilter};
use crate::transaction::EntryType;

/// One line of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementEntry {
    /// Event time
    pub date: DateTime<Utc>,
    /// What the line is: record title, transaction description, or opening
    pub title: String,
    /// Amount that raised the balance
    pub debit: Decimal,
    /// Amount that lowered the balance
    pub credit: Decimal,
    /// Running balance after this line
    pub balance: Decimal,
}

/// A complete customer statement
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub customer: Customer,
    /// The stored opening seed, echoed for display
    pub opening_balance: Decimal,
    /// Balance after the final line
    pub current_balance: Decimal,
    pub entries: Vec<StatementEntry>,
}

/// Builds customer statements; never mutates store state
#[derive(Clone)]
pub struct StatementBuilder {
    customers: Arc<dyn CustomerStore>,
    records: Arc<dyn RecordStore>,
    ledger: Arc<dyn LedgerStore>,
}

struct RawEvent {
    date: DateTime<Utc>,
    title: String,
    debit: Decimal,
    credit: Decimal,
}

impl StatementBuilder {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        records: Arc<dyn RecordStore>,
        ledger: Arc<dyn LedgerStore>,
    ) -> Self {
        Self {
            customers,
            records,
            ledger,
        }
    }

    /// Builds the statement for `customer_id`
    ///
    /// # Errors
    ///
    /// `NotFound` if the customer does not exist.
    pub async fn build(&self, customer_id: CustomerId) -> Result<Statement, LedgerError> {
        let customer = self
            .customers
            .get(customer_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Customer", customer_id))?;

        let records = self.records.find_by_customer(customer_id).await?;
        let transactions = self
            .ledger
            .find(TransactionFilter::for_customer(customer_id))
            .await?;

        let opening = customer.opening_balance;
        let mut events = Vec::with_capacity(1 + records.len() + transactions.len());

        // Concatenation order is the tie-break for equal timestamps:
        // opening first, then records, then transactions. A zero opening
        // balance contributes nothing and gets no line.
        if opening != Decimal::ZERO {
            events.push(RawEvent {
                date: customer.created_at,
                title: "Opening balance".to_string(),
                debit: opening.max(Decimal::ZERO),
                credit: (-opening).max(Decimal::ZERO),
            });
        }

        for record in &records {
            events.push(RawEvent {
                date: record.created_at,
                title: record.title.clone(),
                debit: record.total_amount,
                credit: Decimal::ZERO,
            });
        }

        for txn in &transactions {
            let (debit, credit) = match txn.entry_type {
                EntryType::Debit => (txn.amount.get(), Decimal::ZERO),
                EntryType::Credit => (Decimal::ZERO, txn.amount.get()),
            };
            events.push(RawEvent {
                date: txn.created_at,
                title: txn.description.clone(),
                debit,
                credit,
            });
        }

        events.sort_by_key(|e| e.date);

        let mut balance = Decimal::ZERO;
        let entries: Vec<StatementEntry> = events
            .into_iter()
            .map(|event| {
                balance += event.debit - event.credit;
                StatementEntry {
                    date: event.date,
                    title: event.title,
                    debit: event.debit,
                    credit: event.credit,
                    balance,
                }
            })
            .collect();

        Ok(Statement {
            customer,
            opening_balance: opening,
            current_balance: balance,
            entries,
        })
    }
}
