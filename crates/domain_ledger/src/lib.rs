//! Ledger Domain - the reconciliation core
//!
//! This crate owns the hard rules of the system: how a customer's balance is
//! derived from two independent event streams, when a debit must be refused,
//! and how history is corrected without ever being rewritten.
//!
//! # Sign convention
//!
//! There is exactly one direction vocabulary in this codebase:
//! [`EntryType::Debit`] means the customer owes more (cash left the
//! treasury), [`EntryType::Credit`] means the customer paid down
//! (cash entered the treasury). Every balance, statement line, and treasury
//! flow is derived from this pair; no parallel IN/OUT enum exists.
//!
//! # Components
//!
//! - [`balance::BalanceCalculator`] - ledger total + unpaid records
//! - [`credit::CreditLimitGuard`] - write-time enforcement of credit limits
//! - [`statement::StatementBuilder`] - chronological running-balance view
//! - [`payment::PaymentAllocator`] - applies payments against records
//! - [`reversal::ReversalHandler`] - append-only compensating transactions
//! - [`service::LedgerService`] - facade bundling the above for callers
//!
//! Posted transactions are immutable: there is deliberately no update or
//! delete operation on the ledger port. The only correction path is a
//! reversal, which preserves the full audit history.

pub mod balance;
pub mod credit;
pub mod error;
pub mod memory;
pub mod payment;
pub mod ports;
pub mod record;
pub mod reversal;
pub mod service;
pub mod statement;
pub mod transaction;
pub mod treasury;

pub use balance::{BalanceCalculator, CustomerBalance};
pub use credit::{CreditLimitGuard, CustomerLocks};
pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use payment::{PayRecordRequest, PaymentAllocator};
pub use ports::{FlowTotals, LedgerStore, RecordStore, TransactionFilter, TreasuryStore};
pub use record::{derive_status, CustomerRecord, RecordStatus};
pub use reversal::{ReversalHandler, ReverseRequest};
pub use service::{CustomerSummary, LedgerConfig, LedgerService};
pub use statement::{Statement, StatementBuilder, StatementEntry};
pub use transaction::{
    CashTransaction, EntryType, NewTransaction, PaymentMethod, ReferenceType,
};
pub use treasury::{Treasury, TreasuryType};
