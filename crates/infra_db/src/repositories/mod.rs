//! Repository implementations of the store ports
//!
//! One repository per collection. Each holds a clone of the shared pool;
//! `PgPool` is internally reference-counted so cloning is cheap.

mod customers;
mod ledger;
mod obligations;
mod records;
mod treasuries;

pub use customers::CustomerRepository;
pub use ledger::LedgerRepository;
pub use obligations::ObligationRepository;
pub use records::RecordRepository;
pub use treasuries::TreasuryRepository;
