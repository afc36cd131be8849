//! Core Kernel - shared types for the cashbook system
//!
//! This crate holds the vocabulary every domain crate speaks:
//!
//! - **Money**: `Currency` and the positive-magnitude `Amount` newtype
//!   backed by `rust_decimal` for precise arithmetic
//! - **Identifiers**: strongly-typed UUID newtypes for every entity
//! - **Ports**: the `StoreError` taxonomy and `DomainPort` marker that all
//!   store adapters (database or in-memory) implement against
//!
//! Domain crates depend only on this kernel; infrastructure crates adapt
//! external systems to the port contracts defined here.

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{CustomerId, ObligationId, RecordId, TransactionId, TreasuryId};
pub use money::{Amount, AmountError, Currency};
pub use ports::{DomainPort, StoreError};
