//! Customer Domain
//!
//! Customers are the parties whose debt the ledger tracks. Each carries a
//! credit limit (`0` is the "unlimited" sentinel, not "no credit"), an
//! opening-balance seed used by the statement builder, and an active flag
//! checked before any write that touches the customer.
//!
//! Persistence goes through the [`ports::CustomerStore`] trait; an
//! in-memory reference adapter lives in [`memory`] for tests and local use.

pub mod customer;
pub mod error;
pub mod memory;
pub mod ports;

pub use customer::{Customer, CustomerCategory, NewCustomer, UpdateCustomer};
pub use error::CustomerError;
pub use memory::InMemoryCustomerStore;
pub use ports::{CustomerQuery, CustomerStore};
