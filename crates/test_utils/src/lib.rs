//! Test Utilities
//!
//! Builders and fixtures shared by the domain and interface test suites.
//! Builders let a test specify only what it cares about - typically the
//! amounts and the `created_at` ordering - and default the rest.

pub mod builders;
pub mod fixtures;

pub use builders::{
    TestCustomerBuilder, TestRecordBuilder, TestTransactionBuilder, TestTreasuryBuilder,
};
pub use fixtures::day;
