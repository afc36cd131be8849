//! Credit limit enforcement
//!
//! The guard runs synchronously before any write that increases what a
//! customer owes. A limit of zero (or below) is the unlimited sentinel and
//! skips enforcement entirely.
//!
//! Two concurrent debits can both pass the check before either commits.
//! [`CustomerLocks`] provides the per-customer serialization point for
//! deployments that opt into strict enforcement; the service decides
//! whether to hold the lock across check + insert.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use core_kernel::CustomerId;

use domain_customer::CustomerStore;

use crate::balance::BalanceCalculator;
use crate::error::LedgerError;

/// Validates prospective debits against a customer's credit limit
#[derive(Clone)]
pub struct CreditLimitGuard {
    customers: Arc<dyn CustomerStore>,
    balances: BalanceCalculator,
}

impl CreditLimitGuard {
    pub fn new(customers: Arc<dyn CustomerStore>, balances: BalanceCalculator) -> Self {
        Self { customers, balances }
    }

    /// Rejects the debit if it would push the balance past the limit
    ///
    /// # Errors
    ///
    /// - `NotFound` if the customer does not exist
    /// - `CreditLimitExceeded` with the limit and the would-be balance
    pub async fn guard_debit(
        &self,
        customer_id: CustomerId,
        additional: Decimal,
    ) -> Result<(), LedgerError> {
        let customer = self
            .customers
            .get(customer_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Customer", customer_id))?;

        if customer.has_unlimited_credit() {
            return Ok(());
        }

        let balance = self.balances.calculate(customer_id).await?;
        let projected = balance.total + additional;
        if projected > customer.credit_limit {
            return Err(LedgerError::CreditLimitExceeded {
                limit: customer.credit_limit,
                projected,
            });
        }
        Ok(())
    }

    /// Boolean form of the check for callers that only need yes/no
    pub async fn is_allowed(
        &self,
        customer_id: CustomerId,
        additional: Decimal,
    ) -> Result<bool, LedgerError> {
        match self.guard_debit(customer_id, additional).await {
            Ok(()) => Ok(true),
            Err(LedgerError::CreditLimitExceeded { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }
}

/// Per-customer async locks
///
/// Lazily creates one mutex per customer id. Holding the guard across a
/// credit check and the subsequent insert closes the check-then-commit
/// window for that customer within this process.
#[derive(Default)]
pub struct CustomerLocks {
    locks: Mutex<HashMap<CustomerId, Arc<Mutex<()>>>>,
}

impl CustomerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for `customer_id`, creating it on first use
    pub async fn acquire(&self, customer_id: CustomerId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(customer_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
