//! Ledger service facade
//!
//! Bundles the calculator, guard, builder, allocator, and reversal handler
//! behind one service the API layer calls. Each operation runs its steps
//! strictly in order within a request; the store is the only serialization
//! point across requests unless `serialize_credit_checks` is enabled.

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use core_kernel::{CustomerId, TreasuryId};

use domain_customer::{Customer, CustomerStore};

use crate::balance::{BalanceCalculator, CustomerBalance};
use crate::credit::{CreditLimitGuard, CustomerLocks};
use crate::error::LedgerError;
use crate::payment::{PayRecordRequest, PaymentAllocator};
use crate::ports::{LedgerStore, RecordStore, TransactionFilter, TreasuryStore};
use crate::record::CustomerRecord;
use crate::reversal::{ReversalHandler, ReverseRequest};
use crate::statement::{Statement, StatementBuilder};
use crate::transaction::{CashTransaction, EntryType, NewTransaction};
use crate::treasury::Treasury;

/// Tuning knobs for the ledger service
#[derive(Debug, Clone, Default)]
pub struct LedgerConfig {
    /// Hold a per-customer lock across credit check + insert
    ///
    /// Off by default: concurrent debits may then both pass the check
    /// before either commits, which is acceptable at this system's scale.
    pub serialize_credit_checks: bool,
}

/// A customer with their balance and transaction history
#[derive(Debug, Clone, Serialize)]
pub struct CustomerSummary {
    pub customer: Customer,
    pub balance: CustomerBalance,
    /// Most recent first
    pub transactions: Vec<CashTransaction>,
}

/// Facade over the ledger domain
pub struct LedgerService {
    customers: Arc<dyn CustomerStore>,
    ledger: Arc<dyn LedgerStore>,
    records: Arc<dyn RecordStore>,
    treasuries: Arc<dyn TreasuryStore>,
    balances: BalanceCalculator,
    guard: CreditLimitGuard,
    statements: StatementBuilder,
    payments: PaymentAllocator,
    reversals: ReversalHandler,
    locks: CustomerLocks,
    config: LedgerConfig,
}

impl LedgerService {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        ledger: Arc<dyn LedgerStore>,
        records: Arc<dyn RecordStore>,
        treasuries: Arc<dyn TreasuryStore>,
    ) -> Self {
        Self::with_config(customers, ledger, records, treasuries, LedgerConfig::default())
    }

    pub fn with_config(
        customers: Arc<dyn CustomerStore>,
        ledger: Arc<dyn LedgerStore>,
        records: Arc<dyn RecordStore>,
        treasuries: Arc<dyn TreasuryStore>,
        config: LedgerConfig,
    ) -> Self {
        let balances = BalanceCalculator::new(ledger.clone(), records.clone());
        let guard = CreditLimitGuard::new(customers.clone(), balances.clone());
        let statements =
            StatementBuilder::new(customers.clone(), records.clone(), ledger.clone());
        let payments = PaymentAllocator::new(records.clone(), treasuries.clone());
        let reversals = ReversalHandler::new(ledger.clone());
        Self {
            customers,
            ledger,
            records,
            treasuries,
            balances,
            guard,
            statements,
            payments,
            reversals,
            locks: CustomerLocks::new(),
            config,
        }
    }

    /// Current derived balance for a customer
    pub async fn calculate_balance(
        &self,
        customer_id: CustomerId,
    ) -> Result<CustomerBalance, LedgerError> {
        self.require_customer(customer_id).await?;
        self.balances.calculate(customer_id).await
    }

    /// Whether an additional debit of `amount` would be accepted
    pub async fn check_credit_limit(
        &self,
        customer_id: CustomerId,
        amount: Decimal,
    ) -> Result<bool, LedgerError> {
        self.guard.is_allowed(customer_id, amount).await
    }

    /// Customer, balance, and transaction history (most recent first)
    pub async fn customer_summary(
        &self,
        customer_id: CustomerId,
    ) -> Result<CustomerSummary, LedgerError> {
        let customer = self.require_customer(customer_id).await?;
        let balance = self.balances.calculate(customer_id).await?;
        let mut transactions = self
            .ledger
            .find(TransactionFilter::for_customer(customer_id))
            .await?;
        transactions.reverse();
        Ok(CustomerSummary {
            customer,
            balance,
            transactions,
        })
    }

    /// Full chronological running-balance statement
    pub async fn generate_statement(
        &self,
        customer_id: CustomerId,
    ) -> Result<Statement, LedgerError> {
        self.statements.build(customer_id).await
    }

    /// Applies a payment against a record
    pub async fn pay_record(
        &self,
        request: PayRecordRequest,
    ) -> Result<CashTransaction, LedgerError> {
        self.payments.pay(request).await
    }

    /// Reverses a posted transaction
    pub async fn reverse_transaction(
        &self,
        request: ReverseRequest,
    ) -> Result<CashTransaction, LedgerError> {
        self.reversals.reverse(request).await
    }

    /// Creates a customer record (an obligation the customer owes)
    pub async fn create_record(
        &self,
        record: CustomerRecord,
    ) -> Result<CustomerRecord, LedgerError> {
        let customer = self.require_customer(record.customer_id).await?;
        if !customer.is_active {
            return Err(LedgerError::inactive("Customer", customer.id));
        }
        let stored = self.records.insert(record).await?;
        info!(record = %stored.id, customer = %stored.customer_id, "record created");
        Ok(stored)
    }

    /// Posts a manual ledger entry
    ///
    /// Debits tied to a customer pass through the credit limit guard
    /// before the write; on rejection nothing is committed. With
    /// `serialize_credit_checks` enabled the customer's lock is held from
    /// the check until the insert lands.
    pub async fn record_transaction(
        &self,
        input: NewTransaction,
    ) -> Result<CashTransaction, LedgerError> {
        let treasury = self.require_treasury(input.treasury_id).await?;
        if !treasury.is_active {
            return Err(LedgerError::inactive("Treasury", treasury.id));
        }

        if let Some(customer_id) = input.customer_id {
            let customer = self.require_customer(customer_id).await?;
            if !customer.is_active {
                return Err(LedgerError::inactive("Customer", customer.id));
            }
        }

        let needs_guard =
            input.entry_type == EntryType::Debit && input.customer_id.is_some();
        let _lock = match (needs_guard, self.config.serialize_credit_checks) {
            (true, true) => Some(self.locks.acquire(input.customer_id.unwrap()).await),
            _ => None,
        };

        if needs_guard {
            self.guard
                .guard_debit(input.customer_id.unwrap(), input.amount)
                .await?;
        }

        let txn = input.build()?;
        let stored = self.ledger.insert(txn).await?;
        info!(
            transaction = %stored.id,
            treasury = %stored.treasury_id,
            entry_type = stored.entry_type.as_str(),
            amount = %stored.amount,
            "transaction posted"
        );
        Ok(stored)
    }

    /// Lists transactions matching `filter`, ascending by creation time
    pub async fn transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<CashTransaction>, LedgerError> {
        Ok(self.ledger.find(filter).await?)
    }

    /// Derived balance of a treasury: initial seed plus net cash flow
    ///
    /// Never served from a stored running balance.
    pub async fn treasury_balance(&self, treasury_id: TreasuryId) -> Result<Decimal, LedgerError> {
        let treasury = self.require_treasury(treasury_id).await?;
        let totals = self.ledger.flow_totals(treasury_id, None).await?;
        Ok(treasury.initial_balance + totals.net())
    }

    /// Closes a treasury; it keeps its history but refuses new transactions
    pub async fn close_treasury(&self, treasury_id: TreasuryId) -> Result<Treasury, LedgerError> {
        let mut treasury = self.require_treasury(treasury_id).await?;
        if !treasury.is_active {
            return Err(LedgerError::inactive("Treasury", treasury.id));
        }
        treasury.close();
        let stored = self.treasuries.update(treasury).await?;
        info!(treasury = %stored.id, "treasury closed");
        Ok(stored)
    }

    async fn require_customer(&self, id: CustomerId) -> Result<Customer, LedgerError> {
        self.customers
            .get(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Customer", id))
    }

    async fn require_treasury(&self, id: TreasuryId) -> Result<Treasury, LedgerError> {
        self.treasuries
            .get(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Treasury", id))
    }
}
