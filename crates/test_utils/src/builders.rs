//! Test data builders

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Amount, CustomerId, Currency, TreasuryId};
use domain_customer::{Customer, CustomerCategory};
use domain_ledger::{
    derive_status, CashTransaction, CustomerRecord, EntryType, PaymentMethod, ReferenceType,
    Treasury, TreasuryType,
};

use crate::fixtures::day;

/// Builder for test customers
pub struct TestCustomerBuilder {
    name: String,
    category: CustomerCategory,
    credit_limit: Decimal,
    opening_balance: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Default for TestCustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCustomerBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test Customer".to_string(),
            category: CustomerCategory::Regular,
            credit_limit: Decimal::ZERO,
            opening_balance: Decimal::ZERO,
            is_active: true,
            created_at: day(0),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: CustomerCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_credit_limit(mut self, limit: Decimal) -> Self {
        self.credit_limit = limit;
        self
    }

    pub fn with_opening_balance(mut self, opening: Decimal) -> Self {
        self.opening_balance = opening;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Customer {
        let mut customer = Customer::new(self.name, self.category)
            .with_credit_limit(self.credit_limit)
            .with_opening_balance(self.opening_balance);
        customer.is_active = self.is_active;
        customer.created_at = self.created_at;
        customer.updated_at = self.created_at;
        customer
    }
}

/// Builder for test treasuries
pub struct TestTreasuryBuilder {
    name: String,
    treasury_type: TreasuryType,
    currency: Currency,
    initial_balance: Decimal,
    min_balance: Decimal,
    is_active: bool,
}

impl Default for TestTreasuryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTreasuryBuilder {
    pub fn new() -> Self {
        Self {
            name: "Main till".to_string(),
            treasury_type: TreasuryType::Cash,
            currency: Currency::Usd,
            initial_balance: Decimal::ZERO,
            min_balance: Decimal::ZERO,
            is_active: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_initial_balance(mut self, balance: Decimal) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn with_min_balance(mut self, min: Decimal) -> Self {
        self.min_balance = min;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Treasury {
        let mut treasury = Treasury::new(self.name, self.treasury_type, self.currency)
            .with_initial_balance(self.initial_balance)
            .with_min_balance(self.min_balance);
        treasury.is_active = self.is_active;
        treasury
    }
}

/// Builder for test customer records
pub struct TestRecordBuilder {
    customer_id: CustomerId,
    title: String,
    total_amount: Decimal,
    paid_amount: Decimal,
    created_at: DateTime<Utc>,
}

impl TestRecordBuilder {
    pub fn for_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            title: "Invoice".to_string(),
            total_amount: dec!(100),
            paid_amount: Decimal::ZERO,
            created_at: day(1),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total_amount = total;
        self
    }

    pub fn with_paid(mut self, paid: Decimal) -> Self {
        self.paid_amount = paid;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> CustomerRecord {
        let mut record = CustomerRecord::new(
            self.customer_id,
            self.title,
            Amount::new(self.total_amount).expect("builder total must be positive"),
        );
        record.paid_amount = self.paid_amount;
        record.status = derive_status(self.paid_amount, self.total_amount);
        record.created_at = self.created_at;
        record.updated_at = self.created_at;
        record
    }
}

/// Builder for test transactions
pub struct TestTransactionBuilder {
    treasury_id: TreasuryId,
    customer_id: Option<CustomerId>,
    entry_type: EntryType,
    amount: Decimal,
    payment_method: PaymentMethod,
    description: String,
    reference_type: ReferenceType,
    created_at: DateTime<Utc>,
}

impl TestTransactionBuilder {
    pub fn debit(treasury_id: TreasuryId, amount: Decimal) -> Self {
        Self::new(treasury_id, EntryType::Debit, amount)
    }

    pub fn credit(treasury_id: TreasuryId, amount: Decimal) -> Self {
        Self::new(treasury_id, EntryType::Credit, amount)
    }

    fn new(treasury_id: TreasuryId, entry_type: EntryType, amount: Decimal) -> Self {
        Self {
            treasury_id,
            customer_id: None,
            entry_type,
            amount,
            payment_method: PaymentMethod::Cash,
            description: "Test entry".to_string(),
            reference_type: ReferenceType::Manual,
            created_at: day(1),
        }
    }

    pub fn for_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> CashTransaction {
        let mut txn = CashTransaction::manual(
            self.treasury_id,
            self.entry_type,
            Amount::new(self.amount).expect("builder amount must be positive"),
            self.payment_method,
            self.description,
        );
        txn.customer_id = self.customer_id;
        txn.reference_type = self.reference_type;
        txn.created_at = self.created_at;
        txn
    }
}
