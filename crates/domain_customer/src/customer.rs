//! Customer aggregate
//!
//! A customer is anyone who can owe the business money: ledger transactions
//! and customer records both reference a `CustomerId`. The balance itself is
//! never stored on the customer - it is derived from those two streams on
//! every read. What *is* stored here:
//!
//! - `credit_limit`: the ceiling on what the customer may owe. A limit of
//!   zero means unlimited; the guard skips enforcement entirely.
//! - `opening_balance`: a signed seed captured at onboarding. Positive means
//!   the customer already owed the business; negative means the business
//!   owed the customer. It is the first pseudo-event of every statement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::CustomerId;

/// Commercial category of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerCategory {
    Regular,
    Vip,
    Wholesale,
}

impl CustomerCategory {
    /// Returns the stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerCategory::Regular => "regular",
            CustomerCategory::Vip => "vip",
            CustomerCategory::Wholesale => "wholesale",
        }
    }

    /// Parses the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "regular" => Some(CustomerCategory::Regular),
            "vip" => Some(CustomerCategory::Vip),
            "wholesale" => Some(CustomerCategory::Wholesale),
            _ => None,
        }
    }
}

/// A customer account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Commercial category
    pub category: CustomerCategory,
    /// Maximum the customer may owe; zero disables enforcement
    pub credit_limit: Decimal,
    /// Signed balance seed at onboarding (positive = customer owed us)
    pub opening_balance: Decimal,
    /// Inactive customers are refused new transactions and records
    pub is_active: bool,
    /// Free-form notes
    pub notes: Option<String>,
    /// Created timestamp - also the date of the opening statement event
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates an active customer with no credit limit and a zero opening balance
    pub fn new(name: impl Into<String>, category: CustomerCategory) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new_v7(),
            name: name.into(),
            phone: None,
            email: None,
            address: None,
            category,
            credit_limit: Decimal::ZERO,
            opening_balance: Decimal::ZERO,
            is_active: true,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the credit limit
    pub fn with_credit_limit(mut self, limit: Decimal) -> Self {
        self.credit_limit = limit;
        self
    }

    /// Sets the opening balance seed
    pub fn with_opening_balance(mut self, opening: Decimal) -> Self {
        self.opening_balance = opening;
        self
    }

    /// Sets contact details
    pub fn with_contact(mut self, phone: Option<String>, email: Option<String>) -> Self {
        self.phone = phone;
        self.email = email;
        self
    }

    /// True when the credit limit is the unlimited sentinel
    pub fn has_unlimited_credit(&self) -> bool {
        self.credit_limit <= Decimal::ZERO
    }

    /// Applies a partial update, bumping `updated_at`
    pub fn apply_update(&mut self, update: UpdateCustomer) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(limit) = update.credit_limit {
            self.credit_limit = limit;
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now();
    }
}

fn check_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), validator::ValidationErrors> {
    if value < Decimal::ZERO {
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, ValidationError::new("negative"));
        return Err(errors);
    }
    Ok(())
}

/// Input for creating a customer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCustomer {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: CustomerCategory,
    /// Must be >= 0; zero means unlimited
    #[serde(default)]
    pub credit_limit: Decimal,
    /// Signed seed; may be negative when the business owes the customer
    #[serde(default)]
    pub opening_balance: Decimal,
    pub notes: Option<String>,
}

impl NewCustomer {
    /// Validates the input and builds the customer entity
    pub fn build(self) -> Result<Customer, validator::ValidationErrors> {
        self.validate()?;
        check_non_negative("credit_limit", self.credit_limit)?;
        let customer = Customer::new(self.name, self.category)
            .with_credit_limit(self.credit_limit)
            .with_opening_balance(self.opening_balance)
            .with_contact(self.phone, self.email);
        Ok(Customer {
            address: self.address,
            notes: self.notes,
            ..customer
        })
    }
}

/// Partial update for a customer; `None` leaves the field untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: Option<CustomerCategory>,
    pub credit_limit: Option<Decimal>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

impl UpdateCustomer {
    /// Runs field validation plus the credit-limit sign check
    pub fn validated(self) -> Result<Self, validator::ValidationErrors> {
        self.validate()?;
        if let Some(limit) = self.credit_limit {
            check_non_negative("credit_limit", limit)?;
        }
        Ok(self)
    }
}
