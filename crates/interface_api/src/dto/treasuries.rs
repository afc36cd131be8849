//! Treasury DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;
use domain_ledger::{Treasury, TreasuryType};

/// Body for creating a treasury
#[derive(Debug, Deserialize)]
pub struct CreateTreasuryRequest {
    pub name: String,
    pub treasury_type: TreasuryType,
    pub currency: Currency,
    #[serde(default)]
    pub initial_balance: Decimal,
    #[serde(default)]
    pub min_balance: Decimal,
    #[serde(default)]
    pub is_default: bool,
}

impl CreateTreasuryRequest {
    pub fn build(self) -> Treasury {
        let mut treasury = Treasury::new(self.name, self.treasury_type, self.currency)
            .with_initial_balance(self.initial_balance)
            .with_min_balance(self.min_balance);
        treasury.is_default = self.is_default;
        treasury
    }
}

/// Treasury enriched with its derived balance
#[derive(Debug, Serialize)]
pub struct TreasuryResponse {
    #[serde(flatten)]
    pub treasury: Treasury,
    /// Always recomputed from the transaction stream
    pub current_balance: Decimal,
}
