//! Transaction DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;

use core_kernel::{CustomerId, TreasuryId};
use domain_ledger::{EntryType, TransactionFilter};

/// Body for reversing a transaction; the id comes from the path
#[derive(Debug, Deserialize)]
pub struct ReverseBody {
    pub reason: String,
}

/// Query parameters for listing transactions
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    pub customer_id: Option<CustomerId>,
    pub treasury_id: Option<TreasuryId>,
    pub entry_type: Option<EntryType>,
    pub since: Option<DateTime<Utc>>,
}

impl From<TransactionQuery> for TransactionFilter {
    fn from(query: TransactionQuery) -> Self {
        TransactionFilter {
            customer_id: query.customer_id,
            treasury_id: query.treasury_id,
            entry_type: query.entry_type,
            since: query.since,
        }
    }
}
