//! Insights DTOs

use serde::{Deserialize, Serialize};

/// Reporting window query; defaults to 30 days
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

/// Free-text advice response
#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}
