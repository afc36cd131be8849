//! Financial snapshot assembly
//!
//! The snapshot is the entire contract between this system and the advice
//! generator: treasury position, windowed cash flow, and three risk
//! indicators. The treasury balance is derived from the transaction
//! stream on every assembly, same as everywhere else in the system.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use core_kernel::{Currency, TreasuryId};

use domain_ledger::{LedgerStore, TreasuryStore};

use crate::error::InsightsError;

/// Treasury position at assembly time
#[derive(Debug, Clone, Serialize)]
pub struct TreasurySummary {
    pub id: TreasuryId,
    /// Derived balance: initial seed plus net flow over all time
    pub balance: Decimal,
    pub min_limit: Decimal,
}

/// Direction of the windowed net cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowTrend {
    Positive,
    Negative,
    Flat,
}

/// Cash movement within the reporting window
#[derive(Debug, Clone, Serialize)]
pub struct CashFlowSummary {
    /// Credit entries in the window (cash in)
    pub total_revenue: Decimal,
    /// Debit entries in the window (cash out)
    pub total_expenses: Decimal,
    /// `total_revenue - total_expenses`
    pub net_cash: Decimal,
    pub trend: CashFlowTrend,
}

/// Boiled-down warnings the advice generator keys off
#[derive(Debug, Clone, Serialize)]
pub struct RiskIndicators {
    /// `balance / min_limit` when a minimum is configured, else zero
    pub liquidity_ratio: Decimal,
    pub negative_cash_flow: bool,
    pub treasury_below_limit: bool,
}

/// Reporting window and currency
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMeta {
    /// Window length, e.g. "30d"
    pub period: String,
    pub currency: Currency,
}

/// The fixed-shape numeric summary handed to the advice generator
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSnapshot {
    pub treasury: TreasurySummary,
    pub cash_flow: CashFlowSummary,
    pub risk_indicators: RiskIndicators,
    pub meta: SnapshotMeta,
}

/// Assembles snapshots from the treasury and ledger stores
#[derive(Clone)]
pub struct InsightsAssembler {
    treasuries: Arc<dyn TreasuryStore>,
    ledger: Arc<dyn LedgerStore>,
}

impl InsightsAssembler {
    pub fn new(treasuries: Arc<dyn TreasuryStore>, ledger: Arc<dyn LedgerStore>) -> Self {
        Self { treasuries, ledger }
    }

    /// Assembles a snapshot over the last `period_days` days
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown treasury.
    pub async fn assemble(
        &self,
        treasury_id: TreasuryId,
        period_days: u32,
    ) -> Result<FinancialSnapshot, InsightsError> {
        let treasury = self
            .treasuries
            .get(treasury_id)
            .await?
            .ok_or(InsightsError::TreasuryNotFound(treasury_id))?;

        let lifetime = self.ledger.flow_totals(treasury_id, None).await?;
        let balance = treasury.initial_balance + lifetime.net();

        let since = Utc::now() - Duration::days(i64::from(period_days));
        let window = self.ledger.flow_totals(treasury_id, Some(since)).await?;
        let net_cash = window.net();

        let trend = if net_cash > Decimal::ZERO {
            CashFlowTrend::Positive
        } else if net_cash < Decimal::ZERO {
            CashFlowTrend::Negative
        } else {
            CashFlowTrend::Flat
        };

        let liquidity_ratio = if treasury.min_balance > Decimal::ZERO {
            balance / treasury.min_balance
        } else {
            Decimal::ZERO
        };

        Ok(FinancialSnapshot {
            treasury: TreasurySummary {
                id: treasury.id,
                balance,
                min_limit: treasury.min_balance,
            },
            cash_flow: CashFlowSummary {
                total_revenue: window.inflow,
                total_expenses: window.outflow,
                net_cash,
                trend,
            },
            risk_indicators: RiskIndicators {
                liquidity_ratio,
                negative_cash_flow: net_cash < Decimal::ZERO,
                treasury_below_limit: balance < treasury.min_balance,
            },
            meta: SnapshotMeta {
                period: format!("{period_days}d"),
                currency: treasury.currency,
            },
        })
    }
}
