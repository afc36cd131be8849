//! Default advice generator
//!
//! Stand-in adapter for the external text-generation service: it renders
//! the snapshot's risk indicators into short plain-language guidance.
//! Deployments with a real generator swap this out behind the
//! [`AdviceGenerator`] port without touching anything else.

use async_trait::async_trait;

use domain_insights::{AdviceGenerator, CashFlowTrend, FinancialSnapshot, InsightsError};

/// Renders advice from the snapshot with fixed templates
#[derive(Debug, Default, Clone)]
pub struct TemplateAdviceGenerator;

#[async_trait]
impl AdviceGenerator for TemplateAdviceGenerator {
    async fn generate(&self, snapshot: &FinancialSnapshot) -> Result<String, InsightsError> {
        let mut lines = Vec::new();

        lines.push(format!(
            "Over the last {} the treasury took in {} and paid out {}, a net of {}.",
            snapshot.meta.period,
            snapshot.cash_flow.total_revenue,
            snapshot.cash_flow.total_expenses,
            snapshot.cash_flow.net_cash,
        ));

        if snapshot.risk_indicators.treasury_below_limit {
            lines.push(format!(
                "The balance ({}) is below the configured minimum ({}); consider delaying \
                 non-essential payouts until it recovers.",
                snapshot.treasury.balance, snapshot.treasury.min_limit,
            ));
        }

        match snapshot.cash_flow.trend {
            CashFlowTrend::Negative => lines.push(
                "Spending outpaced income in this window; review the largest outgoing \
                 entries and any customer balances that could be collected."
                    .to_string(),
            ),
            CashFlowTrend::Positive => lines.push(
                "Income exceeded spending in this window; the position is improving.".to_string(),
            ),
            CashFlowTrend::Flat => {
                lines.push("Cash flow was flat in this window.".to_string())
            }
        }

        Ok(lines.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, TreasuryId};
    use domain_insights::{
        CashFlowSummary, RiskIndicators, SnapshotMeta, TreasurySummary,
    };
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mentions_limit_breach() {
        let snapshot = FinancialSnapshot {
            treasury: TreasurySummary {
                id: TreasuryId::new(),
                balance: dec!(200),
                min_limit: dec!(500),
            },
            cash_flow: CashFlowSummary {
                total_revenue: dec!(100),
                total_expenses: dec!(400),
                net_cash: dec!(-300),
                trend: CashFlowTrend::Negative,
            },
            risk_indicators: RiskIndicators {
                liquidity_ratio: dec!(0.4),
                negative_cash_flow: true,
                treasury_below_limit: true,
            },
            meta: SnapshotMeta {
                period: "30d".into(),
                currency: Currency::Usd,
            },
        };

        let advice = TemplateAdviceGenerator.generate(&snapshot).await.unwrap();
        assert!(advice.contains("below the configured minimum"));
        assert!(advice.contains("Spending outpaced income"));
    }
}
