//! Insights Domain
//!
//! Assembles the fixed-shape numeric summary the external advice generator
//! consumes. Only numbers flow out; only free text flows back. The advice
//! cache is a latency optimization keyed by treasury - correctness never
//! depends on a cache hit.

pub mod advice;
pub mod error;
pub mod snapshot;

pub use advice::{AdviceCache, AdviceGenerator, AdviceService, InMemoryAdviceCache};
pub use error::InsightsError;
pub use snapshot::{
    CashFlowSummary, CashFlowTrend, FinancialSnapshot, InsightsAssembler, RiskIndicators,
    SnapshotMeta, TreasurySummary,
};
