//! Advice generation ports
//!
//! The generator is an external text-generation call; the core only hands
//! it a [`FinancialSnapshot`] and stores the free text it returns. The
//! cache is keyed by treasury with a fixed time-to-live - a miss simply
//! regenerates, so nothing depends on cache contents for correctness.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::TreasuryId;

use crate::error::InsightsError;
use crate::snapshot::{FinancialSnapshot, InsightsAssembler};

/// Port for the external advice generator
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    /// Produces narrative advice from a numeric snapshot
    async fn generate(&self, snapshot: &FinancialSnapshot) -> Result<String, InsightsError>;
}

/// Port for the advice cache
#[async_trait]
pub trait AdviceCache: Send + Sync {
    /// Returns cached advice if present and fresh
    async fn get(&self, treasury_id: TreasuryId) -> Option<String>;

    /// Stores advice for the treasury
    async fn put(&self, treasury_id: TreasuryId, advice: String);
}

/// In-memory TTL cache for advice text
pub struct InMemoryAdviceCache {
    entries: RwLock<HashMap<TreasuryId, (String, Instant)>>,
    ttl: Duration,
}

impl InMemoryAdviceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl AdviceCache for InMemoryAdviceCache {
    async fn get(&self, treasury_id: TreasuryId) -> Option<String> {
        let entries = self.entries.read().await;
        entries.get(&treasury_id).and_then(|(advice, stored_at)| {
            (stored_at.elapsed() < self.ttl).then(|| advice.clone())
        })
    }

    async fn put(&self, treasury_id: TreasuryId, advice: String) {
        let mut entries = self.entries.write().await;
        entries.insert(treasury_id, (advice, Instant::now()));
    }
}

/// Produces advice for a treasury, consulting the cache first
pub struct AdviceService {
    assembler: InsightsAssembler,
    generator: Arc<dyn AdviceGenerator>,
    cache: Arc<dyn AdviceCache>,
}

impl AdviceService {
    pub fn new(
        assembler: InsightsAssembler,
        generator: Arc<dyn AdviceGenerator>,
        cache: Arc<dyn AdviceCache>,
    ) -> Self {
        Self {
            assembler,
            generator,
            cache,
        }
    }

    /// Returns advice for the treasury over the last `period_days` days
    pub async fn advise(
        &self,
        treasury_id: TreasuryId,
        period_days: u32,
    ) -> Result<String, InsightsError> {
        if let Some(cached) = self.cache.get(treasury_id).await {
            debug!(treasury = %treasury_id, "advice served from cache");
            return Ok(cached);
        }

        let snapshot = self.assembler.assemble(treasury_id, period_days).await?;
        let advice = self.generator.generate(&snapshot).await?;
        self.cache.put(treasury_id, advice.clone()).await;
        Ok(advice)
    }
}
