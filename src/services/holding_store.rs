use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{error::TrackerError, models::Holding};

/// Receives a holding once it has been fully validated and valued.
#[async_trait]
pub trait HoldingSink: Send + Sync {
    async fn add(&self, holding: Holding) -> Result<(), TrackerError>;
}

/// In-memory portfolio, insertion ordered.
#[derive(Default)]
pub struct HoldingStore {
    holdings: RwLock<Vec<Holding>>,
}

impl HoldingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Holding> {
        self.holdings.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.holdings.read().await.len()
    }
}

#[async_trait]
impl HoldingSink for HoldingStore {
    async fn add(&self, holding: Holding) -> Result<(), TrackerError> {
        tracing::info!(ticker = %holding.ticker, lots = %holding.lots, "holding added");
        self.holdings.write().await.push(holding);
        Ok(())
    }
}
