use std::collections::HashMap;

use crate::data::traits::{MarketDataProvider, MarketSnapshot, TickerValidator};
use crate::error::{PricingError, Result};

/// In-memory market data keyed by upper-cased ticker.
///
/// Serves as both provider and ticker validator for offline pricing and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    snapshots: HashMap<String, MarketSnapshot>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, ticker: &str, snapshot: MarketSnapshot) -> Self {
        self.insert(ticker, snapshot);
        self
    }

    pub fn insert(&mut self, ticker: &str, snapshot: MarketSnapshot) {
        self.snapshots.insert(ticker.trim().to_uppercase(), snapshot);
    }
}

impl MarketDataProvider for StaticMarketData {
    fn fetch(&self, ticker: &str) -> Result<MarketSnapshot> {
        self.snapshots
            .get(&ticker.trim().to_uppercase())
            .copied()
            .ok_or_else(|| PricingError::unavailable(ticker, "no market snapshot"))
    }
}

impl TickerValidator for StaticMarketData {
    fn exists(&self, ticker: &str) -> bool {
        self.snapshots.contains_key(&ticker.trim().to_uppercase())
    }
}
