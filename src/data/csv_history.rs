use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::data::traits::PriceHistory;
use crate::error::{PricingError, Result};

/// CSV row: `ticker,date,close`
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ticker")]
    ticker: String,
    #[serde(rename = "date")]
    #[allow(dead_code)] // required column; ordering comes from file position
    date: String,
    #[serde(rename = "close")]
    close: f64,
}

/// Daily close history loaded from CSV, grouped by upper-cased ticker.
///
/// Rows are expected oldest first within each ticker.
#[derive(Debug, Clone, Default)]
pub struct CsvPriceHistory {
    closes: HashMap<String, Vec<f64>>,
}

impl CsvPriceHistory {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(rdr))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut closes: HashMap<String, Vec<f64>> = HashMap::new();
        for result in reader.deserialize() {
            let row: CsvRow = result?;
            closes
                .entry(row.ticker.trim().to_uppercase())
                .or_default()
                .push(row.close);
        }
        Ok(Self { closes })
    }

    /// Number of closes held for `ticker`.
    pub fn observations(&self, ticker: &str) -> usize {
        self.closes
            .get(&ticker.trim().to_uppercase())
            .map_or(0, Vec::len)
    }
}

impl PriceHistory for CsvPriceHistory {
    fn closes(&self, ticker: &str, lookback_days: usize) -> Result<Vec<f64>> {
        let series = self
            .closes
            .get(&ticker.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PricingError::unavailable(ticker, "no price history"))?;

        let start = series.len().saturating_sub(lookback_days.saturating_add(1));
        Ok(series[start..].to_vec())
    }
}
