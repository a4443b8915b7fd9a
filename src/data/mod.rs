//! Capability traits for the collaborators the pricer depends on, plus offline
//! implementations (CSV price history, in-memory snapshots) and the
//! historical-volatility estimator.

pub mod csv_history;
pub mod static_source;
pub mod traits;
pub mod volatility;

pub use csv_history::CsvPriceHistory;
pub use static_source::StaticMarketData;
pub use traits::{
    MarketDataProvider, MarketSnapshot, PriceHistory, TickerValidator, VolatilityEstimator,
};
pub use volatility::{log_returns, realized_volatility, HistoricalVolatility};
