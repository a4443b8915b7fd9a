//! Error taxonomy shared by the pricing engine and its data collaborators.
//!
//! A degenerate market (expired contract or zero volatility) is not an error:
//! it is priced through the discounted-intrinsic branch. Likewise the
//! percent/decimal ambiguity of [`crate::as_decimal`] is documented behaviour,
//! never raised.

/// Failures surfaced by pricing calls, collaborators and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("market data unavailable for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    #[error("insufficient history for {ticker}: {observations} log-returns, need {required}")]
    InsufficientHistory {
        ticker: String,
        observations: usize,
        required: usize,
    },

    #[error("invalid option type: {0}")]
    InvalidOptionType(String),

    #[error("ticker symbol cannot be empty")]
    EmptyTicker,

    #[error("unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<toml::de::Error> for PricingError {
    fn from(e: toml::de::Error) -> Self {
        PricingError::Config(e.to_string())
    }
}

impl PricingError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        PricingError::InvalidInput {
            field,
            value,
            reason,
        }
    }

    pub(crate) fn unavailable(ticker: &str, reason: impl Into<String>) -> Self {
        PricingError::DataUnavailable {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the failure came from a collaborator rather than from the caller's inputs.
    pub fn is_data_failure(&self) -> bool {
        matches!(
            self,
            PricingError::DataUnavailable { .. }
                | PricingError::InsufficientHistory { .. }
                | PricingError::UnknownTicker(_)
                | PricingError::Io(_)
                | PricingError::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
