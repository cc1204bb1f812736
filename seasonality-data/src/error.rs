use thiserror::Error;

/// All errors generated in `seasonality-data`.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid kline endpoint url: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("no kline rows returned for {symbol} at interval {interval}")]
    EmptySeries { symbol: String, interval: String },
}

impl MarketDataError {
    /// Determine if the hosting application should substitute baseline data
    /// rather than surface the failure.
    pub fn is_recoverable(&self) -> bool {
        match self {
            MarketDataError::Http(_) | MarketDataError::EmptySeries { .. } => true,
            MarketDataError::UrlParse(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_recoverable() {
        let empty = MarketDataError::EmptySeries {
            symbol: "BTCUSDT".to_string(),
            interval: "1h".to_string(),
        };
        assert!(empty.is_recoverable());

        let bad_url = MarketDataError::from(url::ParseError::EmptyHost);
        assert!(!bad_url.is_recoverable());
    }

    #[test]
    fn test_empty_series_display() {
        let error = MarketDataError::EmptySeries {
            symbol: "BTCUSDT".to_string(),
            interval: "1h".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "no kline rows returned for BTCUSDT at interval 1h"
        );
    }
}
