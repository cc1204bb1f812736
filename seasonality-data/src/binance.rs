use crate::{error::MarketDataError, source::KlineSource};
use async_trait::async_trait;
use reqwest::Client;
use seasonality_engine::{CalendarView, RawCandle};
use tracing::debug;
use url::Url;

/// Binance spot REST base url.
///
/// See docs: <https://developers.binance.com/docs/binance-spot-api-docs/rest-api>
pub const BASE_URL_BINANCE: &str = "https://api.binance.com";

/// REST client fetching kline rows from the Binance spot API.
#[derive(Clone, Debug)]
pub struct BinanceKlines {
    http: Client,
    base_url: Url,
}

impl BinanceKlines {
    /// Client against the public [`BASE_URL_BINANCE`] endpoint.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_base_url(BASE_URL_BINANCE)
    }

    /// Client against a custom endpoint, e.g. a regional mirror or a test
    /// server.
    pub fn with_base_url(base_url: &str) -> Result<Self, MarketDataError> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn request_url(
        &self,
        symbol: &str,
        view: CalendarView,
        limit: u32,
    ) -> Result<Url, MarketDataError> {
        let mut url = self.base_url.join("/api/v3/klines")?;
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("interval", view.fetch_interval())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

#[async_trait]
impl KlineSource for BinanceKlines {
    async fn klines(
        &self,
        symbol: &str,
        view: CalendarView,
        limit: u32,
    ) -> Result<Vec<RawCandle>, MarketDataError> {
        let url = self.request_url(symbol, view, limit)?;
        debug!(%url, "requesting klines");

        let rows: Vec<RawCandle> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if rows.is_empty() {
            return Err(MarketDataError::EmptySeries {
                symbol: symbol.to_string(),
                interval: view.fetch_interval().to_string(),
            });
        }

        Ok(rows)
    }
}
