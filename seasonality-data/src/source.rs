use crate::error::MarketDataError;
use async_trait::async_trait;
use seasonality_engine::{CalendarView, RawCandle};

/// Source of raw kline rows for one instrument and calendar view.
///
/// The engine downstream is a pure function of the rows a source delivers;
/// one fetch per parameter change, last write wins. Implementations must not
/// fabricate rows: delivering an error (or an empty series) is the signal
/// for the caller to substitute [`baseline_rows`](crate::baseline_rows).
#[async_trait]
pub trait KlineSource {
    /// Fetch up to `limit` rows at the interval `view` prescribes.
    async fn klines(
        &self,
        symbol: &str,
        view: CalendarView,
        limit: u32,
    ) -> Result<Vec<RawCandle>, MarketDataError>;
}
