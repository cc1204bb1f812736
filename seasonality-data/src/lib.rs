//! Kline data collaborators for the seasonality engine.
//!
//! The engine is a pure function of the raw rows a [`KlineSource`] delivers;
//! this crate owns the asynchronous boundary: a Binance spot REST client and
//! the deterministic baseline series the hosting application substitutes
//! when the feed fails or yields nothing usable.

/// Errors generated by the data collaborators.
pub mod error;

/// The [`KlineSource`] seam between the engine and any concrete feed.
pub mod source;

/// Binance spot REST kline client.
pub mod binance;

/// Deterministic substitute series for feed failures.
pub mod fallback;

pub use binance::{BASE_URL_BINANCE, BinanceKlines};
pub use error::MarketDataError;
pub use fallback::baseline_rows;
pub use source::KlineSource;
