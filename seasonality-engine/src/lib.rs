//! Time-series aggregation and technical-indicator core for exploring
//! seasonality in cryptocurrency market data.
//!
//! Raw kline rows flow through [`normalize`] into [`Candle`] records with
//! derived per-candle metrics, which the remaining modules consume read-only:
//! [`aggregate`] rolls them into calendar-day buckets for the weekly and
//! monthly views, [`detect_alerts`] and [`annotate_patterns`] drive the alert
//! feed and visual highlighting, and the `compare` module derives the side
//! panel's moving average and benchmark figures.
//!
//! Every function is pure, synchronous, and deterministic: calling it twice
//! on the same input yields bit-identical output, and no input is ever
//! mutated. Data retrieval and rendering live in sibling crates.

/// Serde utilities for the flexible numeric wire formats upstream kline
/// feeds deliver.
pub mod de;

/// Raw kline rows and normalised [`Candle`] records with derived per-candle
/// metrics.
pub mod candle;

/// Relative strength index and moving average calculators.
pub mod indicator;

/// Calendar views and the daily/weekly/monthly bucketing of candles.
pub mod calendar;

/// Threshold alerts and recurring high-volatility pattern annotation.
pub mod alert;

/// Comparison-range sizing, benchmark performance, and the side panel
/// summary.
pub mod compare;

/// Row formatting for the export collaborator.
pub mod export;

pub use alert::{Alert, Flagged, VolatilitySample, annotate_patterns, detect_alerts};
pub use calendar::{CalendarSeries, CalendarView, DayBucket, aggregate};
pub use candle::{Candle, RawCandle, normalize};
pub use compare::{
    ComparisonSummary, benchmark_performance, comparison_limit, performance_vs_benchmark,
};
pub use indicator::{MovingAveragePoint, relative_strength_index, simple_moving_average};
