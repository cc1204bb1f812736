use crate::{calendar::DayBucket, candle::Candle};
use chrono::NaiveDate;
use derive_more::Constructor;
use itertools::Itertools;
use serde::Serialize;

/// Volatility percentage above which a candle is considered unusually
/// volatile.
pub const HIGH_VOLATILITY_THRESHOLD: f64 = 5.0;

/// Absolute performance above which a candle's move is considered unusual.
pub const HIGH_PERFORMANCE_THRESHOLD: f64 = 1000.0;

/// User-facing notification produced when a record crosses an alert
/// threshold.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Constructor, Serialize)]
pub struct Alert {
    /// Calendar day the alert refers to.
    pub date: NaiveDate,
    pub message: String,
}

/// Scan candles for threshold crossings, producing one alert per offending
/// candle in input order. Volatility takes priority when both thresholds are
/// crossed.
pub fn detect_alerts(candles: &[Candle]) -> Vec<Alert> {
    candles
        .iter()
        .filter(|candle| {
            candle.volatility > HIGH_VOLATILITY_THRESHOLD
                || candle.performance.abs() > HIGH_PERFORMANCE_THRESHOLD
        })
        .map(|candle| {
            let metric = if candle.volatility > HIGH_VOLATILITY_THRESHOLD {
                "volatility"
            } else {
                "performance"
            };
            Alert::new(
                candle.day(),
                format!("High {metric} on {}", candle.time.format("%b %-d, %Y")),
            )
        })
        .collect()
}

/// Record kinds that expose a calendar day and a volatility reading, the two
/// inputs pattern annotation needs.
pub trait VolatilitySample {
    fn day(&self) -> NaiveDate;
    fn volatility(&self) -> f64;
}

impl VolatilitySample for Candle {
    fn day(&self) -> NaiveDate {
        self.time.date_naive()
    }

    fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl VolatilitySample for DayBucket {
    fn day(&self) -> NaiveDate {
        self.date
    }

    fn volatility(&self) -> f64 {
        self.volatility
    }
}

/// A record annotated with whether it sits on a recurring high-volatility
/// day.
#[derive(Clone, Copy, PartialEq, Debug, Constructor, Serialize)]
pub struct Flagged<T> {
    pub record: T,
    pub is_pattern: bool,
}

/// Annotate each record with whether its calendar day recurs among records
/// that individually crossed the high-volatility threshold.
///
/// A day key must appear more than once in that set for its records to be
/// flagged: a single isolated high-volatility record is not a pattern. The
/// input is untouched and output order matches input order.
pub fn annotate_patterns<T>(records: &[T]) -> Vec<Flagged<T>>
where
    T: VolatilitySample + Clone,
{
    let high_volatility_days = records
        .iter()
        .filter(|record| record.volatility() > HIGH_VOLATILITY_THRESHOLD)
        .map(|record| record.day())
        .counts();

    records
        .iter()
        .map(|record| {
            let recurring = high_volatility_days
                .get(&record.day())
                .is_some_and(|&count| count > 1);
            Flagged::new(record.clone(), recurring)
        })
        .collect()
}
