use crate::{
    candle::Candle,
    indicator::{MOVING_AVERAGE_PERIOD, MovingAveragePoint, simple_moving_average},
};
use chrono::NaiveDate;
use serde::Serialize;

/// Number of samples the data collaborator is asked for to cover a
/// user-selected comparison range: one per calendar day, inclusive of both
/// endpoints.
pub fn comparison_limit(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Mean performance across the primary sequence, the baseline a selected
/// day's performance is measured against. An empty sequence benchmarks at
/// zero.
pub fn benchmark_performance(candles: &[Candle]) -> f64 {
    if candles.is_empty() {
        return 0.0;
    }

    candles.iter().map(|candle| candle.performance).sum::<f64>() / candles.len() as f64
}

/// Delta between one candle's performance and the primary-series benchmark.
pub fn performance_vs_benchmark(candle: &Candle, benchmark: f64) -> f64 {
    candle.performance - benchmark
}

/// Read-only derived views for the comparison side panel.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct ComparisonSummary {
    /// Simple moving average series over the primary closes, window
    /// [`MOVING_AVERAGE_PERIOD`].
    pub moving_average: Vec<MovingAveragePoint>,
    /// Mean performance of the primary sequence.
    pub benchmark: f64,
}

impl ComparisonSummary {
    /// Derive the summary from the primary candle sequence.
    pub fn from_primary(primary: &[Candle]) -> Self {
        Self {
            moving_average: simple_moving_average(primary, MOVING_AVERAGE_PERIOD),
            benchmark: benchmark_performance(primary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candle::RawCandle;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn candle(hour: u64, open: f64, close: f64) -> Candle {
        Candle::from_raw(&RawCandle {
            time: 1672531200000 + hour * 3_600_000,
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            volume: 1.0,
        })
    }

    #[test]
    fn test_comparison_limit_counts_inclusive_days() {
        let start = date(2023, 1, 1);
        assert_eq!(comparison_limit(start, start), 1);
        assert_eq!(comparison_limit(start, date(2023, 1, 7)), 7);
        assert_eq!(comparison_limit(start, date(2023, 2, 1)), 32);
    }

    #[test]
    fn test_benchmark_performance() {
        // performances 5, -3, 1: mean = 1
        let candles = vec![
            candle(0, 100.0, 105.0),
            candle(1, 105.0, 102.0),
            candle(2, 102.0, 103.0),
        ];

        assert!((benchmark_performance(&candles) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_benchmark_of_empty_sequence_is_zero() {
        assert_eq!(benchmark_performance(&[]), 0.0);
    }

    #[test]
    fn test_performance_vs_benchmark() {
        let candles = vec![candle(0, 100.0, 105.0), candle(1, 105.0, 102.0)];
        let benchmark = benchmark_performance(&candles);

        assert!((performance_vs_benchmark(&candles[0], benchmark) - 4.0).abs() < 1e-12);
        assert!((performance_vs_benchmark(&candles[1], benchmark) + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_from_primary() {
        let candles: Vec<Candle> = (0..8)
            .map(|i| candle(i, 10.0 + i as f64, 10.0 + i as f64))
            .collect();

        let summary = ComparisonSummary::from_primary(&candles);
        assert_eq!(summary.moving_average.len(), 2);
        assert!((summary.moving_average[0].value - 13.0).abs() < 1e-12);
        assert!((summary.moving_average[1].value - 14.0).abs() < 1e-12);
        assert_eq!(summary.benchmark, 0.0);
    }
}
