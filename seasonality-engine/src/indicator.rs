use crate::candle::Candle;
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use serde::Serialize;

/// Number of price deltas the relative strength index is defined over.
pub const RSI_PERIOD: usize = 14;

/// Trailing window length of the moving average series shown in the
/// comparison panel.
pub const MOVING_AVERAGE_PERIOD: usize = 7;

/// Relative Strength Index over an ordered price sequence, bounded to
/// [0, 100].
///
/// Below [`RSI_PERIOD`] samples there is insufficient signal and the 0
/// sentinel is returned rather than a fabricated value. Otherwise positive
/// deltas accumulate into gains and negative-delta magnitudes into losses
/// over every adjacent pair (a zero delta counts as a gain), both divided by
/// the fixed period length (a plain average, not Wilder smoothing). A zero
/// average loss substitutes 1 to keep the ratio finite.
pub fn relative_strength_index(prices: &[f64]) -> f64 {
    if prices.len() < RSI_PERIOD {
        return 0.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for pair in prices.windows(2) {
        let diff = pair[1] - pair[0];
        if diff >= 0.0 {
            gains += diff;
        } else {
            losses -= diff;
        }
    }

    let avg_gain = gains / RSI_PERIOD as f64;
    let avg_loss = losses / RSI_PERIOD as f64;
    let rs = avg_gain / if avg_loss == 0.0 { 1.0 } else { avg_loss };

    100.0 - 100.0 / (1.0 + rs)
}

/// One point of a moving average series, stamped with the window-end
/// candle's time.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Constructor, Serialize)]
pub struct MovingAveragePoint {
    pub time: DateTime<Utc>,
    pub value: f64,
}

/// Simple moving average of closing prices: one point per trailing window of
/// `period` candles, empty when there is less data than one full window.
pub fn simple_moving_average(candles: &[Candle], period: usize) -> Vec<MovingAveragePoint> {
    if period == 0 {
        return Vec::new();
    }

    candles
        .windows(period)
        .map(|window| {
            let mean = window.iter().map(|candle| candle.close).sum::<f64>() / period as f64;
            MovingAveragePoint::new(window[period - 1].time, mean)
        })
        .collect()
}
