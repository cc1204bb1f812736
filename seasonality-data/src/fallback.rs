use chrono::{DateTime, Duration, Utc};
use seasonality_engine::RawCandle;

/// Base price the substitute series swings around.
const BASE_PRICE: f64 = 30_000.0;

/// Repeating per-hour price swing, one full cycle every six rows.
const SWING: [f64; 6] = [0.0, 120.0, 260.0, 180.0, -90.0, -210.0];

/// Deterministic substitute series used when the upstream feed fails or
/// yields nothing usable.
///
/// Hourly rows from `start`, swinging around a fixed base price with no
/// randomness, so reruns produce bit-identical data. Every row is complete
/// and survives normalisation.
pub fn baseline_rows(start: DateTime<Utc>, rows: u32) -> Vec<RawCandle> {
    (0..rows)
        .map(|index| {
            let open = BASE_PRICE + SWING[index as usize % SWING.len()];
            let close = BASE_PRICE + SWING[(index as usize + 1) % SWING.len()];
            let time = start + Duration::hours(i64::from(index));

            RawCandle {
                time: time.timestamp_millis() as u64,
                open,
                high: open.max(close) + 40.0,
                low: open.min(close) - 40.0,
                close,
                volume: 850.0 + 35.0 * f64::from(index % 24),
            }
        })
        .collect()
}
