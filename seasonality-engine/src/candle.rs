use crate::{
    de::{FlexibleF64, FlexibleU64, datetime_utc_from_epoch_duration},
    indicator::relative_strength_index,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{fmt, time::Duration};
use tracing::debug;

/// Single raw kline row as delivered by the upstream market data feed.
///
/// ### Raw Payload Example
/// See docs: <https://developers.binance.com/docs/binance-spot-api-docs/rest-api/market-data-endpoints#klinecandlestick-data>
/// ```json
/// [
///     1672531200000,
///     "16541.77",
///     "16545.70",
///     "16508.39",
///     "16529.67",
///     "4364.83",
///     1672534799999,
///     "72146418.71",
///     12047,
///     "2187.90",
///     "36163544.12",
///     "0"
/// ]
/// ```
/// Only the first six elements are meaningful here; feeds append per-row
/// bookkeeping fields (close time, quote volume, trade count) which are
/// ignored. Numeric fields may arrive as JSON numbers or numeric strings,
/// and an empty string is the feed's "no data" sentinel, decoded as zero.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Serialize)]
pub struct RawCandle {
    /// Open time in epoch milliseconds. Zero signals "no data".
    pub time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl RawCandle {
    /// `true` iff every field carries a usable value. A zero timestamp,
    /// price, or volume signals "no data" and excludes the row from
    /// normalisation.
    pub fn is_complete(&self) -> bool {
        self.time != 0
            && self.open != 0.0
            && self.high != 0.0
            && self.low != 0.0
            && self.close != 0.0
            && self.volume != 0.0
    }
}

impl<'de> Deserialize<'de> for RawCandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> de::Visitor<'de> for RowVisitor {
            type Value = RawCandle;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("kline row [timestamp, open, high, low, close, volume, ..]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<RawCandle, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let time = seq
                    .next_element::<FlexibleU64>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?
                    .0;

                let mut prices = [0.0; 5];
                for (index, price) in prices.iter_mut().enumerate() {
                    *price = seq
                        .next_element::<FlexibleF64>()?
                        .ok_or_else(|| de::Error::invalid_length(index + 1, &self))?
                        .0;
                }

                // Drain the trailing bookkeeping fields feeds append per row
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}

                let [open, high, low, close, volume] = prices;
                Ok(RawCandle {
                    time,
                    open,
                    high,
                    low,
                    close,
                    volume,
                })
            }
        }

        deserializer.deserialize_seq(RowVisitor)
    }
}

/// Normalised candle record with derived per-candle metrics.
///
/// Produced once per surviving raw row by [`normalize`] and treated as an
/// immutable snapshot by every downstream consumer.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Serialize)]
pub struct Candle {
    /// Open time of the interval this candle covers.
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Intraday range normalised by the open price, as a percentage. Zero
    /// when the open is zero so downstream consumers only ever see finite
    /// numbers.
    pub volatility: f64,
    /// Close minus open, an end-of-interval snapshot.
    pub performance: f64,
    /// Population standard deviation of the four OHLC prices.
    pub std_dev: f64,
    /// RSI over the four OHLC values of this row alone, which sits below the
    /// 14-sample minimum and therefore yields the 0 sentinel. Kept for
    /// parity with the upstream dashboard rather than switching to a
    /// rolling-close RSI.
    pub rsi: f64,
}

impl Candle {
    /// Derive the per-candle metrics from one complete raw row.
    pub fn from_raw(raw: &RawCandle) -> Self {
        let prices = [raw.open, raw.high, raw.low, raw.close];
        let mean = prices.iter().sum::<f64>() / prices.len() as f64;
        let variance =
            prices.iter().map(|price| (price - mean).powi(2)).sum::<f64>() / prices.len() as f64;

        let volatility = if raw.open == 0.0 {
            0.0
        } else {
            (raw.high - raw.low) / raw.open * 100.0
        };

        Self {
            time: datetime_utc_from_epoch_duration(Duration::from_millis(raw.time)),
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
            volatility,
            performance: raw.close - raw.open,
            std_dev: variance.sqrt(),
            rsi: relative_strength_index(&prices),
        }
    }

    /// Calendar day this candle belongs to.
    pub fn day(&self) -> NaiveDate {
        self.time.date_naive()
    }
}

/// Convert raw feed rows into normalised candles, dropping incomplete rows
/// and preserving input order.
///
/// An empty result is the caller's signal to substitute baseline data; no
/// synthetic candles are fabricated here.
pub fn normalize(rows: &[RawCandle]) -> Vec<Candle> {
    let candles: Vec<Candle> = rows
        .iter()
        .filter(|row| row.is_complete())
        .map(Candle::from_raw)
        .collect();

    if candles.len() < rows.len() {
        debug!(
            dropped = rows.len() - candles.len(),
            "discarded incomplete kline rows"
        );
    }

    candles
}

#[cfg(test)]
mod tests {
    use super::*;

    mod de {
        use super::*;

        #[test]
        fn test_raw_candle() {
            struct TestCase {
                input: &'static str,
                expected: Result<RawCandle, ()>,
            }

            let tests = vec![
                // TC0: six-element row with string prices is deserialised
                TestCase {
                    input: r#"[1672531200000, "100.0", "110.0", "90.0", "105.0", "1000000"]"#,
                    expected: Ok(RawCandle {
                        time: 1672531200000,
                        open: 100.0,
                        high: 110.0,
                        low: 90.0,
                        close: 105.0,
                        volume: 1000000.0,
                    }),
                },
                // TC1: full twelve-element kline row ignores the trailing fields
                TestCase {
                    input: r#"[
                        1672531200000,
                        "16541.77",
                        "16545.70",
                        "16508.39",
                        "16529.67",
                        "4364.83",
                        1672534799999,
                        "72146418.71",
                        12047,
                        "2187.90",
                        "36163544.12",
                        "0"
                    ]"#,
                    expected: Ok(RawCandle {
                        time: 1672531200000,
                        open: 16541.77,
                        high: 16545.70,
                        low: 16508.39,
                        close: 16529.67,
                        volume: 4364.83,
                    }),
                },
                // TC2: plain JSON numbers are accepted
                TestCase {
                    input: "[1672531200000, 100.5, 101.0, 99.5, 100.0, 42.0]",
                    expected: Ok(RawCandle {
                        time: 1672531200000,
                        open: 100.5,
                        high: 101.0,
                        low: 99.5,
                        close: 100.0,
                        volume: 42.0,
                    }),
                },
                // TC3: empty-string fields decode to the zero sentinel
                TestCase {
                    input: r#"[1672531200000, "100.0", "110.0", "90.0", "105.0", ""]"#,
                    expected: Ok(RawCandle {
                        time: 1672531200000,
                        open: 100.0,
                        high: 110.0,
                        low: 90.0,
                        close: 105.0,
                        volume: 0.0,
                    }),
                },
                // TC4: row with fewer than six fields is unable to be deserialised
                TestCase {
                    input: r#"[1672531200000, "100.0", "110.0"]"#,
                    expected: Err(()),
                },
                // TC5: non-numeric price string is unable to be deserialised
                TestCase {
                    input: r#"[1672531200000, "abc", "110.0", "90.0", "105.0", "42.0"]"#,
                    expected: Err(()),
                },
            ];

            for (index, test) in tests.into_iter().enumerate() {
                let actual = serde_json::from_str::<RawCandle>(test.input);
                match (actual, test.expected) {
                    (Ok(actual), Ok(expected)) => {
                        assert_eq!(actual, expected, "TC{} failed", index)
                    }
                    (Err(_), Err(_)) => {
                        // Test passed
                    }
                    (actual, expected) => {
                        panic!(
                            "TC{index} failed because actual != expected. \nActual: {actual:?}\nExpected: {expected:?}\n"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_is_complete_rejects_zero_fields() {
        let complete = RawCandle {
            time: 1672531200000,
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 1000000.0,
        };
        assert!(complete.is_complete());

        assert!(!RawCandle { time: 0, ..complete }.is_complete());
        assert!(
            !RawCandle {
                open: 0.0,
                ..complete
            }
            .is_complete()
        );
        assert!(
            !RawCandle {
                volume: 0.0,
                ..complete
            }
            .is_complete()
        );
    }

    #[test]
    fn test_from_raw_derives_metrics() {
        let candle = Candle::from_raw(&RawCandle {
            time: 1672531200000,
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 1000000.0,
        });

        assert_eq!(candle.volatility, 20.0);
        assert_eq!(candle.performance, 5.0);
        // population std dev of [100, 110, 90, 105]
        assert!((candle.std_dev - 54.6875_f64.sqrt()).abs() < 1e-12);
        // four OHLC prices are below the 14-sample RSI minimum
        assert_eq!(candle.rsi, 0.0);
        assert_eq!(candle.day(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn test_from_raw_zero_open_yields_finite_volatility() {
        let candle = Candle::from_raw(&RawCandle {
            time: 1672531200000,
            open: 0.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 1000000.0,
        });

        assert_eq!(candle.volatility, 0.0);
        assert!(candle.volatility.is_finite());
        assert!(candle.std_dev.is_finite());
    }

    #[test]
    fn test_normalize_filters_and_preserves_order() {
        let rows = vec![
            RawCandle {
                time: 1672531200000,
                open: 100.0,
                high: 110.0,
                low: 90.0,
                close: 105.0,
                volume: 1000000.0,
            },
            // incomplete: zero volume
            RawCandle {
                time: 1672534800000,
                open: 105.0,
                high: 106.0,
                low: 104.0,
                close: 105.5,
                volume: 0.0,
            },
            RawCandle {
                time: 1672538400000,
                open: 105.0,
                high: 106.0,
                low: 104.0,
                close: 105.5,
                volume: 900000.0,
            },
        ];

        let candles = normalize(&rows);
        assert_eq!(candles.len(), 2);
        assert!(candles[0].time < candles[1].time);

        assert_eq!(candles[0].volatility, 20.0);
        assert_eq!(candles[0].performance, 5.0);
        assert!((candles[1].volatility - (106.0 - 104.0) / 105.0 * 100.0).abs() < 1e-12);
        assert!((candles[1].performance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize(&[]).is_empty());
    }
}
