use crate::candle::Candle;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar view the dashboard is exploring.
///
/// The view also fixes the upstream fetch contract: which kline interval one
/// fetch requests and how many rows it asks for.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl CalendarView {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarView::Daily => "daily",
            CalendarView::Weekly => "weekly",
            CalendarView::Monthly => "monthly",
        }
    }

    /// Upstream kline interval fetched for this view.
    pub fn fetch_interval(&self) -> &'static str {
        match self {
            CalendarView::Daily => "1h",
            CalendarView::Weekly => "1d",
            CalendarView::Monthly => "1w",
        }
    }

    /// Number of kline rows one fetch requests for this view.
    pub fn fetch_limit(&self) -> u32 {
        match self {
            CalendarView::Daily => 24,
            CalendarView::Weekly => 7,
            CalendarView::Monthly => 30,
        }
    }

    /// Length in days of the aggregation window, `None` for the identity
    /// daily view.
    fn window_days(&self) -> Option<u64> {
        match self {
            CalendarView::Daily => None,
            CalendarView::Weekly => Some(7),
            CalendarView::Monthly => Some(30),
        }
    }

    /// First calendar day of the aggregation window anchored at `anchor`.
    pub fn window_start(&self, anchor: NaiveDate) -> NaiveDate {
        match self {
            CalendarView::Daily => anchor,
            CalendarView::Weekly => start_of_week(anchor),
            CalendarView::Monthly => start_of_month(anchor),
        }
    }
}

impl std::fmt::Display for CalendarView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CalendarView {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "daily" => Ok(CalendarView::Daily),
            "weekly" => Ok(CalendarView::Weekly),
            "monthly" => Ok(CalendarView::Monthly),
            other => Err(format!("unknown calendar view: {other}")),
        }
    }
}

/// First day of the week containing `date`. Weeks start on Sunday.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// Aggregated summary of one calendar day inside a weekly/monthly window.
///
/// `samples` is the number of constituent candles. A bucket with zero
/// samples is the explicit "no trading data" marker and carries all-zero
/// metrics; consumers must branch on [`DayBucket::has_data`], not on a zero
/// volatility, which a traded day can legitimately produce.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub samples: usize,
    /// Mean volatility across the day's candles.
    pub volatility: f64,
    /// Total traded volume across the day's candles.
    pub volume: f64,
    /// Performance of the day's last candle, an end-of-period snapshot
    /// rather than an averaged quantity.
    pub performance: f64,
    /// Mean standard deviation across the day's candles.
    pub std_dev: f64,
    /// Mean RSI across the day's candles.
    pub rsi: f64,
}

impl DayBucket {
    /// Zero-valued bucket for a day with no constituent candles.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            samples: 0,
            volatility: 0.0,
            volume: 0.0,
            performance: 0.0,
            std_dev: 0.0,
            rsi: 0.0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.samples > 0
    }

    /// Summarise a non-empty selection of same-day candles.
    fn from_day_candles(date: NaiveDate, candles: &[&Candle]) -> Self {
        let count = candles.len() as f64;
        Self {
            date,
            samples: candles.len(),
            volatility: candles.iter().map(|candle| candle.volatility).sum::<f64>() / count,
            volume: candles.iter().map(|candle| candle.volume).sum(),
            performance: candles[candles.len() - 1].performance,
            std_dev: candles.iter().map(|candle| candle.std_dev).sum::<f64>() / count,
            rsi: candles.iter().map(|candle| candle.rsi).sum::<f64>() / count,
        }
    }
}

/// Output of [`aggregate`]: the daily view passes candles through untouched,
/// weekly/monthly views roll them into per-day buckets.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub enum CalendarSeries {
    Candles(Vec<Candle>),
    Days(Vec<DayBucket>),
}

/// Bucket normalised candles into the calendar window of `view` anchored at
/// `anchor`.
///
/// Weekly and monthly windows always produce exactly 7 or 30 buckets, one
/// per consecutive calendar day from the window start in ascending order,
/// regardless of how much input data exists. Days without candles yield
/// [`DayBucket::empty`].
pub fn aggregate(candles: &[Candle], view: CalendarView, anchor: NaiveDate) -> CalendarSeries {
    let Some(days) = view.window_days() else {
        return CalendarSeries::Candles(candles.to_vec());
    };

    let start = view.window_start(anchor);
    let buckets = (0..days)
        .map(|offset| {
            let date = start + Days::new(offset);
            let day_candles: Vec<&Candle> =
                candles.iter().filter(|candle| candle.day() == date).collect();
            if day_candles.is_empty() {
                DayBucket::empty(date)
            } else {
                DayBucket::from_day_candles(date, &day_candles)
            }
        })
        .collect();

    CalendarSeries::Days(buckets)
}
