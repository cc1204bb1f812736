use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use seasonality_data::{BinanceKlines, KlineSource, baseline_rows};
use seasonality_engine::{
    CalendarSeries, CalendarView, Candle, ComparisonSummary, aggregate, annotate_patterns,
    comparison_limit, detect_alerts, export, normalize, performance_vs_benchmark,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting market seasonality explorer");

    // Configurable via SYMBOL env var (default: BTCUSDT)
    let symbol = std::env::var("SYMBOL").unwrap_or_else(|_| "BTCUSDT".to_string());

    // Configurable via VIEW env var: daily | weekly | monthly (default: daily)
    let view = std::env::var("VIEW")
        .ok()
        .and_then(|value| value.parse::<CalendarView>().ok())
        .unwrap_or_default();

    // Configurable via ANCHOR_DATE env var, YYYY-MM-DD (default: today)
    let anchor = std::env::var("ANCHOR_DATE")
        .ok()
        .and_then(|value| value.parse::<NaiveDate>().ok())
        .unwrap_or_else(|| Utc::now().date_naive());

    info!(%symbol, %view, %anchor, "exploring seasonality");

    let source = match BinanceKlines::new() {
        Ok(source) => source,
        Err(error) => {
            error!(%error, "failed to construct kline client");
            return;
        }
    };

    let candles = fetch_normalized(&source, &symbol, view, view.fetch_limit(), anchor).await;
    if candles.is_empty() {
        error!("no candles available, nothing to explore");
        return;
    }

    let alerts = detect_alerts(&candles);
    for alert in &alerts {
        warn!(date = %alert.date, "{}", alert.message);
    }

    match aggregate(&candles, view, anchor) {
        CalendarSeries::Candles(series) => {
            let flagged = annotate_patterns(&series);
            let patterns = flagged.iter().filter(|f| f.is_pattern).count();
            info!(candles = series.len(), patterns, "daily view computed");
        }
        CalendarSeries::Days(buckets) => {
            let flagged = annotate_patterns(&buckets);
            let patterns = flagged.iter().filter(|f| f.is_pattern).count();
            let traded = buckets.iter().filter(|bucket| bucket.has_data()).count();
            info!(
                days = buckets.len(),
                traded, patterns, "calendar window computed"
            );
        }
    }

    // Optional comparison range via COMPARE_START / COMPARE_END (YYYY-MM-DD)
    let compare_candles = fetch_comparison(&source, &symbol, view, anchor).await;

    let summary = ComparisonSummary::from_primary(&candles);
    info!(
        benchmark = summary.benchmark,
        moving_average_points = summary.moving_average.len(),
        "comparison summary computed"
    );

    let selected = candles.iter().find(|candle| candle.day() == anchor);
    if let Some(candle) = selected {
        info!(
            date = %anchor,
            delta = performance_vs_benchmark(candle, summary.benchmark),
            "selected day performance vs benchmark"
        );
    }

    println!("{}", export::csv_document(selected, &compare_candles));
}

/// Fetch raw rows and normalise them, substituting the deterministic
/// baseline series when the feed fails or yields nothing usable.
async fn fetch_normalized(
    source: &impl KlineSource,
    symbol: &str,
    view: CalendarView,
    limit: u32,
    anchor: NaiveDate,
) -> Vec<Candle> {
    let rows = match source.klines(symbol, view, limit).await {
        Ok(rows) => rows,
        Err(error) if error.is_recoverable() => {
            warn!(%error, "failed to fetch klines, using baseline data");
            baseline_rows(day_start(anchor), limit)
        }
        Err(error) => {
            error!(%error, "unrecoverable kline source failure");
            return Vec::new();
        }
    };

    let candles = normalize(&rows);
    if candles.is_empty() {
        warn!("no valid rows survived normalisation, using baseline data");
        return normalize(&baseline_rows(day_start(anchor), limit));
    }

    candles
}

/// Fetch the comparison series when a range is configured: one sample per
/// calendar day of the range, at the same interval as the primary view.
async fn fetch_comparison(
    source: &impl KlineSource,
    symbol: &str,
    view: CalendarView,
    anchor: NaiveDate,
) -> Vec<Candle> {
    let range = std::env::var("COMPARE_START")
        .ok()
        .and_then(|value| value.parse::<NaiveDate>().ok())
        .zip(
            std::env::var("COMPARE_END")
                .ok()
                .and_then(|value| value.parse::<NaiveDate>().ok()),
        );

    let Some((start, end)) = range else {
        return Vec::new();
    };

    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let limit = comparison_limit(start, end).clamp(1, 1000) as u32;
    info!(%start, %end, limit, "fetching comparison range");

    fetch_normalized(source, symbol, view, limit, anchor).await
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
