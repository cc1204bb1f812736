use crate::candle::Candle;

/// Column order of the export contract.
pub const CSV_HEADERS: &str = "Date,Open,Close,High,Low,Volume,Volatility,Std Dev,RSI,Performance";

/// One export row for a normalised candle: ISO day, two-decimal fixed
/// numerics, locale-grouped volume.
pub fn csv_row(candle: &Candle) -> String {
    format!(
        "{},{:.2},{:.2},{:.2},{:.2},{},{:.2},{:.2},{:.2},{:.2}",
        candle.time.format("%Y-%m-%d"),
        candle.open,
        candle.close,
        candle.high,
        candle.low,
        format_volume(candle.volume),
        candle.volatility,
        candle.std_dev,
        candle.rsi,
        candle.performance,
    )
}

/// Assemble the full CSV document: header, the selected day's row if any,
/// then the comparison rows. Formatting only, no computation.
pub fn csv_document(selected: Option<&Candle>, compare: &[Candle]) -> String {
    let mut rows = vec![CSV_HEADERS.to_string()];
    if let Some(candle) = selected {
        rows.push(csv_row(candle));
    }
    rows.extend(compare.iter().map(csv_row));
    rows.join("\n")
}

/// Locale-style volume formatting: thousands-grouped integer part, up to
/// three fractional digits with trailing zeros trimmed.
pub fn format_volume(volume: f64) -> String {
    let fixed = format!("{volume:.3}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), ""),
    };

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        group_thousands(int_part)
    } else {
        format!("{}.{frac_part}", group_thousands(int_part))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
