//! Pure formatting helpers for the dashboard: currency magnitudes,
//! 24h change arrows and the unicode sparkline.

/// Glyph alphabet for the sparkline, lowest to highest.
pub const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Placeholder glyph used when a series is too short to chart.
pub const SPARK_FLAT: char = '─';

/// `$1.50B` above a billion, `$62.45M` above a million, grouped thousands
/// with 2 decimals above a thousand, 4 decimals below.
pub fn fmt_usd(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${}", group_thousands(value, 2))
    } else {
        format!("${:.4}", value)
    }
}

pub fn fmt_brl(value: f64) -> String {
    format!("R$ {}", group_thousands(value, 2))
}

/// Directional arrow plus the absolute change with 2 decimals,
/// e.g. `▲ 2.30%` or `▼ 0.80%`. Zero counts as up.
pub fn fmt_change(change: f64) -> String {
    let arrow = if change >= 0.0 { '▲' } else { '▼' };
    format!("{} {:.2}%", arrow, change.abs())
}

/// Semantic color class for a 24h change: non-negative is positive.
pub fn change_is_positive(change: f64) -> bool {
    change >= 0.0
}

/// Comma-grouped decimal rendering, e.g. `62,450.00`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Renders a price series as a fixed-width run of block glyphs.
///
/// Values are bucketed to 0..=7 relative to the series min/max, then
/// resampled to `width` positions by nearest index. Fewer than 2 points
/// yields a flat placeholder line of the requested width.
pub fn sparkline(prices: &[f64], width: usize) -> String {
    if prices.len() < 2 {
        return SPARK_FLAT.to_string().repeat(width);
    }

    let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    let normalized: Vec<usize> = prices
        .iter()
        .map(|price| ((price - min) / range * 7.0) as usize)
        .collect();

    let step = normalized.len() as f64 / width as f64;
    (0..width)
        .map(|i| {
            let idx = ((i as f64 * step) as usize).min(normalized.len() - 1);
            SPARK_GLYPHS[normalized[idx]]
        })
        .collect()
}

/// Rising iff the series closes at or above where it opened. Judged on
/// the raw series, not the resampled glyphs.
pub fn spark_rising(prices: &[f64]) -> bool {
    match (prices.first(), prices.last()) {
        (Some(first), Some(last)) => last >= first,
        _ => true,
    }
}
