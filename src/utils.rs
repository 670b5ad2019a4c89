use rust_decimal::{Decimal, RoundingStrategy};

/// Groups the integer digits of `amount` the way the id-ID locale does:
/// `.` as thousands separator, no fractional digits.
///
/// # Examples
/// - `1200000` → `"1.200.000"`
/// - `-3800000.6` → `"-3.800.001"`
pub fn format_grouped(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Rupiah display form used on summary cards and lists, e.g. `"Rp 1.200.000"`
/// or `"-Rp 250.000"`.
pub fn format_rupiah(amount: Decimal) -> String {
    let grouped = format_grouped(amount);
    match grouped.strip_prefix('-') {
        Some(positive) => format!("-Rp {positive}"),
        None => format!("Rp {grouped}"),
    }
}

/// Parses free-form numeric input from a form field.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}
