/// Trim whitespace and drop thousands separators: `" 1,234.5 "` → `"1234.5"`.
pub fn clean_number(raw: &str) -> String {
    raw.trim().chars().filter(|&c| c != ',').collect()
}

/// Round to two decimals, ties to even, the way numpy's `round` does it
/// (scale, round the float, unscale).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
