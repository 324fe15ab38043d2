//! Display formatting for count badges.

/// Abbreviate a count for compact display.
///
/// Values from one thousand are shown as `"1.2k"`, from one million as
/// `"3.4M"`, always with one decimal place; the trailing `.0` is kept
/// (`1000` -> `"1.0k"`). Counts are non-negative by construction.
pub fn abbreviate_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
