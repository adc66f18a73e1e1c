//! Dollar formatting for floating-point amounts

use crate::models::Money;

/// Format dollars for display, dropping a trailing `.00`
///
/// Amounts within a cent of zero render as `$0` so rounding noise never
/// shows up as `-$0`.
///
/// # Examples
/// ```
/// use pennywise::display::currency::format_currency;
/// assert_eq!(format_currency(1200.0), "$1,200");
/// assert_eq!(format_currency(1200.5), "$1,200.50");
/// ```
pub fn format_currency(value: f64) -> String {
    let adjusted = if value.abs() < 0.01 { 0.0 } else { value };
    Money::from_dollars_f64(adjusted).to_compact_string()
}

/// Format dollars with exactly two decimals ("$200.00")
pub fn format_currency_exact(value: f64) -> String {
    let adjusted = if value.abs() < 0.01 { 0.0 } else { value };
    Money::from_dollars_f64(adjusted).to_string()
}
