//! Order input coercion.
//!
//! Order fields are free-text inputs in the admin panel. The value is
//! never rejected: whatever leading integer the text starts with is used,
//! and anything unusable becomes `0`.

/// Coerce raw input text into a non-negative order value.
///
/// - Leading whitespace is skipped and an optional `+` accepted.
/// - Parsing stops at the first non-digit (`"12abc"` is `12`).
/// - Empty, non-numeric and negative input gives `0`.
/// - Values beyond `i64::MAX` saturate.
pub fn coerce_order_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut seen = false;
    let value = digits.fold(0i64, |acc, digit| {
        seen = true;
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });

    if !seen || negative {
        return 0;
    }
    value
}
