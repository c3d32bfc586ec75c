//! Shortest-round-trip, `%g`-style numeric formatting (§4.3, §4.5), shared
//! by the formatter and the patch engine's matrix encoder so two independent
//! implementations never drift apart.

/// Formats `value` the way a Liberty table cell is rendered: plain decimal
/// for magnitudes in `[1e-4, 1e6)`, scientific notation outside that range,
/// trailing zeros trimmed either way.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }

    let abs = value.abs();
    if (1e-4..1e6).contains(&abs) {
        format_fixed(value)
    } else {
        format_scientific(value)
    }
}

fn format_fixed(value: f64) -> String {
    // `{value}` already yields Rust's shortest round-trip decimal; Display
    // never emits unnecessary trailing zeros, so no further trimming is
    // needed for the fixed-notation branch.
    let s = format!("{value}");
    if s.contains('e') || s.contains('E') {
        // Rust's Display can still choose scientific notation for extreme
        // magnitudes inside our "fixed" band in edge cases; normalize.
        format!("{value:.6}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        s
    }
}

fn format_scientific(value: f64) -> String {
    let s = format!("{value:e}");
    let (mantissa, exponent) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    let exp: i32 = exponent.parse().unwrap_or(0);
    format!("{mantissa}e{}{:02}", if exp < 0 { "-" } else { "+" }, exp.abs())
}
