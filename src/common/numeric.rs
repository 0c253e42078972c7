//! Rounding and number formatting used by the text reports.

/// Round to two decimal places.
///
/// Rounds the exact binary value, with exact ties going to the even digit
/// (`-60.125` becomes `-60.12`). Scaling by 100 and calling `f64::round`
/// would send those ties away from zero instead.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Format a float with its shortest exact representation, but always with a
/// decimal part (`100.0`, `66.67`, `-60.0`), as the testbed scripts print.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
