use std::f64::consts::TAU;

/// Format `v` rounded to two decimals with trailing zeros trimmed (`2.50 -> "2.5"`,
/// `-0.001 -> "0"`).
pub(crate) fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let mut s = format!("{:.2}", (v * 100.0).round() / 100.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_owned();
    }
    s
}

/// Fractional position of `x` inside its `2π` period, in `[0, 1)`.
pub(crate) fn period_fraction(x: f64) -> f64 {
    let p = x.rem_euclid(TAU) / TAU;
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if p >= 1.0 { 0.0 } else { p }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
