use crate::model::{RawValue, StatKey};

/// True when a parsed magnitude should be read as fractional percentage
/// shorthand ("0.18" meaning 18%).
///
/// Applies to magnitudes in (0, 1] on percentage stats only. Flat stats
/// (`atk`, `def`, `hp`) are never rescaled. A genuine percentage of
/// exactly 1 is also rescaled to 100; that ambiguity is kept as is.
pub fn is_fractional_percent(magnitude: f64, key: &StatKey) -> bool {
    magnitude > 0.0 && magnitude <= 1.0 && !key.is_flat()
}

/// Canonical magnitude of a raw value, without the percentage heuristic.
/// Anything unparseable becomes 0.
pub fn parse_magnitude(raw: &RawValue) -> f64 {
    match raw {
        RawValue::Numeric(v) if v.is_finite() => *v,
        RawValue::Numeric(_) => 0.0,
        RawValue::Text(s) => parse_text(s).unwrap_or(0.0),
    }
}

/// Canonical magnitude of a raw value for the given stat.
pub fn normalize(raw: &RawValue, key: &StatKey) -> f64 {
    let magnitude = parse_magnitude(raw);
    if is_fractional_percent(magnitude, key) {
        magnitude * 100.0
    } else {
        magnitude
    }
}

// Drops the percent marker, then reads the leading decimal number the way
// a lenient float parser does ("18.5 %" -> 18.5, "12pts" -> 12).
fn parse_text(s: &str) -> Option<f64> {
    let cleaned = s.trim().replacen('%', "", 1);
    leading_float(cleaned.trim())
}

fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Optional exponent, only consumed when it is complete.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
