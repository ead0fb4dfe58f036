//! Coordinate literals: decimal reals or `#HEXINT[.HEXFRAC]` fixed-point values.
//!
//! The hex form stores a two's complement 24-bit integer part and an 8-bit fraction
//! (`#FFFFFE.80` is `-1.5`). The fraction is a hex byte: `.8` is `8/256`, `.80` is `128/256`.

/// Parses one coordinate token. Returns `None` for anything that is not a finite number.
pub fn parse_coordinate(token: &str) -> Option<f64> {
    let Some(hex) = token.strip_prefix('#') else {
        return token.parse::<f64>().ok().filter(|v| v.is_finite());
    };
    let (int_digits, frac_digits) = match hex.split_once('.') {
        Some((int_digits, frac_digits)) => (int_digits, Some(frac_digits)),
        None => (hex, None),
    };
    if !is_hex(int_digits, 1..=6) {
        return None;
    }
    let raw = u32::from_str_radix(int_digits, 16).ok()?;
    let int = if raw >= 0x80_0000 {
        i64::from(raw) - 0x100_0000
    } else {
        i64::from(raw)
    };
    let frac = match frac_digits {
        None => 0,
        Some(digits) if is_hex(digits, 1..=2) => u32::from_str_radix(digits, 16).ok()?,
        Some(_) => return None,
    };
    Some(int as f64 + f64::from(frac) / 256.0)
}

fn is_hex(digits: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Formats `v` as a hex literal; `None` unless `v` is exact in 24.8 fixed point.
pub fn format_hex_literal(v: f64) -> Option<String> {
    let scaled = v * 256.0;
    if !scaled.is_finite() || scaled.fract() != 0.0 {
        return None;
    }
    let raw = scaled as i64;
    if !(-(1i64 << 31)..(1i64 << 31)).contains(&raw) {
        return None;
    }
    let int = (raw >> 8) & 0xFF_FFFF;
    let frac = raw & 0xFF;
    if frac == 0 {
        return Some(format!("#{int:X}"));
    }
    Some(format!("#{int:X}.{frac:02X}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_tokens() {
        assert_eq!(parse_coordinate("10"), Some(10.0));
        assert_eq!(parse_coordinate("-3.25"), Some(-3.25));
        assert_eq!(parse_coordinate("1e2"), Some(100.0));
        assert_eq!(parse_coordinate("inf"), None);
        assert_eq!(parse_coordinate("abc"), None);
    }

    #[test]
    fn hex_tokens_sign_extend_the_integer_part() {
        assert_eq!(parse_coordinate("#1A"), Some(26.0));
        assert_eq!(parse_coordinate("#1A.80"), Some(26.5));
        assert_eq!(parse_coordinate("#1A.8"), Some(26.0 + 8.0 / 256.0));
        assert_eq!(parse_coordinate("#FFFFFE.80"), Some(-1.5));
        assert_eq!(parse_coordinate("#800000"), Some(-8_388_608.0));
    }

    #[test]
    fn malformed_hex_tokens_are_rejected() {
        for token in ["#", "#G1", "#1.", "#1.123", "#1234567", "#+1", "#1.-2"] {
            assert_eq!(parse_coordinate(token), None, "{token}");
        }
    }

    #[test]
    fn formatting_is_the_inverse_of_parsing() {
        for v in [
            0.0,
            1.0,
            -1.0,
            26.5,
            -1.5,
            0.00390625,
            -0.00390625,
            8_388_607.99609375,
            -8_388_608.0,
            1234.125,
        ] {
            let text = format_hex_literal(v).unwrap();
            assert_eq!(parse_coordinate(&text), Some(v), "{v} -> {text}");
        }
        assert_eq!(format_hex_literal(-1.5).as_deref(), Some("#FFFFFE.80"));
        assert_eq!(format_hex_literal(26.0).as_deref(), Some("#1A"));
    }

    #[test]
    fn inexact_or_out_of_range_values_have_no_hex_form() {
        assert_eq!(format_hex_literal(0.1), None);
        assert_eq!(format_hex_literal(8_388_608.0), None);
        assert_eq!(format_hex_literal(f64::NAN), None);
    }
}
