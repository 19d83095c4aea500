//! Number literal classification.
//!
//! Order: i32 → u32 → i64 → u64 → f32 → f64 → decimal. Integer widths only
//! apply to literals written without a fraction or exponent. A float width
//! applies when its shortest round-trip rendering carries exactly the
//! literal's digits and exponent, i.e. parsing lost nothing.
use super::CanonicalType;
use crate::error::{Error, Result};

/// Largest magnitude a 96-bit decimal holds.
const DECIMAL_MAX: u128 = 79_228_162_514_264_337_593_543_950_335;
const DECIMAL_MAX_INT_DIGITS: i64 = 29;

pub fn classify_number(literal: &str) -> Result<CanonicalType> {
    if is_integer_literal(literal) {
        if literal.parse::<i32>().is_ok() {
            return Ok(CanonicalType::Int32);
        }
        if literal.parse::<u32>().is_ok() {
            return Ok(CanonicalType::UInt32);
        }
        if literal.parse::<i64>().is_ok() {
            return Ok(CanonicalType::Int64);
        }
        if literal.parse::<u64>().is_ok() {
            return Ok(CanonicalType::UInt64);
        }
    }

    let unsupported = || Error::UnsupportedNumber { literal: literal.to_string() };
    let digits = Digits::parse(literal).ok_or_else(unsupported)?;

    if let Ok(f) = literal.parse::<f32>() {
        if f.is_finite() && Digits::parse(&format!("{f:e}")).as_ref() == Some(&digits) {
            return Ok(CanonicalType::Float32);
        }
    }
    if let Ok(f) = literal.parse::<f64>() {
        if f.is_finite() && Digits::parse(&format!("{f:e}")).as_ref() == Some(&digits) {
            return Ok(CanonicalType::Float64);
        }
    }
    if digits.fits_decimal() {
        return Ok(CanonicalType::Decimal);
    }
    Err(unsupported())
}

fn is_integer_literal(literal: &str) -> bool {
    !literal.is_empty() && !literal.contains(['.', 'e', 'E'])
}

/// A number literal reduced to `±digits × 10^exponent`, with no leading or
/// trailing zeros in `digits` (zero is `"0" × 10^0`, unsigned).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Digits {
    negative: bool,
    digits: String,
    exponent: i64,
}

impl Digits {
    fn parse(literal: &str) -> Option<Self> {
        let (negative, rest) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(i) => (&rest[..i], rest[i + 1..].parse::<i64>().ok()?),
            None => (rest, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut exponent = exponent.checked_sub(frac_part.len() as i64)?;
        let joined = format!("{int_part}{frac_part}");
        let mut digits = joined.trim_start_matches('0').to_string();
        if digits.is_empty() {
            return Some(Self { negative: false, digits: "0".into(), exponent: 0 });
        }
        while digits.ends_with('0') {
            digits.pop();
            exponent = exponent.checked_add(1)?;
        }
        Some(Self { negative, digits, exponent })
    }

    /// Digits left of the decimal point.
    fn integer_digits(&self) -> i64 {
        self.digits.len() as i64 + self.exponent
    }

    fn fits_decimal(&self) -> bool {
        let int_digits = self.integer_digits();
        if int_digits < DECIMAL_MAX_INT_DIGITS {
            // fractional digits past the 28th place round away
            return true;
        }
        if int_digits > DECIMAL_MAX_INT_DIGITS {
            return false;
        }
        let integer_part = if self.exponent >= 0 {
            format!("{}{}", self.digits, "0".repeat(self.exponent as usize))
        } else {
            self.digits[..DECIMAL_MAX_INT_DIGITS as usize].to_string()
        };
        let has_fraction = self.exponent < 0;
        match integer_part.parse::<u128>() {
            Ok(value) => value < DECIMAL_MAX || (value == DECIMAL_MAX && !has_fraction),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CanonicalType::*;

    #[test]
    fn integer_widths_follow_the_literal() {
        assert_eq!(classify_number("0").unwrap(), Int32);
        assert_eq!(classify_number("-0").unwrap(), Int32);
        assert_eq!(classify_number("4294967295").unwrap(), UInt32);
        assert_eq!(classify_number("-9223372036854775808").unwrap(), Int64);
        assert_eq!(classify_number("18446744073709551615").unwrap(), UInt64);
    }

    #[test]
    fn short_fractions_are_single_precision() {
        assert_eq!(classify_number("1.5").unwrap(), Float32);
        assert_eq!(classify_number("0.1").unwrap(), Float32);
        assert_eq!(classify_number("1.0").unwrap(), Float32);
        assert_eq!(classify_number("-2.5e-3").unwrap(), Float32);
    }

    #[test]
    fn long_fractions_need_double_precision() {
        assert_eq!(classify_number("123.456789").unwrap(), Float64);
        assert_eq!(classify_number("0.30000000000000004").unwrap(), Float64);
    }

    #[test]
    fn integers_beyond_u64_fall_to_decimal() {
        assert_eq!(classify_number("18446744073709551616").unwrap(), Decimal);
        assert_eq!(classify_number("79228162514264337593543950335").unwrap(), Decimal);
    }

    #[test]
    fn out_of_range_literals_are_rejected() {
        let err = classify_number("79228162514264337593543950336").unwrap_err();
        assert!(matches!(err, Error::UnsupportedNumber { ref literal } if literal == "79228162514264337593543950336"));
        assert!(classify_number("1e400").is_err());
    }

    #[test]
    fn digits_normalize_zeros_and_exponent() {
        let d = Digits::parse("120.500").unwrap();
        assert_eq!(d.digits, "1205");
        assert_eq!(d.exponent, -1);
        assert_eq!(Digits::parse("3.4028235E+38"), Digits::parse("3.4028235e38"));
        assert_eq!(Digits::parse("-0.0"), Digits::parse("0e0"));
        assert_eq!(Digits::parse("abc"), None);
    }
}
