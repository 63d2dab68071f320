//! Conversions between the human-facing units shown in forms and the
//! fixed-point integers the contract expects.

use crate::{ClientError, Result, BASIS_POINTS_PER_PERCENT, OCTAS_PER_APT};

/// Convert a decimal APT amount to an Octa count, as the base-10 integer
/// string the contract takes.
///
/// Floors, never rounds, to match the contract-side arithmetic. Negative
/// inputs floor toward negative infinity; rejecting them is the job of
/// [`crate::validate::validate_amount`], not this function.
pub fn to_octas(amount: &str) -> Result<String> {
    let value: f64 = amount
        .trim()
        .parse()
        .map_err(|_| ClientError::InvalidNumber(amount.to_string()))?;

    if !value.is_finite() {
        return Err(ClientError::InvalidNumber(amount.to_string()));
    }

    let octas = (value * OCTAS_PER_APT as f64).floor() as i128;
    Ok(octas.to_string())
}

/// Convert an Octa count back to a decimal APT string, trailing zeros
/// trimmed. Pure integer arithmetic so round trips are exact.
pub fn from_octas(octas: &str) -> Result<String> {
    let value: i128 = octas
        .trim()
        .parse()
        .map_err(|_| ClientError::InvalidNumber(octas.to_string()))?;

    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    let whole = magnitude / OCTAS_PER_APT as u128;
    let frac = magnitude % OCTAS_PER_APT as u128;

    if frac == 0 {
        return Ok(format!("{sign}{whole}"));
    }

    let mut frac_digits = format!("{frac:08}");
    while frac_digits.ends_with('0') {
        frac_digits.pop();
    }
    Ok(format!("{sign}{whole}.{frac_digits}"))
}

/// Convert a percentage to basis points, truncating toward zero.
///
/// Out-of-range percentages are deliberately not rejected here; the
/// contract is the arbiter of acceptable rates.
pub fn to_basis_points(percent: f64) -> i64 {
    (percent * BASIS_POINTS_PER_PERCENT as f64).trunc() as i64
}

/// Basis points back to a percentage, for display.
pub fn from_basis_points(bps: u64) -> f64 {
    bps as f64 / BASIS_POINTS_PER_PERCENT as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_octas() {
        assert_eq!(to_octas("2.5").unwrap(), "250000000");
        assert_eq!(to_octas("1").unwrap(), "100000000");
        assert_eq!(to_octas("0").unwrap(), "0");
        assert_eq!(to_octas("0.00000001").unwrap(), "1");
    }

    #[test]
    fn test_to_octas_floors_sub_octa_amounts() {
        // Half an Octa floors to zero, it must never round up.
        assert_eq!(to_octas("0.000000005").unwrap(), "0");
        assert_eq!(to_octas("1.999999999").unwrap(), "199999999");
    }

    #[test]
    fn test_to_octas_floors_negative_toward_negative_infinity() {
        assert_eq!(to_octas("-0.000000001").unwrap(), "-1");
        assert_eq!(to_octas("-2.5").unwrap(), "-250000000");
    }

    #[test]
    fn test_to_octas_rejects_non_numbers() {
        assert!(matches!(to_octas("abc"), Err(ClientError::InvalidNumber(_))));
        assert!(matches!(to_octas(""), Err(ClientError::InvalidNumber(_))));
        assert!(matches!(to_octas("inf"), Err(ClientError::InvalidNumber(_))));
        assert!(matches!(to_octas("NaN"), Err(ClientError::InvalidNumber(_))));
    }

    #[test]
    fn test_from_octas() {
        assert_eq!(from_octas("250000000").unwrap(), "2.5");
        assert_eq!(from_octas("100000000").unwrap(), "1");
        assert_eq!(from_octas("0").unwrap(), "0");
        assert_eq!(from_octas("1").unwrap(), "0.00000001");
        assert_eq!(from_octas("-250000000").unwrap(), "-2.5");
    }

    #[test]
    fn test_from_octas_rejects_non_integers() {
        assert!(matches!(from_octas("2.5"), Err(ClientError::InvalidNumber(_))));
        assert!(matches!(from_octas("abc"), Err(ClientError::InvalidNumber(_))));
    }

    #[test]
    fn test_octas_round_trip_truncates_to_eight_digits() {
        for amount in ["2.5", "0.00000001", "0.12345678", "3.14159265", "1000", "0"] {
            let octas = to_octas(amount).unwrap();
            assert_eq!(from_octas(&octas).unwrap(), amount);
        }
        // A ninth fractional digit is floored away before the round trip.
        let octas = to_octas("1.234567891").unwrap();
        assert_eq!(from_octas(&octas).unwrap(), "1.23456789");
    }

    #[test]
    fn test_to_basis_points() {
        assert_eq!(to_basis_points(5.0), 500);
        assert_eq!(to_basis_points(0.0), 0);
        assert_eq!(to_basis_points(12.5), 1250);
        // Truncates toward zero.
        assert_eq!(to_basis_points(5.999), 599);
        // Out-of-range percentages pass through untouched.
        assert_eq!(to_basis_points(150.0), 15000);
    }

    #[test]
    fn test_from_basis_points() {
        assert!((from_basis_points(550) - 5.5).abs() < f64::EPSILON);
        assert_eq!(from_basis_points(0), 0.0);
    }
}
