//! Pure arithmetic helpers - no I/O, fully deterministic
//!
//! Every division and every decimal/integer conversion in the core goes
//! through this module, so the zero-denominator and rounding policies are
//! auditable in one place:
//!
//! - `checked_quo`: zero denominator is a hard error.
//! - `quo_with_one_fallback`: zero denominator substitutes 1 (the weight
//!   model's documented degenerate case).
//! - `decimal_to_biguint_trunc`: rounds toward zero. Used for trader
//!   payouts; the direction is consensus-critical.
//! - `decimal_to_biguint_round`: rounds half away from zero. Used for the
//!   resized slippage input.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::constants::MAX_DECIMAL_MANTISSA;
use super::errors::{AmmError, CalculationError, Result};

/// Convert an integer amount into a `Decimal`, rejecting values that do
/// not fit the 96-bit mantissa.
pub fn biguint_to_decimal(amount: &BigUint, operation: &'static str) -> Result<Decimal> {
    let value = amount
        .to_u128()
        .filter(|v| *v <= MAX_DECIMAL_MANTISSA)
        .ok_or(AmmError::Calculation(CalculationError::Overflow {
            operation,
        }))?;
    Ok(Decimal::from_i128_with_scale(value as i128, 0))
}

/// Truncate a decimal toward zero and convert to an integer amount.
/// Negative inputs are an error, never a wrapped value.
pub fn decimal_to_biguint_trunc(value: Decimal, operation: &'static str) -> Result<BigUint> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmmError::Calculation(CalculationError::NegativeResult {
            operation,
        }));
    }
    let truncated = value.trunc();
    let as_u128 = truncated
        .to_u128()
        .ok_or(AmmError::Calculation(CalculationError::Overflow {
            operation,
        }))?;
    Ok(BigUint::from(as_u128))
}

/// Round a decimal half away from zero and convert to an integer amount.
pub fn decimal_to_biguint_round(value: Decimal, operation: &'static str) -> Result<BigUint> {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    decimal_to_biguint_trunc(rounded, operation)
}

/// Checked decimal division; a zero denominator is a hard error.
pub fn checked_quo(numer: Decimal, denom: Decimal, operation: &'static str) -> Result<Decimal> {
    if denom.is_zero() {
        return Err(AmmError::Calculation(CalculationError::DivisionByZero {
            operation,
        }));
    }
    numer
        .checked_div(denom)
        .ok_or(AmmError::Calculation(CalculationError::Overflow {
            operation,
        }))
}

/// Division with the weight model's degenerate fallback: a zero
/// denominator substitutes 1, so the numerator passes through unchanged.
///
/// Callers divide a part by a total that bounds it, so the quotient is at
/// most 1 and cannot overflow; an out-of-range quotient collapses to zero
/// rather than panicking.
pub fn quo_with_one_fallback(numer: Decimal, denom: Decimal) -> Decimal {
    if denom.is_zero() {
        return numer;
    }
    numer.checked_div(denom).unwrap_or(Decimal::ZERO)
}

/// Checked decimal multiplication.
pub fn checked_mul(a: Decimal, b: Decimal, operation: &'static str) -> Result<Decimal> {
    a.checked_mul(b)
        .ok_or(AmmError::Calculation(CalculationError::Overflow {
            operation,
        }))
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_biguint_to_decimal_roundtrip() {
        let amount = BigUint::from(123_456_789u64);
        let dec = biguint_to_decimal(&amount, "test").unwrap();
        assert_eq!(dec, dec!(123456789));
    }

    #[test]
    fn test_biguint_to_decimal_overflow() {
        // One over the 96-bit mantissa limit must be rejected.
        let amount = BigUint::from(MAX_DECIMAL_MANTISSA) + BigUint::from(1u8);
        let result = biguint_to_decimal(&amount, "test");
        assert!(matches!(
            result,
            Err(AmmError::Calculation(CalculationError::Overflow { .. }))
        ));
    }

    #[test]
    fn test_trunc_rounds_toward_zero() {
        assert_eq!(
            decimal_to_biguint_trunc(dec!(85.5), "test").unwrap(),
            BigUint::from(85u64)
        );
        assert_eq!(
            decimal_to_biguint_trunc(dec!(85.999), "test").unwrap(),
            BigUint::from(85u64)
        );
    }

    #[test]
    fn test_trunc_rejects_negative() {
        let result = decimal_to_biguint_trunc(dec!(-0.5), "test");
        assert!(matches!(
            result,
            Err(AmmError::Calculation(CalculationError::NegativeResult { .. }))
        ));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(
            decimal_to_biguint_round(dec!(2.5), "test").unwrap(),
            BigUint::from(3u64)
        );
        assert_eq!(
            decimal_to_biguint_round(dec!(2.4), "test").unwrap(),
            BigUint::from(2u64)
        );
    }

    #[test]
    fn test_checked_quo_division_by_zero() {
        let result = checked_quo(dec!(1), Decimal::ZERO, "test");
        assert!(matches!(
            result,
            Err(AmmError::Calculation(CalculationError::DivisionByZero { .. }))
        ));
    }

    #[test]
    fn test_checked_quo_exact() {
        assert_eq!(checked_quo(dec!(1), dec!(4), "test").unwrap(), dec!(0.25));
    }

    #[test]
    fn test_quo_with_one_fallback_zero_denominator() {
        // Denominator zero substitutes 1: the numerator passes through.
        assert_eq!(quo_with_one_fallback(dec!(7), Decimal::ZERO), dec!(7));
    }

    #[test]
    fn test_quo_with_one_fallback_normal_division() {
        assert_eq!(quo_with_one_fallback(dec!(1), dec!(2)), dec!(0.5));
    }
}
