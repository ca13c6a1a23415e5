//! 256-bit intermediates for reserve products
//!
//! Reserves are `u128`, so the product of two of them needs 256 bits. Every
//! `a * b / c` on the pricing path goes through [`mul_div_floor`] and only the
//! final quotient is narrowed back.

#![allow(clippy::assign_op_pattern, clippy::manual_div_ceil)]

use crate::common::errors::AmmError;
use uint::construct_uint;

construct_uint! {
    /// Unsigned 256-bit integer used only for intermediate products
    pub struct U256(4);
}

/// Narrow a 256-bit value back to `u128`
#[inline]
pub fn narrow(value: U256, operation: &'static str) -> Result<u128, AmmError> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::ArithmeticOverflow { operation });
    }
    Ok(value.low_u128())
}

/// Checked 256-bit multiplication
#[inline]
pub fn wide_mul(a: U256, b: U256, operation: &'static str) -> Result<U256, AmmError> {
    a.checked_mul(b)
        .ok_or(AmmError::ArithmeticOverflow { operation })
}

/// Checked 256-bit addition
#[inline]
pub fn wide_add(a: U256, b: U256, operation: &'static str) -> Result<U256, AmmError> {
    a.checked_add(b)
        .ok_or(AmmError::ArithmeticOverflow { operation })
}

/// Truncating 256-bit division
#[inline]
pub fn wide_div(a: U256, b: U256, operation: &'static str) -> Result<U256, AmmError> {
    if b.is_zero() {
        return Err(AmmError::DivisionByZero { operation });
    }
    Ok(a / b)
}

/// `floor(a * b / c)` without intermediate overflow
///
/// Fails with `DivisionByZero` when `c == 0` and with `ArithmeticOverflow`
/// when the quotient does not fit in `u128`.
pub fn mul_div_floor(a: u128, b: u128, c: u128, operation: &'static str) -> Result<u128, AmmError> {
    let product = wide_mul(U256::from(a), U256::from(b), operation)?;
    let quotient = wide_div(product, U256::from(c), operation)?;
    narrow(quotient, operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floor_truncates() {
        assert_eq!(mul_div_floor(10, 10, 3, "test").unwrap(), 33);
        assert_eq!(mul_div_floor(0, 10, 3, "test").unwrap(), 0);
    }

    #[test]
    fn test_mul_div_floor_survives_u128_product() {
        // 1e30 * 1e30 overflows u128 but the quotient does not
        let big = 1_000_000_000_000_000_000_000_000_000_000u128;
        assert_eq!(mul_div_floor(big, big, big, "test").unwrap(), big);
    }

    #[test]
    fn test_mul_div_floor_quotient_overflow() {
        let err = mul_div_floor(u128::MAX, 2, 1, "test").unwrap_err();
        assert_eq!(err, AmmError::ArithmeticOverflow { operation: "test" });
    }

    #[test]
    fn test_mul_div_floor_division_by_zero() {
        let err = mul_div_floor(1, 1, 0, "test").unwrap_err();
        assert_eq!(err, AmmError::DivisionByZero { operation: "test" });
    }

    #[test]
    fn test_narrow_boundary() {
        assert_eq!(narrow(U256::from(u128::MAX), "test").unwrap(), u128::MAX);
        let over = U256::from(u128::MAX) + U256::one();
        assert!(narrow(over, "test").is_err());
    }
}
