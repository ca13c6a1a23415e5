//! Token amounts in smallest indivisible units
//!
//! [`TokenAmount`] is the only numeric type the exchange core does arithmetic
//! on. It never holds a fraction: `1 Ether` is `10^18` units and a reserve of
//! `1000` means one thousand units, not one thousand tokens.
//!
//! ## Design Principles
//!
//! - **No Floating Point**: amounts are plain `u128`, arithmetic is integer only
//! - **Overflow Protection**: every operation is checked and fails with a typed [`AmmError`]
//! - **Truncating Division**: callers choose the rounding direction explicitly
//! - **Clear Boundary**: decimal strings are converted once, at the presentation edge

use crate::common::errors::AmmError;
use crate::common::wide::mul_div_floor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest scale `rust_decimal` can represent
const MAX_DECIMAL_SCALE: u32 = 28;

/// Amount of an asset (base coin, fungible token or LP share) in smallest units
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenAmount(pub u128);

impl TokenAmount {
    /// Zero units
    pub const ZERO: Self = Self(0);

    /// Largest representable amount
    pub const MAX: Self = Self(u128::MAX);

    /// Wrap a raw smallest-unit value
    #[inline]
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Raw smallest-unit value
    #[inline]
    pub const fn raw(self) -> u128 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    // CHECKED ARITHMETIC - every path on the pricing side uses these

    /// Checked addition - `ArithmeticOverflow` on overflow
    pub fn checked_add(self, rhs: Self) -> Result<Self, AmmError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(AmmError::ArithmeticOverflow {
                operation: "amount addition",
            })
    }

    /// Checked subtraction - `ArithmeticUnderflow` when `rhs > self`
    pub fn checked_sub(self, rhs: Self) -> Result<Self, AmmError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(AmmError::ArithmeticUnderflow {
                operation: "amount subtraction",
            })
    }

    /// Checked multiplication - `ArithmeticOverflow` on overflow
    pub fn checked_mul(self, rhs: Self) -> Result<Self, AmmError> {
        self.0
            .checked_mul(rhs.0)
            .map(Self)
            .ok_or(AmmError::ArithmeticOverflow {
                operation: "amount multiplication",
            })
    }

    /// Truncating division - `DivisionByZero` when `rhs` is zero
    pub fn checked_div(self, rhs: Self) -> Result<Self, AmmError> {
        self.0
            .checked_div(rhs.0)
            .map(Self)
            .ok_or(AmmError::DivisionByZero {
                operation: "amount division",
            })
    }

    /// `floor(self * numerator / denominator)` with a 256-bit intermediate
    pub fn mul_div_floor(
        self,
        numerator: Self,
        denominator: Self,
        operation: &'static str,
    ) -> Result<Self, AmmError> {
        mul_div_floor(self.0, numerator.0, denominator.0, operation).map(Self)
    }

    // PRESENTATION BOUNDARY - decimal strings in, decimal values out

    /// Parse a human-readable decimal string into smallest units
    ///
    /// `decimals` is the asset's display precision (18 for Ether). Negative
    /// input, more fractional digits than `decimals`, or non-numeric text
    /// fail with `InvalidDecimal`; values past `u128` fail with
    /// `ArithmeticOverflow`.
    ///
    /// # Examples
    /// ```
    /// use types::TokenAmount;
    ///
    /// let one_ether = TokenAmount::from_decimal_str("1.5", 18).unwrap();
    /// assert_eq!(one_ether.raw(), 1_500_000_000_000_000_000);
    /// ```
    pub fn from_decimal_str(input: &str, decimals: u32) -> Result<Self, AmmError> {
        let invalid = || AmmError::InvalidDecimal {
            input: input.to_string(),
        };

        let value = Decimal::from_str(input.trim())
            .map_err(|_| invalid())?
            .normalize();
        if value.is_sign_negative() && !value.is_zero() {
            return Err(invalid());
        }
        if value.scale() > decimals {
            return Err(invalid());
        }

        let mantissa = u128::try_from(value.mantissa()).map_err(|_| invalid())?;
        let factor = 10u128
            .checked_pow(decimals - value.scale())
            .ok_or(AmmError::ArithmeticOverflow {
                operation: "decimal scaling",
            })?;

        mantissa
            .checked_mul(factor)
            .map(Self)
            .ok_or(AmmError::ArithmeticOverflow {
                operation: "decimal scaling",
            })
    }

    /// Convert to a `Decimal` for display, e.g. `1500000000000000000` at 18
    /// decimals becomes `1.5`
    ///
    /// Only for formatting. Amounts beyond the 96-bit `Decimal` mantissa fail
    /// with `ArithmeticOverflow`.
    pub fn to_decimal(self, decimals: u32) -> Result<Decimal, AmmError> {
        let overflow = AmmError::ArithmeticOverflow {
            operation: "decimal conversion",
        };
        if decimals > MAX_DECIMAL_SCALE {
            return Err(overflow);
        }
        let raw = i128::try_from(self.0).map_err(|_| overflow.clone())?;
        Decimal::try_from_i128_with_scale(raw, decimals)
            .map(|d| d.normalize())
            .map_err(|_| overflow)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for TokenAmount {
    #[inline]
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl From<TokenAmount> for u128 {
    #[inline]
    fn from(amount: TokenAmount) -> u128 {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_checked_arithmetic() {
        let a = TokenAmount::new(1_000);
        let b = TokenAmount::new(250);

        assert_eq!(a.checked_add(b).unwrap(), TokenAmount::new(1_250));
        assert_eq!(a.checked_sub(b).unwrap(), TokenAmount::new(750));
        assert_eq!(a.checked_mul(b).unwrap(), TokenAmount::new(250_000));
        assert_eq!(a.checked_div(b).unwrap(), TokenAmount::new(4));
    }

    #[test]
    fn test_checked_arithmetic_failures() {
        assert!(matches!(
            TokenAmount::MAX.checked_add(TokenAmount::new(1)),
            Err(AmmError::ArithmeticOverflow { .. })
        ));
        assert!(matches!(
            TokenAmount::ZERO.checked_sub(TokenAmount::new(1)),
            Err(AmmError::ArithmeticUnderflow { .. })
        ));
        assert!(matches!(
            TokenAmount::MAX.checked_mul(TokenAmount::new(2)),
            Err(AmmError::ArithmeticOverflow { .. })
        ));
        assert!(matches!(
            TokenAmount::new(1).checked_div(TokenAmount::ZERO),
            Err(AmmError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        let q = TokenAmount::new(999).checked_div(TokenAmount::new(1_000)).unwrap();
        assert_eq!(q, TokenAmount::ZERO);

        let q = TokenAmount::new(7)
            .mul_div_floor(TokenAmount::new(3), TokenAmount::new(2), "test")
            .unwrap();
        assert_eq!(q, TokenAmount::new(10));
    }

    #[test]
    fn test_from_decimal_str() {
        assert_eq!(
            TokenAmount::from_decimal_str("1", 18).unwrap().raw(),
            1_000_000_000_000_000_000
        );
        assert_eq!(
            TokenAmount::from_decimal_str("0.000000000000000001", 18).unwrap().raw(),
            1
        );
        assert_eq!(TokenAmount::from_decimal_str("12.50", 2).unwrap().raw(), 1_250);
        assert_eq!(TokenAmount::from_decimal_str("0", 18).unwrap(), TokenAmount::ZERO);
    }

    #[test]
    fn test_from_decimal_str_rejects_bad_input() {
        for input in ["-1", "abc", "", "1.001"] {
            let err = TokenAmount::from_decimal_str(input, 2).unwrap_err();
            assert!(
                matches!(err, AmmError::InvalidDecimal { .. }),
                "{input} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_to_decimal() {
        let amount = TokenAmount::new(1_500_000_000_000_000_000);
        assert_eq!(amount.to_decimal(18).unwrap(), dec!(1.5));
        assert_eq!(TokenAmount::new(42).to_decimal(0).unwrap(), dec!(42));
        assert!(TokenAmount::MAX.to_decimal(18).is_err());
        assert!(TokenAmount::new(1).to_decimal(29).is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&TokenAmount::new(1_000)).unwrap();
        assert_eq!(json, "1000");
        let back: TokenAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TokenAmount::new(1_000));
    }
}
