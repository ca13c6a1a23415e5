//! Swap fee expressed as an exact fraction

use crate::common::errors::AmmError;
use serde::{Deserialize, Serialize};

/// Fee taken from the swap input, `numerator / denominator`
///
/// `3 / 1000` is 0.3%. The retained fee stays in the pool and accrues to LP
/// holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub numerator: u32,
    pub denominator: u32,
}

impl FeeSchedule {
    /// 0.3%
    pub const DEFAULT: Self = Self {
        numerator: 3,
        denominator: 1_000,
    };

    /// Validated constructor
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, AmmError> {
        let fee = Self {
            numerator,
            denominator,
        };
        fee.validate()?;
        Ok(fee)
    }

    /// A fee of zero
    pub const fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    /// Fee must lie in `[0, 1)`
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.denominator == 0 || self.numerator >= self.denominator {
            return Err(AmmError::InvalidFee {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(())
    }

    /// Share of the input that reaches the curve, scaled by `denominator`
    pub fn retained_multiplier(&self) -> u32 {
        self.denominator.saturating_sub(self.numerator)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fees() {
        assert!(FeeSchedule::new(3, 1_000).is_ok());
        assert!(FeeSchedule::new(0, 1).is_ok());
        assert_eq!(FeeSchedule::DEFAULT.retained_multiplier(), 997);
    }

    #[test]
    fn test_invalid_fees() {
        assert_eq!(
            FeeSchedule::new(1, 0),
            Err(AmmError::InvalidFee {
                numerator: 1,
                denominator: 0
            })
        );
        assert!(FeeSchedule::new(100, 100).is_err());
        assert!(FeeSchedule::new(101, 100).is_err());
    }
}
