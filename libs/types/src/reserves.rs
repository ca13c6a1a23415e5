//! Reserve state of a single pool
//!
//! A [`ReservePair`] is either completely empty or has positive balances on
//! both sides together with a positive LP supply. Pool operations build the
//! next pair with checked arithmetic and replace the old one in a single
//! assignment, so a value of this type is never observed half-updated.

use crate::common::errors::AmmError;
use crate::common::fixed_point::TokenAmount;
use crate::common::identifiers::SwapDirection;
use crate::common::wide::U256;
use serde::{Deserialize, Serialize};

/// Base reserve, token reserve and outstanding LP shares of one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReservePair {
    pub base_reserve: TokenAmount,
    pub token_reserve: TokenAmount,
    pub lp_supply: TokenAmount,
}

impl ReservePair {
    /// Pool as created at deployment
    pub const fn empty() -> Self {
        Self {
            base_reserve: TokenAmount::ZERO,
            token_reserve: TokenAmount::ZERO,
            lp_supply: TokenAmount::ZERO,
        }
    }

    /// Build a pair from externally observed balances, enforcing that the
    /// three fields are all zero or all positive
    pub fn from_parts(
        base_reserve: TokenAmount,
        token_reserve: TokenAmount,
        lp_supply: TokenAmount,
    ) -> Result<Self, AmmError> {
        let pair = Self {
            base_reserve,
            token_reserve,
            lp_supply,
        };
        pair.validate()?;
        Ok(pair)
    }

    /// Check the empty-iff-all-zero invariant
    pub fn validate(&self) -> Result<(), AmmError> {
        let zeros = [self.base_reserve, self.token_reserve, self.lp_supply]
            .iter()
            .filter(|amount| amount.is_zero())
            .count();
        if zeros == 0 || zeros == 3 {
            Ok(())
        } else {
            Err(AmmError::InconsistentReserves {
                base: self.base_reserve.raw(),
                token: self.token_reserve.raw(),
                lp_supply: self.lp_supply.raw(),
            })
        }
    }

    /// True before the first deposit and after the last withdrawal
    pub fn is_empty(&self) -> bool {
        self.lp_supply.is_zero()
    }

    /// `base_reserve * token_reserve` without overflow
    pub fn product(&self) -> U256 {
        U256::from(self.base_reserve.raw()) * U256::from(self.token_reserve.raw())
    }

    /// `(input_reserve, output_reserve)` for a swap in `direction`
    pub fn reserves_for(&self, direction: SwapDirection) -> (TokenAmount, TokenAmount) {
        match direction {
            SwapDirection::BaseForToken => (self.base_reserve, self.token_reserve),
            SwapDirection::TokenForBase => (self.token_reserve, self.base_reserve),
        }
    }

    /// Pair after a swap moved `input` in and `output` out
    pub fn after_swap(
        &self,
        direction: SwapDirection,
        input: TokenAmount,
        output: TokenAmount,
    ) -> Result<Self, AmmError> {
        let mut next = *self;
        match direction {
            SwapDirection::BaseForToken => {
                next.base_reserve = self.base_reserve.checked_add(input)?;
                next.token_reserve = self.token_reserve.checked_sub(output)?;
            }
            SwapDirection::TokenForBase => {
                next.token_reserve = self.token_reserve.checked_add(input)?;
                next.base_reserve = self.base_reserve.checked_sub(output)?;
            }
        }
        Ok(next)
    }

    /// Pair after a deposit
    pub fn after_deposit(
        &self,
        base: TokenAmount,
        token: TokenAmount,
        shares: TokenAmount,
    ) -> Result<Self, AmmError> {
        Ok(Self {
            base_reserve: self.base_reserve.checked_add(base)?,
            token_reserve: self.token_reserve.checked_add(token)?,
            lp_supply: self.lp_supply.checked_add(shares)?,
        })
    }

    /// Pair after a withdrawal
    pub fn after_withdrawal(
        &self,
        base: TokenAmount,
        token: TokenAmount,
        shares: TokenAmount,
    ) -> Result<Self, AmmError> {
        Ok(Self {
            base_reserve: self.base_reserve.checked_sub(base)?,
            token_reserve: self.token_reserve.checked_sub(token)?,
            lp_supply: self.lp_supply.checked_sub(shares)?,
        })
    }
}
