//! Constant-product quote math with exact integer rounding
//!
//! Every function here is pure: same reserves and arguments, same answer.
//! Divisions truncate, which always rounds in the pool's favour: depositors
//! get the floor of their share, withdrawers the floor of their claim,
//! traders the floor of the curve output.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use types::common::wide::{narrow, wide_add, wide_div, wide_mul};
use types::{AmmError, FeeSchedule, ReservePair, Result, SwapDirection, TokenAmount, U256};

/// LP shares minted per base unit on the first deposit into an empty pool
///
/// The first provider receives exactly as many shares as base units
/// deposited, and the ratio of their two amounts sets the opening price.
pub const BOOTSTRAP_SHARES_PER_BASE: u128 = 1;

/// Largest integer a `Decimal` mantissa holds (2^96 - 1)
const DECIMAL_MANTISSA_MAX: u128 = (1 << 96) - 1;

/// Change in outstanding LP shares implied by a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum ShareDelta {
    Mint(TokenAmount),
    Burn(TokenAmount),
    Unchanged,
}

/// Preview of an operation's outcome against one reserve snapshot
///
/// - add: `output_amount` is the token consumed, `counterpart_amount` the base deposited
/// - remove: `output_amount` is base out, `counterpart_amount` token out
/// - swap: `output_amount` is the amount out, `counterpart_amount` the amount in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub output_amount: TokenAmount,
    pub counterpart_amount: TokenAmount,
    pub share_delta: ShareDelta,
}

/// Spot price as an exact ratio of output units per input unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Price {
    pub numerator: TokenAmount,
    pub denominator: TokenAmount,
}

impl Price {
    /// Decimal rendering for display only
    ///
    /// The whole part is exact; the fractional part keeps 28 significant
    /// digits. Fails only when the whole part exceeds a `Decimal` mantissa.
    pub fn to_decimal(&self) -> Result<Decimal> {
        let overflow = AmmError::ArithmeticOverflow {
            operation: "price conversion",
        };
        let numerator = self.numerator.raw();
        let mut denominator = self.denominator.raw();
        if denominator == 0 {
            return Err(overflow);
        }

        let whole = Decimal::from_u128(numerator / denominator).ok_or(overflow.clone())?;
        let mut remainder = numerator % denominator;
        // remainder < denominator, so both shrink together without changing the ratio's scale
        while denominator > DECIMAL_MANTISSA_MAX {
            remainder /= 10;
            denominator /= 10;
        }
        let fraction = Decimal::from_u128(remainder)
            .zip(Decimal::from_u128(denominator))
            .and_then(|(r, d)| r.checked_div(d))
            .ok_or(overflow.clone())?;
        whole.checked_add(fraction).ok_or(overflow)
    }
}

/// Constant-product pricing functions
pub struct PricingEngine;

impl PricingEngine {
    /// Token amount that must accompany `desired_base` to keep the pool ratio
    ///
    /// Returns `None` for an empty pool: the first deposit sets the price and
    /// both amounts are accepted as given.
    pub fn quote_proportional_add(
        desired_base: TokenAmount,
        reserves: &ReservePair,
    ) -> Result<Option<TokenAmount>> {
        reserves.validate()?;
        if desired_base.is_zero() {
            return Err(AmmError::ZeroAmount {
                field: "base amount",
            });
        }
        if reserves.is_empty() {
            return Ok(None);
        }

        let required = desired_base.mul_div_floor(
            reserves.token_reserve,
            reserves.base_reserve,
            "proportional add",
        )?;
        if required.is_zero() {
            return Err(AmmError::ZeroAmount {
                field: "required token amount",
            });
        }
        Ok(Some(required))
    }

    /// LP shares minted for a deposit of `desired_base` (and its token side)
    pub fn quote_add_shares(
        desired_base: TokenAmount,
        desired_token: TokenAmount,
        reserves: &ReservePair,
    ) -> Result<TokenAmount> {
        reserves.validate()?;
        if desired_base.is_zero() {
            return Err(AmmError::ZeroAmount {
                field: "base amount",
            });
        }

        let shares = if reserves.is_empty() {
            if desired_token.is_zero() {
                return Err(AmmError::ZeroAmount {
                    field: "token amount",
                });
            }
            desired_base.checked_mul(TokenAmount::new(BOOTSTRAP_SHARES_PER_BASE))?
        } else {
            desired_base.mul_div_floor(reserves.lp_supply, reserves.base_reserve, "share mint")?
        };

        if shares.is_zero() {
            return Err(AmmError::ZeroShareMint);
        }
        Ok(shares)
    }

    /// Base and token paid out for burning `shares`
    pub fn quote_remove(
        shares: TokenAmount,
        reserves: &ReservePair,
    ) -> Result<(TokenAmount, TokenAmount)> {
        reserves.validate()?;
        if shares.is_zero() {
            return Err(AmmError::ZeroAmount {
                field: "share amount",
            });
        }
        if reserves.lp_supply.is_zero() || shares > reserves.lp_supply {
            return Err(AmmError::InsufficientShares {
                requested: shares.raw(),
                available: reserves.lp_supply.raw(),
            });
        }

        let base_out =
            shares.mul_div_floor(reserves.base_reserve, reserves.lp_supply, "base withdrawal")?;
        let token_out =
            shares.mul_div_floor(reserves.token_reserve, reserves.lp_supply, "token withdrawal")?;

        if base_out.is_zero() && token_out.is_zero() {
            return Err(AmmError::ZeroAmount {
                field: "withdrawal amount",
            });
        }
        Ok((base_out, token_out))
    }

    /// Constant-product output with the fee taken from the input side
    ///
    /// `effective = input * (den - num)` and
    /// `output = floor(effective * output_reserve / (input_reserve * den + effective))`,
    /// which keeps `(input_reserve + input) * (output_reserve - output)` at or
    /// above `input_reserve * output_reserve`.
    pub fn quote_swap_output(
        input_amount: TokenAmount,
        input_reserve: TokenAmount,
        output_reserve: TokenAmount,
        fee: &FeeSchedule,
    ) -> Result<TokenAmount> {
        fee.validate()?;
        if input_amount.is_zero() {
            return Err(AmmError::ZeroAmount {
                field: "input amount",
            });
        }
        if input_reserve.is_zero() || output_reserve.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                requested: input_amount.raw(),
                available: output_reserve.raw(),
            });
        }

        let effective_input = wide_mul(
            U256::from(input_amount.raw()),
            U256::from(fee.retained_multiplier()),
            "swap fee",
        )?;
        let numerator = wide_mul(effective_input, U256::from(output_reserve.raw()), "swap numerator")?;
        let scaled_reserve = wide_mul(
            U256::from(input_reserve.raw()),
            U256::from(fee.denominator),
            "swap denominator",
        )?;
        let denominator = wide_add(scaled_reserve, effective_input, "swap denominator")?;
        let output = TokenAmount::new(narrow(
            wide_div(numerator, denominator, "swap output")?,
            "swap output",
        )?);

        if output.is_zero() {
            return Err(AmmError::ZeroAmount {
                field: "output amount",
            });
        }
        if output >= output_reserve {
            return Err(AmmError::InsufficientLiquidity {
                requested: output.raw(),
                available: output_reserve.raw(),
            });
        }
        Ok(output)
    }

    /// Swap quote for `direction` against a reserve snapshot
    pub fn quote_swap(
        input_amount: TokenAmount,
        direction: SwapDirection,
        reserves: &ReservePair,
        fee: &FeeSchedule,
    ) -> Result<Quote> {
        reserves.validate()?;
        let (input_reserve, output_reserve) = reserves.reserves_for(direction);
        let output = Self::quote_swap_output(input_amount, input_reserve, output_reserve, fee)?;
        debug!(
            ?direction,
            input = %input_amount,
            output = %output,
            "Quoted swap"
        );
        Ok(Quote {
            output_amount: output,
            counterpart_amount: input_amount,
            share_delta: ShareDelta::Unchanged,
        })
    }

    /// Deposit quote: token actually consumed and shares minted
    ///
    /// For a non-empty pool `token_amount` is the caller's maximum; anything
    /// beyond the proportional requirement is not consumed.
    pub fn quote_add(
        base_amount: TokenAmount,
        token_amount: TokenAmount,
        reserves: &ReservePair,
    ) -> Result<Quote> {
        let token_consumed = match Self::quote_proportional_add(base_amount, reserves)? {
            Some(required) if token_amount < required => {
                return Err(AmmError::InsufficientTokenAmount {
                    required: required.raw(),
                    provided: token_amount.raw(),
                });
            }
            Some(required) => required,
            None => token_amount,
        };
        let shares = Self::quote_add_shares(base_amount, token_consumed, reserves)?;
        debug!(
            base = %base_amount,
            token = %token_consumed,
            shares = %shares,
            "Quoted deposit"
        );
        Ok(Quote {
            output_amount: token_consumed,
            counterpart_amount: base_amount,
            share_delta: ShareDelta::Mint(shares),
        })
    }

    /// Withdrawal quote for burning `shares`
    pub fn quote_remove_liquidity(shares: TokenAmount, reserves: &ReservePair) -> Result<Quote> {
        let (base_out, token_out) = Self::quote_remove(shares, reserves)?;
        debug!(
            shares = %shares,
            base_out = %base_out,
            token_out = %token_out,
            "Quoted withdrawal"
        );
        Ok(Quote {
            output_amount: base_out,
            counterpart_amount: token_out,
            share_delta: ShareDelta::Burn(shares),
        })
    }

    /// Marginal price of the input asset in output units, before fees
    pub fn spot_price(reserves: &ReservePair, direction: SwapDirection) -> Result<Price> {
        reserves.validate()?;
        if reserves.is_empty() {
            return Err(AmmError::InsufficientLiquidity {
                requested: 0,
                available: 0,
            });
        }
        let (input_reserve, output_reserve) = reserves.reserves_for(direction);
        Ok(Price {
            numerator: output_reserve,
            denominator: input_reserve,
        })
    }
}
