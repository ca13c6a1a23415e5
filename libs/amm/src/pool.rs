//! Atomic pool operations
//!
//! Each operation follows the same sequence: validate and price against the
//! current reserves, build the next [`ReservePair`] with checked arithmetic,
//! hand one [`Settlement`] to the executor, and assign the new reserves only
//! after the executor reports success. Any error before that final
//! assignment leaves the pool exactly as it was.

use crate::pool_traits::{PoolLedger, ReserveOracle, Settlement};
use crate::pricing::{PricingEngine, Quote};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use types::{
    AccountId, AmmError, Asset, FeeSchedule, ReservePair, Result, SwapDirection, TokenAmount,
};

/// Deposit of both assets in exchange for LP shares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityRequest {
    pub provider: AccountId,
    pub base_amount: TokenAmount,
    /// Maximum token the provider is willing to deposit
    pub token_amount: TokenAmount,
    /// Shares the provider was shown; fewer at execution is a stale quote
    pub expected_shares: Option<TokenAmount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddLiquidityReceipt {
    pub shares_minted: TokenAmount,
    pub base_deposited: TokenAmount,
    pub token_deposited: TokenAmount,
    pub reserves: ReservePair,
}

/// Burn of LP shares for a proportional slice of both reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidityRequest {
    pub provider: AccountId,
    pub shares: TokenAmount,
    pub min_base_out: Option<TokenAmount>,
    pub min_token_out: Option<TokenAmount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoveLiquidityReceipt {
    pub shares_burned: TokenAmount,
    pub base_out: TokenAmount,
    pub token_out: TokenAmount,
    pub reserves: ReservePair,
}

/// Exchange of one asset for the other along the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub trader: AccountId,
    pub direction: SwapDirection,
    pub input_amount: TokenAmount,
    /// Lowest acceptable output, usually the quote shown to the trader
    pub min_output: Option<TokenAmount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwapReceipt {
    pub direction: SwapDirection,
    pub input_amount: TokenAmount,
    pub output_amount: TokenAmount,
    pub reserves: ReservePair,
}

/// Operation bodies over borrowed reserve state
///
/// These are free of any locking so that [`Pool`] and tests can drive them
/// directly; callers sharing a pool must serialize them.
pub struct PoolOperations;

impl PoolOperations {
    pub fn add_liquidity<L: PoolLedger + ?Sized>(
        request: &AddLiquidityRequest,
        reserves: &mut ReservePair,
        ledger: &mut L,
    ) -> Result<AddLiquidityReceipt> {
        let token_consumed =
            match PricingEngine::quote_proportional_add(request.base_amount, reserves)? {
                Some(required) if request.token_amount < required => {
                    return Err(AmmError::InsufficientTokenAmount {
                        required: required.raw(),
                        provided: request.token_amount.raw(),
                    });
                }
                Some(required) => required,
                None => request.token_amount,
            };

        let shares =
            PricingEngine::quote_add_shares(request.base_amount, token_consumed, reserves)?;
        if let Some(expected) = request.expected_shares {
            if shares < expected {
                return Err(AmmError::StaleQuote {
                    quoted: expected.raw(),
                    current: shares.raw(),
                });
            }
        }

        let next = reserves.after_deposit(request.base_amount, token_consumed, shares)?;
        let settlement = Settlement::new(request.provider)
            .pull(Asset::Base, request.base_amount)
            .pull(Asset::Token, token_consumed)
            .mint(shares);
        commit(reserves, next, &settlement, ledger)?;

        Ok(AddLiquidityReceipt {
            shares_minted: shares,
            base_deposited: request.base_amount,
            token_deposited: token_consumed,
            reserves: next,
        })
    }

    pub fn remove_liquidity<L: PoolLedger + ?Sized>(
        request: &RemoveLiquidityRequest,
        reserves: &mut ReservePair,
        ledger: &mut L,
    ) -> Result<RemoveLiquidityReceipt> {
        let (base_out, token_out) = PricingEngine::quote_remove(request.shares, reserves)?;

        let held = ledger.balance(&request.provider, Asset::Share);
        if held < request.shares {
            return Err(AmmError::InsufficientShares {
                requested: request.shares.raw(),
                available: held.raw(),
            });
        }

        check_minimum(request.min_base_out, base_out)?;
        check_minimum(request.min_token_out, token_out)?;

        let next = reserves.after_withdrawal(base_out, token_out, request.shares)?;
        let settlement = Settlement::new(request.provider)
            .burn(request.shares)
            .push(Asset::Base, base_out)
            .push(Asset::Token, token_out);
        commit(reserves, next, &settlement, ledger)?;

        Ok(RemoveLiquidityReceipt {
            shares_burned: request.shares,
            base_out,
            token_out,
            reserves: next,
        })
    }

    pub fn swap<L: PoolLedger + ?Sized>(
        request: &SwapRequest,
        reserves: &mut ReservePair,
        fee: &FeeSchedule,
        ledger: &mut L,
    ) -> Result<SwapReceipt> {
        reserves.validate()?;
        let (input_reserve, output_reserve) = reserves.reserves_for(request.direction);
        let output = PricingEngine::quote_swap_output(
            request.input_amount,
            input_reserve,
            output_reserve,
            fee,
        )?;
        check_minimum(request.min_output, output)?;

        let next = reserves.after_swap(request.direction, request.input_amount, output)?;
        let settlement = Settlement::new(request.trader)
            .pull(request.direction.input_asset(), request.input_amount)
            .push(request.direction.output_asset(), output);
        commit(reserves, next, &settlement, ledger)?;

        Ok(SwapReceipt {
            direction: request.direction,
            input_amount: request.input_amount,
            output_amount: output,
            reserves: next,
        })
    }
}

fn check_minimum(minimum: Option<TokenAmount>, actual: TokenAmount) -> Result<()> {
    match minimum {
        Some(quoted) if actual < quoted => Err(AmmError::StaleQuote {
            quoted: quoted.raw(),
            current: actual.raw(),
        }),
        _ => Ok(()),
    }
}

/// Settle first, then publish the new reserves
fn commit<L: PoolLedger + ?Sized>(
    reserves: &mut ReservePair,
    next: ReservePair,
    settlement: &Settlement,
    ledger: &mut L,
) -> Result<()> {
    next.validate()?;
    ledger.settle(settlement)?;
    *reserves = next;
    Ok(())
}

/// A single constant-product pool bound to its ledger
#[derive(Debug)]
pub struct Pool<L> {
    reserves: ReservePair,
    fee: FeeSchedule,
    ledger: L,
}

impl<L: PoolLedger> Pool<L> {
    /// Empty pool, as deployed
    pub fn new(fee: FeeSchedule, ledger: L) -> Result<Self> {
        Self::with_reserves(ReservePair::empty(), fee, ledger)
    }

    /// Pool resumed from previously observed reserves
    pub fn with_reserves(reserves: ReservePair, fee: FeeSchedule, ledger: L) -> Result<Self> {
        fee.validate()?;
        reserves.validate()?;
        Ok(Self {
            reserves,
            fee,
            ledger,
        })
    }

    pub fn fee(&self) -> FeeSchedule {
        self.fee
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn quote_swap(&self, input_amount: TokenAmount, direction: SwapDirection) -> Result<Quote> {
        PricingEngine::quote_swap(input_amount, direction, &self.reserves, &self.fee)
    }

    pub fn quote_add(&self, base_amount: TokenAmount, token_amount: TokenAmount) -> Result<Quote> {
        PricingEngine::quote_add(base_amount, token_amount, &self.reserves)
    }

    pub fn quote_remove(&self, shares: TokenAmount) -> Result<Quote> {
        PricingEngine::quote_remove_liquidity(shares, &self.reserves)
    }

    pub fn add_liquidity(&mut self, request: &AddLiquidityRequest) -> Result<AddLiquidityReceipt> {
        let result = PoolOperations::add_liquidity(request, &mut self.reserves, &mut self.ledger);
        match &result {
            Ok(receipt) => info!(
                provider = %request.provider,
                base = %receipt.base_deposited,
                token = %receipt.token_deposited,
                shares = %receipt.shares_minted,
                "Liquidity added"
            ),
            Err(e) => warn!(provider = %request.provider, error = %e, "Add liquidity rejected"),
        }
        result
    }

    pub fn remove_liquidity(
        &mut self,
        request: &RemoveLiquidityRequest,
    ) -> Result<RemoveLiquidityReceipt> {
        let result =
            PoolOperations::remove_liquidity(request, &mut self.reserves, &mut self.ledger);
        match &result {
            Ok(receipt) => info!(
                provider = %request.provider,
                shares = %receipt.shares_burned,
                base_out = %receipt.base_out,
                token_out = %receipt.token_out,
                "Liquidity removed"
            ),
            Err(e) => warn!(provider = %request.provider, error = %e, "Remove liquidity rejected"),
        }
        result
    }

    pub fn swap(&mut self, request: &SwapRequest) -> Result<SwapReceipt> {
        let result =
            PoolOperations::swap(request, &mut self.reserves, &self.fee, &mut self.ledger);
        match &result {
            Ok(receipt) => info!(
                trader = %request.trader,
                direction = ?receipt.direction,
                input = %receipt.input_amount,
                output = %receipt.output_amount,
                "Swap executed"
            ),
            Err(e) => warn!(trader = %request.trader, error = %e, "Swap rejected"),
        }
        debug!(reserves = ?self.reserves, "Reserves after swap attempt");
        result
    }
}

impl<L> ReserveOracle for Pool<L> {
    fn reserves(&self) -> ReservePair {
        self.reserves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;
    use crate::pool_traits::BalanceOracle;

    fn amount(raw: u128) -> TokenAmount {
        TokenAmount::new(raw)
    }

    fn funded_ledger(account: AccountId, base: u128, token: u128) -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new(AccountId::from_tag(0xff));
        ledger.fund(account, Asset::Base, amount(base)).unwrap();
        ledger.fund(account, Asset::Token, amount(token)).unwrap();
        ledger
    }

    fn bootstrap(provider: AccountId, ledger: &mut InMemoryLedger) -> ReservePair {
        let mut reserves = ReservePair::empty();
        let request = AddLiquidityRequest {
            provider,
            base_amount: amount(1_000),
            token_amount: amount(1_000),
            expected_shares: None,
        };
        PoolOperations::add_liquidity(&request, &mut reserves, ledger).unwrap();
        reserves
    }

    #[test]
    fn test_add_consumes_exact_token_requirement() {
        let alice = AccountId::from_tag(1);
        let mut ledger = funded_ledger(alice, 10_000, 10_000);
        let mut reserves = bootstrap(alice, &mut ledger);

        let request = AddLiquidityRequest {
            provider: alice,
            base_amount: amount(100),
            token_amount: amount(500),
            expected_shares: None,
        };
        let receipt =
            PoolOperations::add_liquidity(&request, &mut reserves, &mut ledger).unwrap();
        assert_eq!(receipt.token_deposited, amount(100));
        assert_eq!(receipt.shares_minted, amount(100));
        assert_eq!(ledger.balance(&alice, Asset::Token), amount(10_000 - 1_100));
    }

    #[test]
    fn test_add_with_stale_share_quote() {
        let alice = AccountId::from_tag(1);
        let mut ledger = funded_ledger(alice, 10_000, 10_000);
        let mut reserves = bootstrap(alice, &mut ledger);
        let before = reserves;

        let request = AddLiquidityRequest {
            provider: alice,
            base_amount: amount(100),
            token_amount: amount(100),
            expected_shares: Some(amount(101)),
        };
        assert_eq!(
            PoolOperations::add_liquidity(&request, &mut reserves, &mut ledger),
            Err(AmmError::StaleQuote {
                quoted: 101,
                current: 100
            })
        );
        assert_eq!(reserves, before);
    }

    #[test]
    fn test_remove_checks_holder_balance() {
        let alice = AccountId::from_tag(1);
        let bob = AccountId::from_tag(2);
        let mut ledger = funded_ledger(alice, 10_000, 10_000);
        let mut reserves = bootstrap(alice, &mut ledger);

        let request = RemoveLiquidityRequest {
            provider: bob,
            shares: amount(10),
            min_base_out: None,
            min_token_out: None,
        };
        let before = reserves;
        let settlements = ledger.settlement_count();
        assert_eq!(
            PoolOperations::remove_liquidity(&request, &mut reserves, &mut ledger),
            Err(AmmError::InsufficientShares {
                requested: 10,
                available: 0
            })
        );
        assert_eq!(reserves, before);
        assert_eq!(ledger.settlement_count(), settlements);
    }

    #[test]
    fn test_remove_everything_empties_pool() {
        let alice = AccountId::from_tag(1);
        let mut ledger = funded_ledger(alice, 10_000, 10_000);
        let mut reserves = bootstrap(alice, &mut ledger);

        let request = RemoveLiquidityRequest {
            provider: alice,
            shares: amount(1_000),
            min_base_out: Some(amount(1_000)),
            min_token_out: Some(amount(1_000)),
        };
        PoolOperations::remove_liquidity(&request, &mut reserves, &mut ledger).unwrap();
        assert_eq!(reserves, ReservePair::empty());
        assert_eq!(ledger.balance(&alice, Asset::Base), amount(10_000));
        assert_eq!(ledger.share_supply(), TokenAmount::ZERO);
    }

    #[test]
    fn test_swap_min_output_guard() {
        let alice = AccountId::from_tag(1);
        let mut ledger = funded_ledger(alice, 10_000, 10_000);
        let mut reserves = bootstrap(alice, &mut ledger);
        let before = reserves;

        let request = SwapRequest {
            trader: alice,
            direction: SwapDirection::BaseForToken,
            input_amount: amount(100),
            min_output: Some(amount(91)),
        };
        assert_eq!(
            PoolOperations::swap(&request, &mut reserves, &FeeSchedule::DEFAULT, &mut ledger),
            Err(AmmError::StaleQuote {
                quoted: 91,
                current: 90
            })
        );
        assert_eq!(reserves, before);
    }

    #[test]
    fn test_pool_rejects_inconsistent_resume() {
        let ledger = InMemoryLedger::new(AccountId::from_tag(0xff));
        let broken = ReservePair {
            base_reserve: amount(1),
            token_reserve: TokenAmount::ZERO,
            lp_supply: amount(1),
        };
        assert!(Pool::with_reserves(broken, FeeSchedule::DEFAULT, ledger).is_err());
    }
}
