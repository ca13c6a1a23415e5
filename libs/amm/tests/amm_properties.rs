//! Property-based tests for the pricing engine and pool operations
//!
//! Reserve and amount ranges go up to wei scale so that every product of two
//! reserves exceeds u128 and the 256-bit intermediates are exercised.

use amm::{
    AddLiquidityRequest, InMemoryLedger, PoolOperations, PricingEngine, RemoveLiquidityRequest,
    SwapRequest,
};
use proptest::prelude::*;
use types::{AccountId, AmmError, Asset, FeeSchedule, ReservePair, SwapDirection, TokenAmount};

const VAULT: AccountId = AccountId::from_tag(0xff);
const PROVIDER: AccountId = AccountId::from_tag(1);
const TRADER: AccountId = AccountId::from_tag(2);
const NEWCOMER: AccountId = AccountId::from_tag(3);

const MAX_RESERVE: u128 = 1_000_000_000_000_000_000_000_000; // 1e6 tokens at 18 decimals

prop_compose! {
    fn arb_reserves()(
        base in 1_000u128..MAX_RESERVE,
        token in 1_000u128..MAX_RESERVE,
        lp in 1_000u128..MAX_RESERVE,
    ) -> ReservePair {
        ReservePair {
            base_reserve: TokenAmount::new(base),
            token_reserve: TokenAmount::new(token),
            lp_supply: TokenAmount::new(lp),
        }
    }
}

prop_compose! {
    fn arb_fee()(denominator in 1u32..=10_000)(
        numerator in 0..denominator,
        denominator in Just(denominator),
    ) -> FeeSchedule {
        FeeSchedule { numerator, denominator }
    }
}

fn arb_direction() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![
        Just(SwapDirection::BaseForToken),
        Just(SwapDirection::TokenForBase),
    ]
}

fn ledger_with(accounts: &[(AccountId, u128, u128)]) -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new(VAULT);
    for &(account, base, token) in accounts {
        ledger.fund(account, Asset::Base, TokenAmount::new(base)).unwrap();
        ledger.fund(account, Asset::Token, TokenAmount::new(token)).unwrap();
    }
    ledger
}

fn bootstrap(ledger: &mut InMemoryLedger, base: u128, token: u128) -> ReservePair {
    let mut reserves = ReservePair::empty();
    PoolOperations::add_liquidity(
        &AddLiquidityRequest {
            provider: PROVIDER,
            base_amount: TokenAmount::new(base),
            token_amount: TokenAmount::new(token),
            expected_shares: None,
        },
        &mut reserves,
        ledger,
    )
    .unwrap();
    reserves
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn swap_never_decreases_reserve_product(
        base in 1_000u128..MAX_RESERVE,
        token in 1_000u128..MAX_RESERVE,
        input in 1u128..MAX_RESERVE,
        direction in arb_direction(),
        fee in arb_fee(),
    ) {
        let mut ledger = ledger_with(&[(PROVIDER, base, token), (TRADER, input, input)]);
        let mut reserves = bootstrap(&mut ledger, base, token);
        let before = reserves.product();

        let request = SwapRequest {
            trader: TRADER,
            direction,
            input_amount: TokenAmount::new(input),
            min_output: None,
        };
        match PoolOperations::swap(&request, &mut reserves, &fee, &mut ledger) {
            Ok(receipt) => {
                prop_assert!(reserves.product() >= before);
                prop_assert!(!receipt.output_amount.is_zero());
                prop_assert_eq!(reserves.validate(), Ok(()));
            }
            Err(err) => {
                let is_reported = matches!(
                    err,
                    AmmError::ZeroAmount { .. } | AmmError::InsufficientLiquidity { .. }
                );
                prop_assert!(is_reported, "unexpected error {:?}", err);
                prop_assert_eq!(reserves.product(), before);
            }
        }
    }

    #[test]
    fn add_then_remove_never_favours_withdrawer(
        pool_base in 1_000u128..MAX_RESERVE,
        pool_token in 1_000u128..MAX_RESERVE,
        base in 1u128..MAX_RESERVE,
        token_slack in 0u128..1_000_000,
    ) {
        // keep the deposit no larger than the pool so the token side stays fundable
        let base = base % pool_base + 1;
        let mut ledger = ledger_with(&[
            (PROVIDER, pool_base, pool_token),
            (NEWCOMER, base, MAX_RESERVE * 2),
        ]);
        let mut reserves = bootstrap(&mut ledger, pool_base, pool_token);

        let required = match PricingEngine::quote_proportional_add(TokenAmount::new(base), &reserves) {
            Ok(Some(required)) => required.raw(),
            Ok(None) => unreachable!("pool was bootstrapped"),
            Err(_) => return Ok(()),
        };
        let token = required + token_slack;
        let deposit = AddLiquidityRequest {
            provider: NEWCOMER,
            base_amount: TokenAmount::new(base),
            token_amount: TokenAmount::new(token),
            expected_shares: None,
        };
        let before = reserves;
        let settlements = ledger.settlement_count();
        let receipt = match PoolOperations::add_liquidity(&deposit, &mut reserves, &mut ledger) {
            Ok(receipt) => receipt,
            Err(AmmError::ZeroShareMint) => {
                prop_assert_eq!(reserves, before);
                prop_assert_eq!(ledger.settlement_count(), settlements);
                return Ok(());
            }
            Err(err) => return Err(TestCaseError::fail(format!("deposit failed: {err}"))),
        };
        prop_assert_eq!(receipt.token_deposited.raw(), required);

        let withdrawal = RemoveLiquidityRequest {
            provider: NEWCOMER,
            shares: receipt.shares_minted,
            min_base_out: None,
            min_token_out: None,
        };
        match PoolOperations::remove_liquidity(&withdrawal, &mut reserves, &mut ledger) {
            Ok(out) => {
                prop_assert!(out.base_out <= receipt.base_deposited);
                prop_assert!(out.token_out <= receipt.token_deposited);
            }
            Err(err) => {
                let is_dust = matches!(err, AmmError::ZeroAmount { .. });
                prop_assert!(is_dust, "unexpected error {:?}", err);
            }
        }
    }

    #[test]
    fn quotes_are_idempotent(
        reserves in arb_reserves(),
        amount in 1u128..MAX_RESERVE,
        direction in arb_direction(),
        fee in arb_fee(),
    ) {
        let amount = TokenAmount::new(amount);
        prop_assert_eq!(
            PricingEngine::quote_swap(amount, direction, &reserves, &fee),
            PricingEngine::quote_swap(amount, direction, &reserves, &fee)
        );
        prop_assert_eq!(
            PricingEngine::quote_add(amount, TokenAmount::MAX, &reserves),
            PricingEngine::quote_add(amount, TokenAmount::MAX, &reserves)
        );
        prop_assert_eq!(
            PricingEngine::quote_remove_liquidity(amount, &reserves),
            PricingEngine::quote_remove_liquidity(amount, &reserves)
        );
    }

    #[test]
    fn swap_quote_boundaries(
        reserve in 1u128..MAX_RESERVE,
        input in 1u128..MAX_RESERVE,
        fee in arb_fee(),
    ) {
        let reserve = TokenAmount::new(reserve);
        prop_assert_eq!(
            PricingEngine::quote_swap_output(TokenAmount::ZERO, reserve, reserve, &fee),
            Err(AmmError::ZeroAmount { field: "input amount" })
        );
        let drained = PricingEngine::quote_swap_output(
            TokenAmount::new(input),
            reserve,
            TokenAmount::ZERO,
            &fee,
        );
        let is_insufficient = matches!(drained, Err(AmmError::InsufficientLiquidity { .. }));
        prop_assert!(is_insufficient);
    }

    #[test]
    fn swap_output_stays_below_reserve(
        reserves in arb_reserves(),
        input in 1u128..u128::MAX / 2,
        direction in arb_direction(),
        fee in arb_fee(),
    ) {
        let (_, output_reserve) = reserves.reserves_for(direction);
        if let Ok(quote) = PricingEngine::quote_swap(TokenAmount::new(input), direction, &reserves, &fee) {
            prop_assert!(quote.output_amount < output_reserve);
        }
    }
}
