//! Thread-safe handle to one pool
//!
//! A single `parking_lot::RwLock` guards the whole [`Pool`]. Operations take
//! the write lock for their full validate-settle-commit sequence, so they are
//! linearizable. Quotes copy the reserves under a read lock and compute on the
//! snapshot after releasing it.

use crate::pool::{
    AddLiquidityReceipt, AddLiquidityRequest, Pool, RemoveLiquidityReceipt,
    RemoveLiquidityRequest, SwapReceipt, SwapRequest,
};
use crate::pool_traits::{PoolLedger, ReserveOracle};
use crate::pricing::{PricingEngine, Price, Quote};
use parking_lot::RwLock;
use std::sync::Arc;
use types::{AccountId, Asset, FeeSchedule, ReservePair, Result, SwapDirection, TokenAmount};

pub struct SharedPool<L> {
    inner: Arc<RwLock<Pool<L>>>,
}

impl<L> Clone for SharedPool<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: PoolLedger> SharedPool<L> {
    pub fn new(pool: Pool<L>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(pool)),
        }
    }

    fn snapshot(&self) -> (ReservePair, FeeSchedule) {
        let pool = self.inner.read();
        (pool.reserves(), pool.fee())
    }

    pub fn quote_swap(&self, input_amount: TokenAmount, direction: SwapDirection) -> Result<Quote> {
        let (reserves, fee) = self.snapshot();
        PricingEngine::quote_swap(input_amount, direction, &reserves, &fee)
    }

    pub fn quote_add(&self, base_amount: TokenAmount, token_amount: TokenAmount) -> Result<Quote> {
        let (reserves, _) = self.snapshot();
        PricingEngine::quote_add(base_amount, token_amount, &reserves)
    }

    pub fn quote_remove(&self, shares: TokenAmount) -> Result<Quote> {
        let (reserves, _) = self.snapshot();
        PricingEngine::quote_remove_liquidity(shares, &reserves)
    }

    pub fn spot_price(&self, direction: SwapDirection) -> Result<Price> {
        let (reserves, _) = self.snapshot();
        PricingEngine::spot_price(&reserves, direction)
    }

    pub fn add_liquidity(&self, request: &AddLiquidityRequest) -> Result<AddLiquidityReceipt> {
        self.inner.write().add_liquidity(request)
    }

    pub fn remove_liquidity(
        &self,
        request: &RemoveLiquidityRequest,
    ) -> Result<RemoveLiquidityReceipt> {
        self.inner.write().remove_liquidity(request)
    }

    pub fn swap(&self, request: &SwapRequest) -> Result<SwapReceipt> {
        self.inner.write().swap(request)
    }

    pub fn balance(&self, account: &AccountId, asset: Asset) -> TokenAmount {
        self.inner.read().ledger().balance(account, asset)
    }

    /// Run `f` with exclusive access to the ledger, e.g. to fund accounts
    pub fn with_ledger_mut<R>(&self, f: impl FnOnce(&mut L) -> R) -> R {
        f(self.inner.write().ledger_mut())
    }

    /// Run `f` with shared access to the ledger
    pub fn with_ledger<R>(&self, f: impl FnOnce(&L) -> R) -> R {
        f(self.inner.read().ledger())
    }
}

impl<L> ReserveOracle for SharedPool<L> {
    fn reserves(&self) -> ReservePair {
        self.inner.read().reserves()
    }
}
