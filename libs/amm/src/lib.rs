//! # Exchange AMM Library - Constant-Product Pool Core
//!
//! ## Purpose
//!
//! Pricing and state transitions for a single base/token liquidity pool using
//! the constant-product rule. Quotes are exact integer functions of a reserve
//! snapshot; deposits, withdrawals and swaps are all-or-nothing and publish
//! new reserves only after the value movements have settled.
//!
//! ## Integration Points
//!
//! - **Input Sources**: operation requests from the exchange service, reserve
//!   snapshots from a [`ReserveOracle`], share balances from a [`BalanceOracle`]
//! - **Output Destinations**: one [`Settlement`] per successful operation,
//!   handed to a [`SettlementExecutor`]
//! - **Precision**: integer smallest units throughout, 256-bit intermediates
//!   for reserve products
//! - **Rounding**: every division truncates in the pool's favour
//! - **Validation**: zero amounts, short token deposits, drained reserves and
//!   stale quotes are typed errors, never silent no-ops
//!
//! ## Architecture Role
//!
//! ```text
//! request -> PricingEngine (pure) -> next ReservePair -> settle -> commit
//!                ^                                         |
//!          ReservePair snapshot                    SettlementExecutor
//! ```
//!
//! [`PricingEngine`] holds no state. [`Pool`] owns the reserves of one pool
//! and its ledger; [`SharedPool`] wraps it in a single lock for concurrent
//! callers.

pub mod ledger;
pub mod pool;
pub mod pool_traits;
pub mod pricing;
pub mod shared;

pub use ledger::{Balances, InMemoryLedger};
pub use pool::{
    AddLiquidityReceipt, AddLiquidityRequest, Pool, PoolOperations, RemoveLiquidityReceipt,
    RemoveLiquidityRequest, SwapReceipt, SwapRequest,
};
pub use pool_traits::{
    BalanceOracle, Movement, PoolLedger, ReserveOracle, Settlement, SettlementExecutor,
};
pub use pricing::{PricingEngine, Price, Quote, ShareDelta, BOOTSTRAP_SHARES_PER_BASE};
pub use shared::SharedPool;

/// Common types for AMM calculations
pub use rust_decimal::Decimal;
pub use types::{AccountId, AmmError, Asset, FeeSchedule, ReservePair, SwapDirection, TokenAmount};
