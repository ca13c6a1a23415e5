//! Collaborator interfaces the pool core settles through

use serde::Serialize;
use types::{AccountId, Asset, ReservePair, Result, TokenAmount};

/// Read-only view of a pool's current reserves
pub trait ReserveOracle {
    fn reserves(&self) -> ReservePair;
}

/// Read-only view of external balances (base, token and LP shares)
pub trait BalanceOracle {
    fn balance(&self, account: &AccountId, asset: Asset) -> TokenAmount;
}

/// Applies the value movements of one pool operation
///
/// Implementations must apply every movement of a [`Settlement`] or none of
/// them, and report the outcome before returning.
pub trait SettlementExecutor {
    fn settle(&mut self, settlement: &Settlement) -> Result<()>;
}

/// Everything a pool needs from the outside world to execute operations
pub trait PoolLedger: BalanceOracle + SettlementExecutor {}

impl<T: BalanceOracle + SettlementExecutor + ?Sized> PoolLedger for T {}

/// One value movement between an account and the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Movement {
    /// Account pays `amount` of `asset` into the pool
    Pull { asset: Asset, amount: TokenAmount },
    /// Pool pays `amount` of `asset` out to the account
    Push { asset: Asset, amount: TokenAmount },
    /// New LP shares credited to the account
    Mint { amount: TokenAmount },
    /// LP shares debited from the account and retired
    Burn { amount: TokenAmount },
}

/// The complete set of movements for one operation by one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub account: AccountId,
    pub movements: Vec<Movement>,
}

impl Settlement {
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            movements: Vec::with_capacity(3),
        }
    }

    pub fn pull(mut self, asset: Asset, amount: TokenAmount) -> Self {
        self.movements.push(Movement::Pull { asset, amount });
        self
    }

    pub fn push(mut self, asset: Asset, amount: TokenAmount) -> Self {
        self.movements.push(Movement::Push { asset, amount });
        self
    }

    pub fn mint(mut self, amount: TokenAmount) -> Self {
        self.movements.push(Movement::Mint { amount });
        self
    }

    pub fn burn(mut self, amount: TokenAmount) -> Self {
        self.movements.push(Movement::Burn { amount });
        self
    }
}
