//! In-memory balance ledger standing in for on-chain accounts
//!
//! Holds base, token and LP share balances per account plus a vault account
//! that custodies the pool's reserves. Settlements are staged on copies of
//! the two affected accounts and written back only when every movement
//! succeeded.

use crate::pool_traits::{BalanceOracle, Movement, Settlement, SettlementExecutor};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use types::{AccountId, AmmError, Asset, Result, TokenAmount};

/// Balances of one account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Balances {
    pub base: TokenAmount,
    pub token: TokenAmount,
    pub shares: TokenAmount,
}

impl Balances {
    pub fn get(&self, asset: Asset) -> TokenAmount {
        match asset {
            Asset::Base => self.base,
            Asset::Token => self.token,
            Asset::Share => self.shares,
        }
    }

    fn slot(&mut self, asset: Asset) -> &mut TokenAmount {
        match asset {
            Asset::Base => &mut self.base,
            Asset::Token => &mut self.token,
            Asset::Share => &mut self.shares,
        }
    }

    fn credit(&mut self, asset: Asset, amount: TokenAmount) -> Result<()> {
        let slot = self.slot(asset);
        *slot = slot.checked_add(amount)?;
        Ok(())
    }

    fn debit(&mut self, owner: &AccountId, asset: Asset, amount: TokenAmount) -> Result<()> {
        let slot = self.slot(asset);
        if *slot < amount {
            return Err(AmmError::settlement_failed(format!(
                "{} holds {} {}, needs {}",
                owner, slot, asset, amount
            )));
        }
        *slot = slot.checked_sub(amount)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    vault: AccountId,
    accounts: HashMap<AccountId, Balances>,
    share_supply: TokenAmount,
    settlements: u64,
}

impl InMemoryLedger {
    /// Ledger whose pool reserves are custodied by `vault`
    pub fn new(vault: AccountId) -> Self {
        Self {
            vault,
            accounts: HashMap::new(),
            share_supply: TokenAmount::ZERO,
            settlements: 0,
        }
    }

    /// Credit an account out of thin air; shares can only be minted by a pool
    pub fn fund(&mut self, account: AccountId, asset: Asset, amount: TokenAmount) -> Result<()> {
        if asset == Asset::Share {
            return Err(AmmError::settlement_failed(
                "shares are only issued by pool deposits",
            ));
        }
        if account == self.vault {
            return Err(AmmError::settlement_failed("the vault cannot be funded directly"));
        }
        self.accounts.entry(account).or_default().credit(asset, amount)
    }

    pub fn balances(&self, account: &AccountId) -> Balances {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    /// Outstanding LP shares across all holders
    pub fn share_supply(&self) -> TokenAmount {
        self.share_supply
    }

    /// Number of settlements applied so far
    pub fn settlement_count(&self) -> u64 {
        self.settlements
    }
}

impl BalanceOracle for InMemoryLedger {
    fn balance(&self, account: &AccountId, asset: Asset) -> TokenAmount {
        self.balances(account).get(asset)
    }
}

impl SettlementExecutor for InMemoryLedger {
    fn settle(&mut self, settlement: &Settlement) -> Result<()> {
        let account = settlement.account;
        if account == self.vault {
            return Err(AmmError::settlement_failed("the vault cannot trade with itself"));
        }

        let mut holder = self.balances(&account);
        let mut vault = self.balances(&self.vault);
        let mut supply = self.share_supply;

        for movement in &settlement.movements {
            match *movement {
                Movement::Pull { asset, amount } | Movement::Push { asset, amount }
                    if asset == Asset::Share =>
                {
                    return Err(AmmError::settlement_failed(format!(
                        "cannot transfer {} shares, use mint or burn",
                        amount
                    )));
                }
                Movement::Pull { asset, amount } => {
                    holder.debit(&account, asset, amount)?;
                    vault.credit(asset, amount)?;
                }
                Movement::Push { asset, amount } => {
                    vault.debit(&self.vault, asset, amount)?;
                    holder.credit(asset, amount)?;
                }
                Movement::Mint { amount } => {
                    holder.credit(Asset::Share, amount)?;
                    supply = supply.checked_add(amount)?;
                }
                Movement::Burn { amount } => {
                    holder.debit(&account, Asset::Share, amount)?;
                    supply = supply.checked_sub(amount)?;
                }
            }
        }

        self.accounts.insert(account, holder);
        self.accounts.insert(self.vault, vault);
        self.share_supply = supply;
        self.settlements += 1;
        debug!(%account, movements = settlement.movements.len(), "Settlement applied");
        Ok(())
    }
}
