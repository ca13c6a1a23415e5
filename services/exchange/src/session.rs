//! Wallet session gate
//!
//! The pool core assumes every call arrives from a valid session. The service
//! checks that assumption here before forwarding an operation: the connected
//! wallet must be the account acting, on the configured chain.

use dex_config::NetworkSettings;
use thiserror::Error;
use types::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Wallet {connected} is connected but {requested} is acting")]
    WalletMismatch {
        connected: AccountId,
        requested: AccountId,
    },

    #[error("Wrong network: chain {actual} is connected, change the network to {network} (chain {expected})")]
    WrongNetwork {
        expected: u64,
        actual: u64,
        network: String,
    },
}

/// Check performed before any pool operation is attempted
pub trait SessionGate {
    fn authorize(&self, account: &AccountId) -> Result<(), SessionError>;
}

/// A wallet connected to some chain, checked against the expected network
#[derive(Debug, Clone)]
pub struct ChainSession {
    wallet: AccountId,
    chain_id: u64,
    network: NetworkSettings,
}

impl ChainSession {
    pub fn connect(wallet: AccountId, chain_id: u64, network: &NetworkSettings) -> Self {
        Self {
            wallet,
            chain_id,
            network: network.clone(),
        }
    }

    pub fn wallet(&self) -> AccountId {
        self.wallet
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl SessionGate for ChainSession {
    fn authorize(&self, account: &AccountId) -> Result<(), SessionError> {
        if self.chain_id != self.network.chain_id {
            return Err(SessionError::WrongNetwork {
                expected: self.network.chain_id,
                actual: self.chain_id,
                network: self.network.network_name.clone(),
            });
        }
        if self.wallet != *account {
            return Err(SessionError::WalletMismatch {
                connected: self.wallet,
                requested: *account,
            });
        }
        Ok(())
    }
}
