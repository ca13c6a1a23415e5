//! Account identifiers and asset selectors
//!
//! Accounts are 20-byte addresses, displayed and parsed as `0x`-prefixed hex
//! so that scenario files and logs use the same form a wallet shows.

use crate::common::errors::AmmError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 20-byte account address (wallet or pool vault)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    #[inline(always)]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Deterministic test/demo address whose last byte is `tag`
    pub const fn from_tag(tag: u8) -> Self {
        let mut bytes = [0u8; 20];
        bytes[19] = tag;
        Self(bytes)
    }

    /// Lowercase `0x`-prefixed hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmmError::InvalidAccount {
            input: s.to_string(),
        };
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|_| invalid())?;
        let array: [u8; 20] = bytes.try_into().map_err(|_| invalid())?;
        Ok(Self(array))
    }
}

impl From<[u8; 20]> for AccountId {
    #[inline(always)]
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// Serialized as the hex string, not a byte array, so scenario JSON stays readable
impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Which balance a transfer moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    /// Native coin held in the base reserve
    Base,
    /// Fungible token held in the token reserve
    Token,
    /// LP share of the pool
    Share,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Base => write!(f, "base"),
            Asset::Token => write!(f, "token"),
            Asset::Share => write!(f, "share"),
        }
    }
}

/// Which reserve receives the swap input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Base in, token out
    BaseForToken,
    /// Token in, base out
    TokenForBase,
}

impl SwapDirection {
    /// Asset the trader pays
    pub fn input_asset(self) -> Asset {
        match self {
            SwapDirection::BaseForToken => Asset::Base,
            SwapDirection::TokenForBase => Asset::Token,
        }
    }

    /// Asset the trader receives
    pub fn output_asset(self) -> Asset {
        match self {
            SwapDirection::BaseForToken => Asset::Token,
            SwapDirection::TokenForBase => Asset::Base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_hex_roundtrip() {
        let account = AccountId::from_tag(0xab);
        let text = account.to_string();
        assert_eq!(text, "0x00000000000000000000000000000000000000ab");
        assert_eq!(text.parse::<AccountId>().unwrap(), account);
    }

    #[test]
    fn test_account_rejects_wrong_length() {
        assert!("0x1234".parse::<AccountId>().is_err());
        assert!("not hex".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_account_serializes_as_string() {
        let account = AccountId::from_tag(1);
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000001\"");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn test_direction_assets() {
        assert_eq!(SwapDirection::BaseForToken.input_asset(), Asset::Base);
        assert_eq!(SwapDirection::BaseForToken.output_asset(), Asset::Token);
        assert_eq!(SwapDirection::TokenForBase.input_asset(), Asset::Token);
        assert_eq!(SwapDirection::TokenForBase.output_asset(), Asset::Base);
    }
}
