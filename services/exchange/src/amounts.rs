//! Conversion between user-facing decimal strings and integer amounts

use types::{AmmError, TokenAmount};

/// Decimal places shared by the base coin, the token and LP shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountFormat {
    decimals: u32,
}

impl AmountFormat {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    /// `"1.5"` at 18 decimals becomes `1500000000000000000`
    pub fn parse(&self, input: &str) -> Result<TokenAmount, AmmError> {
        TokenAmount::from_decimal_str(input, self.decimals)
    }

    /// Render for display; amounts too large for a `Decimal` fall back to
    /// raw smallest units
    pub fn format(&self, amount: TokenAmount) -> String {
        match amount.to_decimal(self.decimals) {
            Ok(value) => value.to_string(),
            Err(_) => format!("{} units", amount),
        }
    }
}
