//! Error taxonomy for exchange accounting
//!
//! Every failure the pricing and pool layers can produce is a variant of
//! [`AmmError`]. All variants are recoverable: an operation that returns one
//! has not written any reserve field.

use thiserror::Error;

/// Errors produced by token arithmetic, quoting and pool operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// Checked addition or multiplication exceeded the representable range
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    /// Checked subtraction would go below zero
    #[error("Arithmetic underflow in {operation}")]
    ArithmeticUnderflow { operation: &'static str },

    /// Divisor was zero
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// An amount that must be positive was zero (or truncated to zero)
    #[error("Zero amount: {field} must be greater than zero")]
    ZeroAmount { field: &'static str },

    /// Deposit is too small to mint a single LP share
    #[error("Deposit would mint zero LP shares")]
    ZeroShareMint,

    /// Share burn exceeds the holder balance or the outstanding supply
    #[error("Insufficient shares: requested {requested}, available {available}")]
    InsufficientShares { requested: u128, available: u128 },

    /// Swap output cannot be paid from the output reserve
    #[error("Insufficient liquidity: requested {requested}, reserve holds {available}")]
    InsufficientLiquidity { requested: u128, available: u128 },

    /// Token side of a deposit is below the proportional requirement
    #[error("Insufficient token amount: pool requires {required}, provided {provided}")]
    InsufficientTokenAmount { required: u128, provided: u128 },

    /// A caller-supplied quote no longer matches what the current reserves give
    #[error("Stale quote: caller expected at least {quoted}, current reserves give {current}")]
    StaleQuote { quoted: u128, current: u128 },

    /// Fee fraction is not in `[0, 1)`
    #[error("Invalid fee {numerator}/{denominator}: numerator must be below a non-zero denominator")]
    InvalidFee { numerator: u32, denominator: u32 },

    /// Reserve triple violates the empty-iff-all-zero invariant
    #[error("Inconsistent reserves: base {base}, token {token}, lp supply {lp_supply}")]
    InconsistentReserves {
        base: u128,
        token: u128,
        lp_supply: u128,
    },

    /// Decimal string could not be converted to smallest units
    #[error("Invalid decimal amount: '{input}'")]
    InvalidDecimal { input: String },

    /// Account address is not 20 bytes of hex
    #[error("Invalid account address: '{input}'")]
    InvalidAccount { input: String },

    /// External executor rejected the settlement
    #[error("Settlement failed: {reason}")]
    SettlementFailed { reason: String },
}

impl AmmError {
    /// Helper for executor implementations
    pub fn settlement_failed(reason: impl Into<String>) -> Self {
        Self::SettlementFailed {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's quote being outdated, which a
    /// UI can resolve by re-quoting and asking the user again
    pub fn is_requotable(&self) -> bool {
        matches!(
            self,
            Self::StaleQuote { .. } | Self::InsufficientTokenAmount { .. }
        )
    }
}
