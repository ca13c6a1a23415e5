//! # Exchange Types Library
//!
//! Shared vocabulary of the constant-product exchange: token amounts, the
//! reserve state of a pool, the swap fee and the error taxonomy.
//!
//! ## Design Philosophy
//!
//! - **Integer Amounts Only**: every value is a count of smallest indivisible units
//! - **Checked Arithmetic**: overflow and underflow surface as [`AmmError`], never wrap
//! - **Wide Intermediates**: products of two reserves are computed in 256 bits
//! - **Clear Boundaries**: decimal strings are converted once, at the presentation edge
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{ReservePair, TokenAmount};
//!
//! let reserves = ReservePair::from_parts(
//!     TokenAmount::new(1_000),
//!     TokenAmount::new(2_000),
//!     TokenAmount::new(1_000),
//! )
//! .unwrap();
//! assert!(!reserves.is_empty());
//!
//! let deposit = TokenAmount::from_decimal_str("0.5", 18).unwrap();
//! assert_eq!(deposit.raw(), 500_000_000_000_000_000);
//! ```

pub mod common;
pub mod fee;
pub mod reserves;

pub use common::errors::AmmError;
pub use common::fixed_point::TokenAmount;
pub use common::identifiers::{AccountId, Asset, SwapDirection};
pub use common::wide::{mul_div_floor, U256};
pub use fee::FeeSchedule;
pub use reserves::ReservePair;

/// Result alias used throughout the exchange crates
pub type Result<T> = std::result::Result<T, AmmError>;
