//! # Exchange Configuration
//!
//! Configuration management and defaults for the exchange service.
//!
//! ## Features
//!
//! - **Pool Settings**: swap fee fraction and display decimals
//! - **Network Settings**: chain the session gate accepts
//! - **Layered Loading**: defaults, TOML file, `DEX_` environment overrides
//!
//! ## Usage
//!
//! ```rust
//! use dex_config::ExchangeConfig;
//!
//! let config = ExchangeConfig::default();
//! let fee = config.fee_schedule().unwrap();
//! assert_eq!((fee.numerator, fee.denominator), (3, 1_000));
//! ```

pub mod defaults;
pub mod exchange_config;

pub use exchange_config::{ExchangeConfig, LoggingSettings, NetworkSettings, PoolSettings};
