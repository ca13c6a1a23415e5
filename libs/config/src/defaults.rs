//! Default values for the exchange
//!
//! Grouped by the configuration section they seed.

/// Pool defaults
pub mod pool {
    /// 0.3% swap fee
    pub const FEE_NUMERATOR: u32 = 3;
    pub const FEE_DENOMINATOR: u32 = 1_000;

    /// Smallest units per whole coin, as `10^DECIMALS` (Ether-style)
    pub const DECIMALS: u32 = 18;

    /// Largest decimal scale the presentation layer can render
    pub const MAX_DECIMALS: u32 = 28;
}

/// Network defaults
pub mod network {
    /// Sepolia test network
    pub const CHAIN_ID: u64 = 11_155_111;
    pub const NAME: &str = "sepolia";
}

/// Logging defaults
pub mod logging {
    pub const LEVEL: &str = "info";
    pub const JSON: bool = false;
}

/// Prefix of environment variable overrides, e.g. `DEX_POOL__FEE_NUMERATOR`
pub const ENV_PREFIX: &str = "DEX";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";
