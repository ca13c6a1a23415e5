//! Exchange Configuration Module
//!
//! Layered loading: compiled-in defaults, then an optional TOML file, then
//! `DEX_`-prefixed environment variables.

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use types::FeeSchedule;

/// Complete configuration of the exchange service
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ExchangeConfig {
    pub pool: PoolSettings,
    pub network: NetworkSettings,
    pub logging: LoggingSettings,
}

/// Pool economics and amount formatting
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PoolSettings {
    pub fee_numerator: u32,
    pub fee_denominator: u32,
    /// Decimal places used when converting user-facing amounts
    pub decimals: u32,
}

/// Network the session gate accepts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkSettings {
    pub chain_id: u64,
    pub network_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `amm=debug,info`
    pub level: String,
    pub json: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            fee_numerator: defaults::pool::FEE_NUMERATOR,
            fee_denominator: defaults::pool::FEE_DENOMINATOR,
            decimals: defaults::pool::DECIMALS,
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            chain_id: defaults::network::CHAIN_ID,
            network_name: defaults::network::NAME.to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: defaults::logging::JSON,
        }
    }
}

impl ExchangeConfig {
    /// Load configuration with process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration, reading overrides from `env` instead of the
    /// process environment when given
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialize default configuration")?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator(defaults::ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the core cannot operate with
    pub fn validate(&self) -> Result<()> {
        self.fee_schedule()?;
        if self.pool.decimals > defaults::pool::MAX_DECIMALS {
            bail!(
                "pool.decimals = {} exceeds the maximum of {}",
                self.pool.decimals,
                defaults::pool::MAX_DECIMALS
            );
        }
        if self.network.chain_id == 0 {
            bail!("network.chain_id must be non-zero");
        }
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        Ok(())
    }

    /// Swap fee as the core type
    pub fn fee_schedule(&self) -> Result<FeeSchedule> {
        FeeSchedule::new(self.pool.fee_numerator, self.pool.fee_denominator)
            .context("Invalid pool fee")
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}
