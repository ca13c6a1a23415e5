//! Exchange command-line entry point
//!
//! Usage:
//!   exchange quote --base-reserve 10 --token-reserve 100 --lp-supply 10 swap --amount 1 --direction base-for-token
//!   exchange run services/exchange/demos/sepolia_session.json
//!   exchange config --dump

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dex_config::ExchangeConfig;
use exchange_service::{quote, AmountFormat, QuoteKind, Scenario, ScenarioRunner};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use types::{ReservePair, SwapDirection};

#[derive(Parser, Debug)]
#[command(name = "exchange")]
#[command(about = "Constant-product exchange: quotes and scripted sessions")]
#[command(version)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. info or amm=debug (overrides logging.level)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable JSON logging format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote an operation against the given reserves
    Quote {
        #[arg(long)]
        base_reserve: String,
        #[arg(long)]
        token_reserve: String,
        #[arg(long)]
        lp_supply: String,
        #[command(subcommand)]
        operation: QuoteOperation,
    },
    /// Replay a JSON scenario against a fresh pool
    Run {
        scenario: PathBuf,
    },
    /// Show the effective configuration
    Config {
        /// Print the configuration as TOML
        #[arg(long)]
        dump: bool,
    },
}

#[derive(Subcommand, Debug)]
enum QuoteOperation {
    Swap {
        #[arg(long)]
        amount: String,
        #[arg(long, value_enum)]
        direction: DirectionArg,
    },
    Add {
        #[arg(long)]
        base: String,
        /// Required for an empty pool; otherwise derived from the ratio
        #[arg(long)]
        token: Option<String>,
    },
    Remove {
        #[arg(long)]
        shares: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    BaseForToken,
    TokenForBase,
}

impl From<DirectionArg> for SwapDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::BaseForToken => SwapDirection::BaseForToken,
            DirectionArg::TokenForBase => SwapDirection::TokenForBase,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // the logging settings come from the config, so it loads first
    let config = ExchangeConfig::load(args.config.as_deref())?;
    init_logging(&args, &config)?;
    match &args.config {
        Some(path) => info!("Loaded exchange config: {}", path.display()),
        None => debug!("No config file given, using defaults"),
    }
    info!(
        "Exchange on {} (chain {}), fee {}/{}",
        config.network.network_name,
        config.network.chain_id,
        config.pool.fee_numerator,
        config.pool.fee_denominator
    );

    match args.command {
        Command::Quote {
            base_reserve,
            token_reserve,
            lp_supply,
            operation,
        } => run_quote(&config, &base_reserve, &token_reserve, &lp_supply, operation),
        Command::Run { scenario } => run_scenario(config, &scenario),
        Command::Config { dump } => {
            if dump {
                print!("{}", config.to_toml_string()?);
            } else {
                println!(
                    "{} (chain {}), fee {}/{}, {} decimals",
                    config.network.network_name,
                    config.network.chain_id,
                    config.pool.fee_numerator,
                    config.pool.fee_denominator,
                    config.pool.decimals
                );
            }
            Ok(())
        }
    }
}

fn run_quote(
    config: &ExchangeConfig,
    base_reserve: &str,
    token_reserve: &str,
    lp_supply: &str,
    operation: QuoteOperation,
) -> Result<()> {
    let format = AmountFormat::new(config.pool.decimals);
    let parse = |label: &str, text: &str| {
        format
            .parse(text)
            .with_context(|| format!("Invalid {}: {}", label, text))
    };

    let reserves = ReservePair::from_parts(
        parse("base reserve", base_reserve)?,
        parse("token reserve", token_reserve)?,
        parse("lp supply", lp_supply)?,
    )?;
    let kind = match operation {
        QuoteOperation::Swap { amount, direction } => QuoteKind::Swap {
            amount: parse("amount", &amount)?,
            direction: direction.into(),
        },
        QuoteOperation::Add { base, token } => QuoteKind::Add {
            base: parse("base", &base)?,
            token: token.map(|t| parse("token", &t)).transpose()?,
        },
        QuoteOperation::Remove { shares } => QuoteKind::Remove {
            shares: parse("shares", &shares)?,
        },
    };

    let view = quote(&reserves, &config.fee_schedule()?, kind, &format)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn run_scenario(config: ExchangeConfig, path: &Path) -> Result<()> {
    let scenario = Scenario::from_file(path)
        .with_context(|| format!("Failed to load scenario {}", path.display()))?;
    let report = ScenarioRunner::new(config).run(&scenario).map_err(|e| {
        error!("Scenario failed: {}", e);
        e
    })?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn init_logging(args: &Args, config: &ExchangeConfig) -> Result<()> {
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let filter = EnvFilter::try_new(&level)
        .with_context(|| format!("Invalid log level: {}", level))?;

    // stdout carries the JSON results, logs go to stderr
    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs || config.logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
