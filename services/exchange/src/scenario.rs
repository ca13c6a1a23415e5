//! Scripted exchange sessions
//!
//! A scenario funds a set of accounts and replays a list of user actions
//! against one pool, the way the web front end would issue them: each step
//! is gated on the wallet session, optionally previews a quote and passes it
//! along as the confirmed amount, then executes. Rejected steps are reported
//! and the run continues.

use crate::amounts::AmountFormat;
use crate::error::{Result, ServiceError};
use crate::session::{ChainSession, SessionGate};
use amm::{
    AddLiquidityRequest, InMemoryLedger, Pool, ReserveOracle, RemoveLiquidityRequest, ShareDelta,
    SharedPool, SwapRequest,
};
use dex_config::ExchangeConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};
use types::{AccountId, Asset, SwapDirection};

/// Address that custodies pool reserves when a scenario names none
pub const DEFAULT_VAULT: AccountId = AccountId::new([0xee; 20]);

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub vault: Option<AccountId>,
    /// Chain the wallets are connected to; defaults to the configured chain
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub accounts: Vec<FundedAccount>,
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FundedAccount {
    pub id: AccountId,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioStep {
    pub account: AccountId,
    /// Wallet connected while the step is issued; defaults to `account`
    #[serde(default)]
    pub wallet: Option<AccountId>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Quote first and execute with the quote as the confirmed amount
    #[serde(default)]
    pub confirm_quote: bool,
    #[serde(flatten)]
    pub action: StepAction,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    AddLiquidity {
        base: String,
        token: String,
    },
    RemoveLiquidity {
        shares: String,
    },
    Swap {
        direction: SwapDirection,
        amount: String,
        #[serde(default)]
        min_output: Option<String>,
    },
}

impl StepAction {
    fn name(&self) -> &'static str {
        match self {
            StepAction::AddLiquidity { .. } => "add_liquidity",
            StepAction::RemoveLiquidity { .. } => "remove_liquidity",
            StepAction::Swap { .. } => "swap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Executed {
        details: BTreeMap<&'static str, String>,
    },
    Rejected {
        error: String,
        requotable: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub account: AccountId,
    pub action: &'static str,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReserveView {
    pub base_reserve: String,
    pub token_reserve: String,
    pub lp_supply: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceView {
    pub base: String,
    pub token: String,
    pub shares: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub steps: Vec<StepReport>,
    pub reserves: ReserveView,
    pub balances: BTreeMap<String, BalanceView>,
}

impl ScenarioReport {
    pub fn rejected_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step.outcome, StepOutcome::Rejected { .. }))
            .count()
    }
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ServiceError::Scenario {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json(&text)
    }
}

/// Replays a [`Scenario`] against a fresh pool
pub struct ScenarioRunner {
    config: ExchangeConfig,
    format: AmountFormat,
}

impl ScenarioRunner {
    pub fn new(config: ExchangeConfig) -> Self {
        let format = AmountFormat::new(config.pool.decimals);
        Self { config, format }
    }

    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioReport> {
        let vault = scenario.vault.unwrap_or(DEFAULT_VAULT);
        let mut ledger = InMemoryLedger::new(vault);
        for account in &scenario.accounts {
            self.fund(&mut ledger, account)?;
        }
        let pool = SharedPool::new(Pool::new(self.config.fee_schedule()?, ledger)?);

        let default_chain = scenario.chain_id.unwrap_or(self.config.network.chain_id);
        let mut steps = Vec::with_capacity(scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            let outcome = match self.execute(&pool, step, default_chain) {
                Ok(details) => StepOutcome::Executed { details },
                Err(err) => {
                    warn!(index, action = step.action.name(), error = %err, "Step rejected");
                    StepOutcome::Rejected {
                        requotable: err.is_requotable(),
                        error: err.to_string(),
                    }
                }
            };
            steps.push(StepReport {
                index,
                account: step.account,
                action: step.action.name(),
                outcome,
            });
        }

        let report = ScenarioReport {
            steps,
            reserves: self.reserve_view(&pool),
            balances: self.balance_views(&pool, scenario),
        };
        info!(
            steps = report.steps.len(),
            rejected = report.rejected_count(),
            "Scenario complete"
        );
        Ok(report)
    }

    fn fund(&self, ledger: &mut InMemoryLedger, account: &FundedAccount) -> Result<()> {
        if let Some(base) = &account.base {
            ledger.fund(account.id, Asset::Base, self.format.parse(base)?)?;
        }
        if let Some(token) = &account.token {
            ledger.fund(account.id, Asset::Token, self.format.parse(token)?)?;
        }
        Ok(())
    }

    fn execute(
        &self,
        pool: &SharedPool<InMemoryLedger>,
        step: &ScenarioStep,
        default_chain: u64,
    ) -> Result<BTreeMap<&'static str, String>> {
        let session = ChainSession::connect(
            step.wallet.unwrap_or(step.account),
            step.chain_id.unwrap_or(default_chain),
            &self.config.network,
        );
        debug!(
            wallet = %session.wallet(),
            chain_id = session.chain_id(),
            account = %step.account,
            "Authorizing step"
        );
        session.authorize(&step.account)?;

        let fmt = &self.format;
        let mut details = BTreeMap::new();
        match &step.action {
            StepAction::AddLiquidity { base, token } => {
                let base_amount = fmt.parse(base)?;
                let token_amount = fmt.parse(token)?;
                let expected_shares = if step.confirm_quote {
                    match pool.quote_add(base_amount, token_amount)?.share_delta {
                        ShareDelta::Mint(shares) => Some(shares),
                        _ => None,
                    }
                } else {
                    None
                };
                let receipt = pool.add_liquidity(&AddLiquidityRequest {
                    provider: step.account,
                    base_amount,
                    token_amount,
                    expected_shares,
                })?;
                details.insert("base_deposited", fmt.format(receipt.base_deposited));
                details.insert("token_deposited", fmt.format(receipt.token_deposited));
                details.insert("shares_minted", fmt.format(receipt.shares_minted));
            }
            StepAction::RemoveLiquidity { shares } => {
                let shares = fmt.parse(shares)?;
                let (min_base_out, min_token_out) = if step.confirm_quote {
                    let quote = pool.quote_remove(shares)?;
                    (Some(quote.output_amount), Some(quote.counterpart_amount))
                } else {
                    (None, None)
                };
                let receipt = pool.remove_liquidity(&RemoveLiquidityRequest {
                    provider: step.account,
                    shares,
                    min_base_out,
                    min_token_out,
                })?;
                details.insert("shares_burned", fmt.format(receipt.shares_burned));
                details.insert("base_out", fmt.format(receipt.base_out));
                details.insert("token_out", fmt.format(receipt.token_out));
            }
            StepAction::Swap {
                direction,
                amount,
                min_output,
            } => {
                let input_amount = fmt.parse(amount)?;
                let min_output = match min_output {
                    Some(text) => Some(fmt.parse(text)?),
                    None if step.confirm_quote => {
                        Some(pool.quote_swap(input_amount, *direction)?.output_amount)
                    }
                    None => None,
                };
                let receipt = pool.swap(&SwapRequest {
                    trader: step.account,
                    direction: *direction,
                    input_amount,
                    min_output,
                })?;
                details.insert("input_amount", fmt.format(receipt.input_amount));
                details.insert("output_amount", fmt.format(receipt.output_amount));
            }
        }
        Ok(details)
    }

    fn reserve_view(&self, pool: &SharedPool<InMemoryLedger>) -> ReserveView {
        let reserves = pool.reserves();
        ReserveView {
            base_reserve: self.format.format(reserves.base_reserve),
            token_reserve: self.format.format(reserves.token_reserve),
            lp_supply: self.format.format(reserves.lp_supply),
        }
    }

    fn balance_views(
        &self,
        pool: &SharedPool<InMemoryLedger>,
        scenario: &Scenario,
    ) -> BTreeMap<String, BalanceView> {
        pool.with_ledger(|ledger| {
            scenario
                .accounts
                .iter()
                .map(|account| {
                    let balances = ledger.balances(&account.id);
                    (
                        account.id.to_string(),
                        BalanceView {
                            base: self.format.format(balances.base),
                            token: self.format.format(balances.token),
                            shares: self.format.format(balances.shares),
                        },
                    )
                })
                .collect()
        })
    }
}
