//! One-shot quotes against reserves given on the command line

use crate::amounts::AmountFormat;
use amm::{Price, PricingEngine, Quote, ShareDelta};
use serde::Serialize;
use types::{AmmError, FeeSchedule, ReservePair, SwapDirection, TokenAmount};

/// Operation to preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Swap {
        amount: TokenAmount,
        direction: SwapDirection,
    },
    /// Without `token` the proportional requirement is quoted; an empty pool
    /// needs both amounts
    Add {
        base: TokenAmount,
        token: Option<TokenAmount>,
    },
    Remove {
        shares: TokenAmount,
    },
}

/// Quote rendered with decimal strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteView {
    pub operation: &'static str,
    pub output_amount: String,
    pub counterpart_amount: String,
    pub share_delta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_price: Option<String>,
}

pub fn quote(
    reserves: &ReservePair,
    fee: &FeeSchedule,
    kind: QuoteKind,
    format: &AmountFormat,
) -> Result<QuoteView, AmmError> {
    let (operation, quote, spot_price) = match kind {
        QuoteKind::Swap { amount, direction } => {
            let quote = PricingEngine::quote_swap(amount, direction, reserves, fee)?;
            let price = PricingEngine::spot_price(reserves, direction)?;
            ("swap", quote, Some(render_price(&price)))
        }
        QuoteKind::Add { base, token } => {
            let token = match token {
                Some(token) => token,
                None if reserves.is_empty() => {
                    return Err(AmmError::ZeroAmount {
                        field: "token amount",
                    })
                }
                None => TokenAmount::MAX,
            };
            ("add_liquidity", PricingEngine::quote_add(base, token, reserves)?, None)
        }
        QuoteKind::Remove { shares } => (
            "remove_liquidity",
            PricingEngine::quote_remove_liquidity(shares, reserves)?,
            None,
        ),
    };
    Ok(render(operation, &quote, spot_price, format))
}

/// Display price; ratios beyond `Decimal` range are shown as a raw fraction
fn render_price(price: &Price) -> String {
    match price.to_decimal() {
        Ok(value) => value.round_dp(12).normalize().to_string(),
        Err(_) => format!("{}/{}", price.numerator, price.denominator),
    }
}

fn render(
    operation: &'static str,
    quote: &Quote,
    spot_price: Option<String>,
    format: &AmountFormat,
) -> QuoteView {
    let share_delta = match quote.share_delta {
        ShareDelta::Mint(shares) => format!("mint {}", format.format(shares)),
        ShareDelta::Burn(shares) => format!("burn {}", format.format(shares)),
        ShareDelta::Unchanged => "unchanged".to_string(),
    };
    QuoteView {
        operation,
        output_amount: format.format(quote.output_amount),
        counterpart_amount: format.format(quote.counterpart_amount),
        share_delta,
        spot_price,
    }
}
