//! Token switch flow helpers
//!
//! Everything the switch form derives from its inputs and the latest quote:
//! the raw request amount, display rates, minimums, the flipped input when
//! the direction is reversed, and whether submission is blocked.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use switchkit_common::{Amount, Quote, QuoteError, ReserveSnapshot, Result};
use tracing::{debug, instrument};

use crate::rate::{QuoteRates, RateComputer};
use crate::slippage::{MinimumReceived, SlippageAdjuster};

/// A reserve the user can switch from or to, with their wallet balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchableReserve {
    pub reserve: ReserveSnapshot,
    /// Wallet balance in human units
    pub balance: Decimal,
}

impl SwitchableReserve {
    pub fn new(reserve: ReserveSnapshot, balance: Decimal) -> Self {
        Self { reserve, balance }
    }

    pub fn underlying_asset(&self) -> &str {
        &self.reserve.underlying_asset
    }

    pub fn symbol(&self) -> &str {
        &self.reserve.symbol
    }
}

/// Initial input/output selection of the switch form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenPair<'a> {
    pub input: &'a SwitchableReserve,
    pub output: &'a SwitchableReserve,
}

/// Everything displayed under a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSwitchSummary {
    pub rates: QuoteRates,
    pub minimum_received: MinimumReceived,
}

/// Raw amount to request a quote for
///
/// An empty input requests a zero amount.
pub fn quote_request_amount(input: Option<Decimal>, decimals: u32) -> Result<Amount> {
    match input {
        Some(value) => Amount::from_human(value, decimals),
        None => Ok(Amount::zero(decimals)),
    }
}

/// Display rates and slippage-adjusted minimums for a quote
#[instrument(skip(quote), fields(dest_usd = %quote.dest_usd))]
pub fn summarize(quote: &Quote, slippage: Decimal) -> Result<TokenSwitchSummary> {
    let rates = RateComputer::for_quote(quote)?;
    let minimum_received = SlippageAdjuster::minimum_received_for_quote(quote, slippage)?;

    debug!(
        rate = ?rates.rate,
        price_impact = ?rates.price_impact,
        min_amount = %minimum_received.amount,
        "Summarized token switch quote"
    );

    Ok(TokenSwitchSummary {
        rates,
        minimum_received,
    })
}

/// Input amount after swapping the input and output reserves
///
/// The previous quote's destination amount becomes the new input.
pub fn flipped_input(quote: Option<&Quote>) -> Result<Decimal> {
    match quote {
        Some(quote) => quote.dest_decimal(),
        None => Ok(Decimal::ZERO),
    }
}

/// Whether the switch cannot be submitted
pub fn is_blocked(quote: Option<&Quote>, input_amount: Decimal, balance: Decimal, has_account: bool) -> bool {
    quote.is_none() || input_amount > balance || !has_account
}

/// Pick the initial input and output reserves
///
/// The discounted asset is never preselected as input unless it is the
/// default asset, and is preferred as output when it is not the input.
/// Input and output differ whenever two distinct assets are available.
pub fn default_pair<'a>(
    reserves: &'a [SwitchableReserve],
    default_asset: Option<&str>,
    discounted_symbol: &str,
) -> Result<TokenPair<'a>> {
    if reserves.len() < 2 {
        return Err(QuoteError::NotEnoughReserves {
            available: reserves.len(),
        }
        .into());
    }

    let first = &reserves[0];
    let second = &reserves[1];

    let input = default_asset
        .and_then(|asset| reserves.iter().find(|r| r.underlying_asset() == asset))
        .unwrap_or(if first.symbol() == discounted_symbol { second } else { first });

    let discounted = reserves
        .iter()
        .find(|r| r.symbol() == discounted_symbol && r.underlying_asset() != input.underlying_asset());

    let output = discounted.unwrap_or_else(|| {
        let differs = |r: &&SwitchableReserve| r.underlying_asset() != input.underlying_asset();
        reserves
            .iter()
            .filter(differs)
            .find(|r| {
                Some(r.underlying_asset()) != default_asset
                    && r.underlying_asset() != first.underlying_asset()
            })
            .or_else(|| reserves.iter().find(differs))
            .unwrap_or(second)
    });

    Ok(TokenPair { input, output })
}
