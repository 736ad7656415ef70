//! Exchange rate and price impact
//!
//! Rates are computed on normalised amounts, so a 6-decimal stablecoin and
//! an 18-decimal token compare in whole-token units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use switchkit_common::{Amount, MathError, Quote, Result};

/// Display rates for a quote
///
/// Each figure is `None` when its divisor is zero; the caller hides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRates {
    /// Destination tokens per source token
    pub rate: Option<Decimal>,
    /// Source tokens per destination token
    pub inverse_rate: Option<Decimal>,
    /// `(dest_usd - src_usd) / src_usd`
    pub price_impact: Option<Decimal>,
}

/// Rate computer for aggregator quotes
pub struct RateComputer;

impl RateComputer {
    /// Exchange rate between two amounts
    ///
    /// Returns `dest / src`, or `src / dest` when `invert` is set.
    pub fn compute_rate(src: &Amount, dest: &Amount, invert: bool) -> Result<Decimal> {
        let src = src.to_decimal()?;
        let dest = dest.to_decimal()?;

        let (numerator, divisor) = if invert { (src, dest) } else { (dest, src) };
        divide(numerator, divisor, "exchange rate")
    }

    /// Relative USD change from source to destination
    ///
    /// Positive means the destination side is worth more.
    pub fn compute_price_impact(src_usd: Decimal, dest_usd: Decimal) -> Result<Decimal> {
        let change = dest_usd
            .checked_sub(src_usd)
            .ok_or(MathError::Overflow { operation: "price impact" })?;
        divide(change, src_usd, "price impact")
    }

    /// All display rates for a quote
    pub fn for_quote(quote: &Quote) -> Result<QuoteRates> {
        Ok(QuoteRates {
            rate: available(Self::compute_rate(&quote.source_amount, &quote.dest_amount, false))?,
            inverse_rate: available(Self::compute_rate(&quote.source_amount, &quote.dest_amount, true))?,
            price_impact: available(Self::compute_price_impact(quote.source_usd, quote.dest_usd))?,
        })
    }
}

fn divide(numerator: Decimal, divisor: Decimal, operation: &'static str) -> Result<Decimal> {
    if divisor.is_zero() {
        return Err(MathError::DivisionByZero { operation }.into());
    }
    numerator
        .checked_div(divisor)
        .ok_or_else(|| MathError::Overflow { operation }.into())
}

/// Turn "rate unavailable" into `None`, keep every other error
fn available(result: Result<Decimal>) -> Result<Option<Decimal>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_unavailable() => Ok(None),
        Err(err) => Err(err),
    }
}
