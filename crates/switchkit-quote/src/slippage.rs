//! Slippage-adjusted minimum received amounts

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use switchkit_common::{MathError, Quote, QuoteError, Result};

/// Guaranteed minimum on the destination side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumReceived {
    /// Minimum destination tokens
    pub amount: Decimal,
    /// Minimum destination USD value
    pub usd: Decimal,
}

pub struct SlippageAdjuster;

impl SlippageAdjuster {
    /// Reject slippage outside `[0, 1)`
    pub fn validate(slippage: Decimal) -> Result<()> {
        if slippage < Decimal::ZERO || slippage >= Decimal::ONE {
            return Err(QuoteError::InvalidSlippage { slippage }.into());
        }
        Ok(())
    }

    /// `dest_amount * (1 - slippage)`
    pub fn minimum_received(dest_amount: Decimal, slippage: Decimal) -> Result<Decimal> {
        Self::validate(slippage)?;
        dest_amount
            .checked_mul(Decimal::ONE - slippage)
            .ok_or_else(|| MathError::Overflow { operation: "minimum received" }.into())
    }

    /// Minimum token and USD amounts for a quote, adjusted identically
    pub fn minimum_received_for_quote(quote: &Quote, slippage: Decimal) -> Result<MinimumReceived> {
        Ok(MinimumReceived {
            amount: Self::minimum_received(quote.dest_decimal()?, slippage)?,
            usd: Self::minimum_received(quote.dest_usd, slippage)?,
        })
    }
}
