//! Aggregator quote snapshot

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use crate::error::Result;

/// Point-in-time quote from the rate provider
///
/// Superseded by the next request for the same input; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Amount sold
    pub source_amount: Amount,
    /// Amount bought
    pub dest_amount: Amount,
    /// USD value of the source side
    pub source_usd: Decimal,
    /// USD value of the destination side
    pub dest_usd: Decimal,
}

impl Quote {
    pub fn new(source_amount: Amount, dest_amount: Amount, source_usd: Decimal, dest_usd: Decimal) -> Self {
        Self {
            source_amount,
            dest_amount,
            source_usd,
            dest_usd,
        }
    }

    /// Destination amount in human-readable units
    pub fn dest_decimal(&self) -> Result<Decimal> {
        self.dest_amount.to_decimal()
    }
}
