//! Reserve snapshots
//!
//! Read-only view of one borrowable asset market, refreshed by the data
//! provider and only read by the kernel.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One reserve at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    /// Underlying asset address, the reserve's identity
    pub underlying_asset: String,
    pub symbol: String,
    /// Token decimals
    pub decimals: u32,
    /// Liquidity that can still be borrowed (human units)
    pub available_liquidity: Decimal,
    /// Borrow cap in whole tokens; zero means uncapped
    pub borrow_cap: Decimal,
    /// Outstanding debt across all borrowers (human units)
    pub total_debt: Decimal,
    /// Oracle price in USD
    pub price_usd: Decimal,
    /// Variable borrow APY as a fraction
    pub variable_borrow_apy: Decimal,
    /// Whether the current user may borrow this asset (isolation, siloing)
    pub borrowable_by_user: bool,
}

impl ReserveSnapshot {
    /// Create a snapshot with no cap, no debt, and borrowing allowed
    pub fn new(
        underlying_asset: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u32,
        price_usd: Decimal,
    ) -> Self {
        Self {
            underlying_asset: underlying_asset.into(),
            symbol: symbol.into(),
            decimals,
            available_liquidity: Decimal::ZERO,
            borrow_cap: Decimal::ZERO,
            total_debt: Decimal::ZERO,
            price_usd,
            variable_borrow_apy: Decimal::ZERO,
            borrowable_by_user: true,
        }
    }

    /// Set available liquidity
    pub fn with_liquidity(mut self, available_liquidity: Decimal) -> Self {
        self.available_liquidity = available_liquidity;
        self
    }

    /// Set borrow cap and current total debt
    pub fn with_borrow_cap(mut self, borrow_cap: Decimal, total_debt: Decimal) -> Self {
        self.borrow_cap = borrow_cap;
        self.total_debt = total_debt;
        self
    }

    /// Set variable borrow APY
    pub fn with_variable_apy(mut self, apy: Decimal) -> Self {
        self.variable_borrow_apy = apy;
        self
    }

    /// Set whether the user may borrow this asset
    pub fn with_borrowable(mut self, borrowable: bool) -> Self {
        self.borrowable_by_user = borrowable;
        self
    }
}
