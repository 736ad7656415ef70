//! Debt switch targets and amounts

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use switchkit_common::{BorrowPosition, RateMode, ReserveSnapshot, Result};

use crate::eligibility::TargetCapacity;

/// Reserves the source borrow can be switched into
///
/// Excludes the source itself, reserves without liquidity, and reserves the
/// user cannot borrow. The discounted asset is listed first; the rest keep
/// their order.
pub fn switch_targets<'a>(
    reserves: &'a [ReserveSnapshot],
    source_asset: &str,
    discounted_symbol: &str,
) -> Vec<&'a ReserveSnapshot> {
    let (mut targets, rest): (Vec<_>, Vec<_>) = reserves
        .iter()
        .filter(|r| {
            r.underlying_asset != source_asset && !r.available_liquidity.is_zero() && r.borrowable_by_user
        })
        .partition(|r| r.symbol == discounted_symbol);

    targets.extend(rest);
    targets
}

/// Capacity model for a target reserve
///
/// The discounted asset is bounded by the facility's remaining capacity;
/// every other reserve by its liquidity and borrow cap.
pub fn target_capacity(reserve: &ReserveSnapshot, facility_remaining: Decimal, discounted_symbol: &str) -> TargetCapacity {
    if reserve.symbol == discounted_symbol {
        TargetCapacity::Facility {
            remaining_capacity: facility_remaining,
        }
    } else {
        TargetCapacity::Pool {
            available_liquidity: reserve.available_liquidity,
            borrow_cap: reserve.borrow_cap,
            total_debt: reserve.total_debt,
        }
    }
}

/// Amount the user asked to switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchAmount {
    /// The whole borrow balance
    Max,
    Exact(Decimal),
}

impl SwitchAmount {
    pub fn is_max(&self) -> bool {
        matches!(self, SwitchAmount::Max)
    }

    /// Amount in human units of the source asset
    pub fn resolve(&self, position: &BorrowPosition) -> Result<Decimal> {
        match *self {
            SwitchAmount::Max => position.principal.to_decimal(),
            SwitchAmount::Exact(amount) => Ok(amount),
        }
    }
}

/// Whether the switch changes the kind of rate the user pays
///
/// Leaving a stable borrow, or moving into or out of the discounted asset,
/// lands on a different rate model than the source.
pub fn shows_rate_mode_change(
    source_mode: RateMode,
    source_symbol: &str,
    target_symbol: &str,
    discounted_symbol: &str,
) -> bool {
    source_mode == RateMode::Stable || source_symbol == discounted_symbol || target_symbol == discounted_symbol
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use switchkit_common::Amount;

    fn reserve(asset: &str, symbol: &str, liquidity: Decimal) -> ReserveSnapshot {
        ReserveSnapshot::new(asset, symbol, 18, dec!(1)).with_liquidity(liquidity)
    }

    #[test]
    fn test_switch_targets_filter_and_order() {
        let reserves = vec![
            reserve("0xdai", "DAI", dec!(100)),
            reserve("0xusdc", "USDC", dec!(0)),
            reserve("0xweth", "WETH", dec!(5)),
            reserve("0xwbtc", "WBTC", dec!(1)).with_borrowable(false),
            reserve("0xgho", "GHO", dec!(1000)),
            reserve("0xlink", "LINK", dec!(50)),
        ];

        let targets = switch_targets(&reserves, "0xdai", "GHO");
        let symbols: Vec<&str> = targets.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["GHO", "WETH", "LINK"]);
    }

    #[test]
    fn test_switch_targets_without_discounted_asset() {
        let reserves = vec![reserve("0xdai", "DAI", dec!(100)), reserve("0xweth", "WETH", dec!(5))];
        let targets = switch_targets(&reserves, "0xweth", "GHO");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].symbol, "DAI");
    }

    #[test]
    fn test_target_capacity() {
        let gho = reserve("0xgho", "GHO", dec!(1000)).with_borrow_cap(dec!(10), dec!(10));
        assert_eq!(
            target_capacity(&gho, dec!(250), "GHO"),
            TargetCapacity::Facility {
                remaining_capacity: dec!(250)
            }
        );

        let weth = reserve("0xweth", "WETH", dec!(5)).with_borrow_cap(dec!(100), dec!(97));
        assert_eq!(target_capacity(&weth, dec!(250), "GHO").effective_liquidity(), dec!(3));
    }

    #[test]
    fn test_resolve_switch_amount() {
        let position = BorrowPosition::variable(Amount::from_raw(1_250_000, 6));
        assert_eq!(SwitchAmount::Max.resolve(&position).unwrap(), dec!(1.25));
        assert_eq!(SwitchAmount::Exact(dec!(0.5)).resolve(&position).unwrap(), dec!(0.5));
        assert!(SwitchAmount::Max.is_max());
    }

    #[test]
    fn test_rate_mode_change() {
        assert!(shows_rate_mode_change(RateMode::Stable, "DAI", "WETH", "GHO"));
        assert!(shows_rate_mode_change(RateMode::Variable, "GHO", "WETH", "GHO"));
        assert!(shows_rate_mode_change(RateMode::Variable, "DAI", "GHO", "GHO"));
        assert!(!shows_rate_mode_change(RateMode::Variable, "DAI", "WETH", "GHO"));
    }
}
