//! Debt switch eligibility
//!
//! A switch repays the source borrow with a new borrow of the target asset.
//! It is blocked when the target cannot supply the quoted amount, or when the
//! user lacks the borrowing power to cover any extra USD value drawn. Both
//! conditions are reported together since both warnings are shown at once.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use switchkit_common::{MathError, Result};
use switchkit_quote::RateComputer;
use tracing::{debug, instrument};

/// Borrowable capacity of the target reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetCapacity {
    /// Regular pool reserve bounded by liquidity and borrow cap
    Pool {
        available_liquidity: Decimal,
        /// Zero means uncapped
        borrow_cap: Decimal,
        total_debt: Decimal,
    },
    /// Capacity-limited discounted facility; the borrow cap does not apply
    Facility { remaining_capacity: Decimal },
}

impl TargetCapacity {
    /// Amount of the target asset that can still be borrowed
    pub fn effective_liquidity(&self) -> Decimal {
        let ceiling = match *self {
            TargetCapacity::Pool {
                available_liquidity,
                borrow_cap,
                total_debt,
            } => {
                let cap_headroom = if borrow_cap.is_zero() {
                    Decimal::MAX
                } else {
                    // Out of range only for a negative debt (headroom above MAX)
                    // or a negative cap (headroom below zero)
                    borrow_cap.checked_sub(total_debt).unwrap_or(if total_debt.is_sign_negative() {
                        Decimal::MAX
                    } else {
                        Decimal::ZERO
                    })
                };
                available_liquidity.min(cap_headroom)
            }
            TargetCapacity::Facility { remaining_capacity } => remaining_capacity,
        };

        ceiling.max(Decimal::ZERO)
    }
}

/// Why a switch is blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    InsufficientLiquidity,
    InsufficientCollateral,
}

/// Eligibility verdict, recomputed on every input change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub blocked: bool,
    pub insufficient_liquidity: bool,
    pub insufficient_collateral: bool,
}

impl EligibilityResult {
    fn new(insufficient_liquidity: bool, insufficient_collateral: bool) -> Self {
        Self {
            blocked: insufficient_liquidity || insufficient_collateral,
            insufficient_liquidity,
            insufficient_collateral,
        }
    }

    /// First blocking reason, liquidity before collateral
    pub fn reason(&self) -> Option<BlockReason> {
        self.reasons().into_iter().next()
    }

    /// Every blocking reason that applies
    pub fn reasons(&self) -> Vec<BlockReason> {
        let mut reasons = Vec::with_capacity(2);
        if self.insufficient_liquidity {
            reasons.push(BlockReason::InsufficientLiquidity);
        }
        if self.insufficient_collateral {
            reasons.push(BlockReason::InsufficientCollateral);
        }
        reasons
    }
}

/// Snapshot of everything a debt switch evaluation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSwitchInput {
    /// Amount of the source borrow being repaid
    pub source_amount: Decimal,
    /// Quoted amount of the target asset to borrow
    pub target_amount: Decimal,
    pub source_price_usd: Decimal,
    pub target_price_usd: Decimal,
    pub target_capacity: TargetCapacity,
    /// User's remaining borrowing power in USD
    pub available_borrows_usd: Decimal,
}

impl DebtSwitchInput {
    /// USD value of the repaid source borrow
    pub fn source_usd(&self) -> Result<Decimal> {
        usd_value(self.source_amount, self.source_price_usd, "source usd value")
    }

    /// USD value of the new target borrow
    pub fn target_usd(&self) -> Result<Decimal> {
        usd_value(self.target_amount, self.target_price_usd, "target usd value")
    }

    /// Extra USD value drawn by the switch
    pub fn usd_delta(&self) -> Result<Decimal> {
        self.target_usd()?
            .checked_sub(self.source_usd()?)
            .ok_or_else(|| MathError::Overflow { operation: "usd delta" }.into())
    }

    /// Price impact with the new borrow as the destination side
    ///
    /// A larger target borrow is a positive impact: more credit is drawn to
    /// cover the source balance exactly.
    pub fn price_impact(&self) -> Result<Decimal> {
        debt_switch_price_impact(self.source_usd()?, self.target_usd()?)
    }
}

fn usd_value(amount: Decimal, price_usd: Decimal, operation: &'static str) -> Result<Decimal> {
    amount
        .checked_mul(price_usd)
        .ok_or_else(|| MathError::Overflow { operation }.into())
}

/// Debt switch price impact, positive when the target borrow is worth more
pub fn debt_switch_price_impact(source_usd: Decimal, target_usd: Decimal) -> Result<Decimal> {
    RateComputer::compute_price_impact(source_usd, target_usd)
}

pub struct DebtSwitchEligibility;

impl DebtSwitchEligibility {
    /// Evaluate a proposed switch against the current snapshot
    #[instrument(skip(input))]
    pub fn evaluate(input: &DebtSwitchInput) -> EligibilityResult {
        let available = input.target_capacity.effective_liquidity();
        let insufficient_liquidity = input.target_amount > available;

        // A USD delta too large to represent exceeds any borrowing power
        let usd_delta = input.usd_delta().ok();
        let insufficient_collateral = input.available_borrows_usd.is_zero()
            || usd_delta.map_or(true, |delta| delta > input.available_borrows_usd);

        let result = EligibilityResult::new(insufficient_liquidity, insufficient_collateral);

        debug!(
            target_amount = %input.target_amount,
            available_liquidity = %available,
            usd_delta = ?usd_delta,
            available_borrows_usd = %input.available_borrows_usd,
            blocked = result.blocked,
            "Evaluated debt switch"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(target_amount: Decimal, capacity: TargetCapacity, available_borrows_usd: Decimal) -> DebtSwitchInput {
        DebtSwitchInput {
            source_amount: target_amount,
            target_amount,
            source_price_usd: dec!(1),
            target_price_usd: dec!(1),
            target_capacity: capacity,
            available_borrows_usd,
        }
    }

    fn pool(available_liquidity: Decimal, borrow_cap: Decimal, total_debt: Decimal) -> TargetCapacity {
        TargetCapacity::Pool {
            available_liquidity,
            borrow_cap,
            total_debt,
        }
    }

    #[test]
    fn test_borrow_cap_limits_liquidity() {
        let capacity = pool(dec!(200), dec!(1000), dec!(950));
        assert_eq!(capacity.effective_liquidity(), dec!(50));

        let result = DebtSwitchEligibility::evaluate(&input(dec!(60), capacity, dec!(10_000)));
        assert!(result.blocked);
        assert!(result.insufficient_liquidity);
        assert!(!result.insufficient_collateral);
        assert_eq!(result.reason(), Some(BlockReason::InsufficientLiquidity));
    }

    #[test]
    fn test_amount_at_liquidity_is_allowed() {
        let capacity = pool(dec!(200), dec!(1000), dec!(950));
        let result = DebtSwitchEligibility::evaluate(&input(dec!(50), capacity, dec!(10_000)));
        assert!(!result.blocked);
        assert_eq!(result.reason(), None);
        assert!(result.reasons().is_empty());
    }

    #[test]
    fn test_zero_borrow_cap_is_uncapped() {
        let capacity = pool(dec!(200), Decimal::ZERO, dec!(5000));
        assert_eq!(capacity.effective_liquidity(), dec!(200));
    }

    #[test]
    fn test_debt_above_cap_clamps_to_zero() {
        let capacity = pool(dec!(200), dec!(1000), dec!(1200));
        assert_eq!(capacity.effective_liquidity(), Decimal::ZERO);
    }

    #[test]
    fn test_facility_ignores_borrow_cap() {
        let capacity = TargetCapacity::Facility {
            remaining_capacity: dec!(5000),
        };
        assert_eq!(capacity.effective_liquidity(), dec!(5000));

        let result = DebtSwitchEligibility::evaluate(&input(dec!(4000), capacity, dec!(10_000)));
        assert!(!result.insufficient_liquidity);

        let result = DebtSwitchEligibility::evaluate(&input(dec!(5001), capacity, dec!(10_000)));
        assert!(result.insufficient_liquidity);
    }

    #[test]
    fn test_zero_borrowing_power_blocks_any_amount() {
        let capacity = pool(dec!(1_000_000), Decimal::ZERO, Decimal::ZERO);
        for amount in [dec!(0), dec!(1), dec!(500)] {
            let result = DebtSwitchEligibility::evaluate(&input(amount, capacity, Decimal::ZERO));
            assert!(result.insufficient_collateral);
            assert_eq!(result.reason(), Some(BlockReason::InsufficientCollateral));
        }
    }

    #[test]
    fn test_usd_delta_above_borrowing_power() {
        let switch = DebtSwitchInput {
            source_amount: dec!(1000),
            target_amount: dec!(1020),
            source_price_usd: dec!(1),
            target_price_usd: dec!(1),
            target_capacity: pool(dec!(1_000_000), Decimal::ZERO, Decimal::ZERO),
            available_borrows_usd: dec!(15),
        };
        assert_eq!(switch.usd_delta().unwrap(), dec!(20));

        let result = DebtSwitchEligibility::evaluate(&switch);
        assert!(result.insufficient_collateral);
        assert!(!result.insufficient_liquidity);
    }

    #[test]
    fn test_both_reasons_reported() {
        let switch = DebtSwitchInput {
            source_amount: dec!(100),
            target_amount: dec!(120),
            source_price_usd: dec!(1),
            target_price_usd: dec!(1),
            target_capacity: pool(dec!(110), Decimal::ZERO, Decimal::ZERO),
            available_borrows_usd: dec!(5),
        };

        let result = DebtSwitchEligibility::evaluate(&switch);
        assert_eq!(
            result.reasons(),
            vec![BlockReason::InsufficientLiquidity, BlockReason::InsufficientCollateral]
        );
        assert_eq!(result.reason(), Some(BlockReason::InsufficientLiquidity));
    }

    #[test]
    fn test_price_impact_positive_for_larger_target_borrow() {
        let switch = DebtSwitchInput {
            source_amount: dec!(100),
            target_amount: dec!(0.05),
            source_price_usd: dec!(1),
            target_price_usd: dec!(2040),
            target_capacity: pool(dec!(10), Decimal::ZERO, Decimal::ZERO),
            available_borrows_usd: dec!(500),
        };

        assert_eq!(switch.target_usd().unwrap(), dec!(102));
        assert_eq!(switch.price_impact().unwrap(), dec!(0.02));
    }

    #[test]
    fn test_price_impact_zero_source() {
        let switch = input(Decimal::ZERO, pool(dec!(1), Decimal::ZERO, Decimal::ZERO), dec!(1));
        assert!(switch.price_impact().unwrap_err().is_unavailable());
    }

    #[test]
    fn test_unrepresentable_usd_value_blocks_on_collateral() {
        let switch = DebtSwitchInput {
            source_amount: dec!(1),
            target_amount: dec!(100_000_000_000_000_000_000),
            source_price_usd: dec!(1),
            target_price_usd: dec!(10_000_000_000),
            target_capacity: pool(Decimal::MAX, Decimal::ZERO, Decimal::ZERO),
            available_borrows_usd: dec!(1_000_000),
        };
        assert!(switch.target_usd().is_err());
        assert!(switch.price_impact().is_err());

        let result = DebtSwitchEligibility::evaluate(&switch);
        assert!(result.insufficient_collateral);
        assert!(!result.insufficient_liquidity);
        assert_eq!(result.reason(), Some(BlockReason::InsufficientCollateral));
    }

    #[test]
    fn test_extreme_cap_and_debt_do_not_overflow() {
        let negative_debt = pool(dec!(200), dec!(1000), Decimal::MIN);
        assert_eq!(negative_debt.effective_liquidity(), dec!(200));

        let negative_cap = pool(dec!(200), Decimal::MIN, dec!(1000));
        assert_eq!(negative_cap.effective_liquidity(), Decimal::ZERO);
    }
}
