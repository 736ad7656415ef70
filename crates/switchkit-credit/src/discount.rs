//! Discounted borrow APY
//!
//! Borrowers of the discounted-facility asset pay a reduced rate on the part
//! of their balance covered by their discount capacity and the standard rate
//! on the rest. The effective rate is the balance-weighted average.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use switchkit_common::{MathError, ReserveSnapshot, Result};

/// Facility-wide rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountFacility {
    /// Variable borrow APY without discount
    pub standard_apy: Decimal,
    /// Borrow APY with the maximum discount applied
    pub discounted_apy: Decimal,
}

impl DiscountFacility {
    /// Facility rates with the reserve's variable borrow APY as the standard rate
    pub fn from_reserve(reserve: &ReserveSnapshot, discounted_apy: Decimal) -> Self {
        Self {
            standard_apy: reserve.variable_borrow_apy,
            discounted_apy,
        }
    }
}

/// One user's standing in the facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscountPosition {
    /// Current facility borrow balance
    pub borrow_balance: Decimal,
    /// Balance the user may borrow at the discounted rate
    pub available_at_discount: Decimal,
}

/// Blended APY now and after switching the maximum amount in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountApyRange {
    pub current_apy: Decimal,
    pub after_max_switch_apy: Decimal,
    /// `(current, after)`, only once the user's facility data has loaded
    pub range: Option<(Decimal, Decimal)>,
}

pub struct DiscountApyBlender;

impl DiscountApyBlender {
    /// Balance-weighted APY across the discounted and standard tranches
    ///
    /// A zero balance has a blended rate of zero.
    pub fn weighted_average_apy(
        standard_apy: Decimal,
        standard_balance: Decimal,
        discounted_capacity: Decimal,
        discounted_apy: Decimal,
    ) -> Result<Decimal> {
        if standard_balance <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let discounted_portion = standard_balance.min(discounted_capacity.max(Decimal::ZERO));
        let standard_portion = standard_balance - discounted_portion;

        let overflow = || MathError::Overflow { operation: "weighted apy" };
        discounted_portion
            .checked_mul(discounted_apy)
            .zip(standard_portion.checked_mul(standard_apy))
            .and_then(|(discounted, standard)| discounted.checked_add(standard))
            .ok_or_else(overflow)?
            .checked_div(standard_balance)
            .ok_or_else(|| overflow().into())
    }

    /// Blended APY for the user's current balance
    pub fn current_apy(facility: &DiscountFacility, position: &DiscountPosition) -> Result<Decimal> {
        Self::blended(facility, position, position.borrow_balance)
    }

    /// Current APY and the APY after switching `max_switch_amount` of the
    /// source asset into the facility
    pub fn apy_range(
        facility: &DiscountFacility,
        position: &DiscountPosition,
        source_price_usd: Decimal,
        max_switch_amount: Decimal,
        user_data_fetched: bool,
    ) -> Result<DiscountApyRange> {
        let balance_after = max_switch_amount
            .checked_mul(source_price_usd)
            .and_then(|switched| switched.checked_add(position.borrow_balance))
            .ok_or(MathError::Overflow { operation: "balance after switch" })?;

        let current_apy = Self::current_apy(facility, position)?;
        let after_max_switch_apy = Self::blended(facility, position, balance_after)?;

        Ok(DiscountApyRange {
            current_apy,
            after_max_switch_apy,
            range: user_data_fetched.then_some((current_apy, after_max_switch_apy)),
        })
    }

    fn blended(facility: &DiscountFacility, position: &DiscountPosition, balance: Decimal) -> Result<Decimal> {
        Self::weighted_average_apy(
            facility.standard_apy,
            balance,
            position.available_at_discount,
            facility.discounted_apy,
        )
    }
}
