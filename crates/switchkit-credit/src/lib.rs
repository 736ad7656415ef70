//! # Switchkit Credit
//!
//! Debt switch eligibility and discounted borrow APY.
//!
//! ## Eligibility
//!
//! ```text
//! liquidity  = max(min(available, cap - debt), 0)   pool reserve, cap 0 = uncapped
//!            = max(remaining, 0)                    discounted facility
//! blocked    = target > liquidity
//!            | available_borrows == 0
//!            | target_usd - source_usd > available_borrows
//! ```
//!
//! ## Discounted APY
//!
//! ```text
//! apy = (min(b, cap) * discounted + (b - min(b, cap)) * standard) / b,   0 when b == 0
//! ```

pub mod discount;
pub mod eligibility;
pub mod targets;

pub use discount::{DiscountApyBlender, DiscountApyRange, DiscountFacility, DiscountPosition};
pub use eligibility::{
    debt_switch_price_impact, BlockReason, DebtSwitchEligibility, DebtSwitchInput, EligibilityResult,
    TargetCapacity,
};
pub use targets::{shows_rate_mode_change, switch_targets, target_capacity, SwitchAmount};
