//! Borrow positions

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Interest rate mode of a borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateMode {
    /// Rate follows pool utilization
    Variable,
    /// Rate fixed at borrow time
    Stable,
}

impl RateMode {
    /// On-chain interest rate mode code
    pub fn code(&self) -> u8 {
        match self {
            RateMode::Stable => 1,
            RateMode::Variable => 2,
        }
    }
}

impl Default for RateMode {
    fn default() -> Self {
        RateMode::Variable
    }
}

/// A user's borrow in one reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowPosition {
    /// Outstanding principal in the position's rate mode
    pub principal: Amount,
    pub rate_mode: RateMode,
}

impl BorrowPosition {
    pub fn new(principal: Amount, rate_mode: RateMode) -> Self {
        Self { principal, rate_mode }
    }

    pub fn variable(principal: Amount) -> Self {
        Self::new(principal, RateMode::Variable)
    }

    pub fn stable(principal: Amount) -> Self {
        Self::new(principal, RateMode::Stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_mode_codes() {
        assert_eq!(RateMode::Stable.code(), 1);
        assert_eq!(RateMode::Variable.code(), 2);
        assert_eq!(RateMode::default(), RateMode::Variable);
    }

    #[test]
    fn test_position_constructors() {
        let principal = Amount::from_raw(1_000_000, 6);
        assert_eq!(BorrowPosition::stable(principal).rate_mode, RateMode::Stable);
        assert_eq!(BorrowPosition::variable(principal).principal, principal);
    }
}
