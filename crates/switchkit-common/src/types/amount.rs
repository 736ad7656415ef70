//! Fixed-point token amounts
//!
//! On-chain amounts are integers scaled by `10^decimals`. An [`Amount`] keeps
//! the raw integer and its scale together so the two can never be separated,
//! and arithmetic only happens after normalising to a human-readable
//! [`Decimal`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MathError, QuoteError, Result};
use crate::MAX_DECIMAL_SCALE;

/// Raw token amount with its decimal scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Raw fixed-point integer (e.g. wei)
    raw: u128,
    /// Number of decimals the raw integer is scaled by
    decimals: u32,
}

impl Amount {
    /// Wrap an already-scaled raw integer
    pub const fn from_raw(raw: u128, decimals: u32) -> Self {
        Self { raw, decimals }
    }

    /// Zero amount at the given scale
    pub const fn zero(decimals: u32) -> Self {
        Self { raw: 0, decimals }
    }

    /// Scale a human-readable amount to raw units
    ///
    /// Fractions below one raw unit round half away from zero. Scaling runs
    /// on the raw integer, so amounts beyond the `Decimal` mantissa still fit
    /// as long as they fit a `u128`.
    pub fn from_human(value: Decimal, decimals: u32) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(QuoteError::InvalidAmount(format!("negative amount {}", value)).into());
        }

        let mantissa = u128::try_from(value.mantissa())
            .map_err(|_| QuoteError::InvalidAmount(format!("negative amount {}", value)))?;
        let scale = value.scale();

        let raw = if decimals >= scale {
            10u128
                .checked_pow(decimals - scale)
                .and_then(|factor| mantissa.checked_mul(factor))
                .ok_or(MathError::Overflow { operation: "amount scaling" })?
        } else {
            drop_digits(mantissa, scale - decimals)
        };

        Ok(Self { raw, decimals })
    }

    /// Raw fixed-point integer
    #[inline]
    pub fn raw(&self) -> u128 {
        self.raw
    }

    /// Decimal scale
    #[inline]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Normalise to a human-readable decimal (`raw / 10^decimals`)
    ///
    /// Raw values wider than the `Decimal` mantissa, or scales above 28, lose
    /// their lowest digits (rounded half away from zero) instead of failing.
    /// Only an integer part wider than the mantissa overflows.
    pub fn to_decimal(&self) -> Result<Decimal> {
        let mut dropped = self.decimals.saturating_sub(MAX_DECIMAL_SCALE);

        loop {
            let mantissa = drop_digits(self.raw, dropped);
            if mantissa <= MAX_MANTISSA {
                let mantissa = i128::try_from(mantissa)
                    .map_err(|_| MathError::Overflow { operation: "amount normalisation" })?;
                return Decimal::try_from_i128_with_scale(mantissa, self.decimals - dropped)
                    .map(|d| d.normalize())
                    .map_err(|_| MathError::Overflow { operation: "amount normalisation" }.into());
            }
            if dropped >= self.decimals {
                return Err(MathError::Overflow { operation: "amount normalisation" }.into());
            }
            dropped += 1;
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Ok(value) => write!(f, "{}", value),
            Err(_) => write!(f, "{}e-{}", self.raw, self.decimals),
        }
    }
}

/// Largest mantissa a `Decimal` can hold (96 bits)
const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// `value / 10^digits`, rounded half away from zero
fn drop_digits(value: u128, digits: u32) -> u128 {
    match 10u128.checked_pow(digits) {
        Some(divisor) => {
            let quotient = value / divisor;
            let remainder = value % divisor;
            if remainder >= divisor - remainder {
                quotient + 1
            } else {
                quotient
            }
        }
        // 10^39 exceeds every u128
        None => 0,
    }
}
