//! Switchkit configuration
//!
//! Defaults match the lending frontend: 0.1% slippage for both flows,
//! a 300ms quote debounce, and GHO as the discounted-facility asset.
//! Overrides come from `SWITCHKIT_*` environment variables (a `.env` file is
//! read first when present).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, SwitchkitError};

/// Kernel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchkitConfig {
    /// Token switch settings
    pub token_switch: TokenSwitchSettings,
    /// Debt switch settings
    pub debt_switch: DebtSwitchSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl Default for SwitchkitConfig {
    fn default() -> Self {
        Self {
            token_switch: TokenSwitchSettings::default(),
            debt_switch: DebtSwitchSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl SwitchkitConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let cfg = Self::from_lookup(|key| std::env::var(key).ok())?;
        debug!(?cfg, "Loaded Switchkit configuration");
        Ok(cfg)
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        // Token switch settings
        if let Some(val) = lookup("SWITCHKIT_TOKEN_SWITCH_SLIPPAGE") {
            cfg.token_switch.default_slippage = parse_var("SWITCHKIT_TOKEN_SWITCH_SLIPPAGE", &val)?;
        }
        if let Some(val) = lookup("SWITCHKIT_QUOTE_DEBOUNCE_MS") {
            cfg.token_switch.quote_debounce_ms = parse_var("SWITCHKIT_QUOTE_DEBOUNCE_MS", &val)?;
        }

        // Debt switch settings
        if let Some(val) = lookup("SWITCHKIT_DEBT_SWITCH_SLIPPAGE") {
            cfg.debt_switch.default_slippage = parse_var("SWITCHKIT_DEBT_SWITCH_SLIPPAGE", &val)?;
        }
        if let Some(val) = lookup("SWITCHKIT_DISCOUNTED_SYMBOL") {
            cfg.debt_switch.discounted_symbol = val;
        }

        // Logging settings
        if let Some(val) = lookup("SWITCHKIT_LOG_FILTER") {
            cfg.logging.filter = val;
        }
        if let Some(val) = lookup("SWITCHKIT_LOG_JSON") {
            cfg.logging.json = parse_var("SWITCHKIT_LOG_JSON", &val)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants serde alone cannot enforce
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        check_slippage("token_switch.default_slippage", self.token_switch.default_slippage, &mut errors);
        check_slippage("debt_switch.default_slippage", self.debt_switch.default_slippage, &mut errors);

        if self.debt_switch.discounted_symbol.trim().is_empty() {
            errors.push("debt_switch.discounted_symbol: must not be empty".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SwitchkitError::Config(format!(
                "validation failed ({} error{}): {}",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" },
                errors.join("; ")
            )))
        }
    }
}

/// Token switch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSwitchSettings {
    /// Slippage fraction preselected in the switch form
    pub default_slippage: Decimal,
    /// Debounce applied by the caller before fetching a new quote
    pub quote_debounce_ms: u64,
}

impl Default for TokenSwitchSettings {
    fn default() -> Self {
        Self {
            default_slippage: Decimal::new(1, 3),
            quote_debounce_ms: crate::QUOTE_DEBOUNCE_MS,
        }
    }
}

/// Debt switch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSwitchSettings {
    /// Slippage fraction preselected in the debt switch form
    pub default_slippage: Decimal,
    /// Symbol of the capacity-limited discounted asset
    pub discounted_symbol: String,
}

impl Default for DebtSwitchSettings {
    fn default() -> Self {
        Self {
            default_slippage: Decimal::new(1, 3),
            discounted_symbol: crate::DEFAULT_DISCOUNTED_SYMBOL.to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of compact text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "switchkit=info,warn".to_string(),
            json: false,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, val: &str) -> Result<T> {
    val.trim()
        .parse::<T>()
        .map_err(|_| SwitchkitError::Config(format!("{key}: cannot parse {val:?}")))
}

fn check_slippage(name: &str, slippage: Decimal, errors: &mut Vec<String>) {
    if slippage < Decimal::ZERO || slippage >= Decimal::ONE {
        errors.push(format!("{name}: {slippage} is outside [0, 1)"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = SwitchkitConfig::default();
        assert_eq!(cfg.token_switch.default_slippage, dec!(0.001));
        assert_eq!(cfg.token_switch.quote_debounce_ms, 300);
        assert_eq!(cfg.debt_switch.discounted_symbol, "GHO");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_source_yields_defaults() {
        let cfg = SwitchkitConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, SwitchkitConfig::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let cfg = SwitchkitConfig::from_lookup(lookup_from(&[
            ("SWITCHKIT_TOKEN_SWITCH_SLIPPAGE", "0.005"),
            ("SWITCHKIT_QUOTE_DEBOUNCE_MS", "500"),
            ("SWITCHKIT_DISCOUNTED_SYMBOL", "DSC"),
            ("SWITCHKIT_LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(cfg.token_switch.default_slippage, dec!(0.005));
        assert_eq!(cfg.token_switch.quote_debounce_ms, 500);
        assert_eq!(cfg.debt_switch.discounted_symbol, "DSC");
        assert!(cfg.logging.json);
    }

    #[test]
    fn test_unparseable_value() {
        let err = SwitchkitConfig::from_lookup(lookup_from(&[("SWITCHKIT_QUOTE_DEBOUNCE_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, SwitchkitError::Config(_)));
    }

    #[test]
    fn test_slippage_out_of_range_rejected() {
        let err = SwitchkitConfig::from_lookup(lookup_from(&[
            ("SWITCHKIT_TOKEN_SWITCH_SLIPPAGE", "1"),
            ("SWITCHKIT_DEBT_SWITCH_SLIPPAGE", "-0.1"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("2 errors"));
    }

    #[test]
    fn test_empty_discounted_symbol_rejected() {
        let mut cfg = SwitchkitConfig::default();
        cfg.debt_switch.discounted_symbol = "  ".into();
        assert!(cfg.validate().is_err());
    }
}
