//! # Switchkit Quote
//!
//! Rate, price impact, and slippage computation for aggregator quotes.
//!
//! ## Formulas
//!
//! ```text
//! rate          = dest / src            (normalised amounts)
//! price impact  = (dest_usd - src_usd) / src_usd
//! min received  = dest * (1 - slippage),  slippage in [0, 1)
//! ```
//!
//! A zero divisor means "rate unavailable": [`RateComputer::for_quote`]
//! reports it as `None` so the caller can hide the figure.

pub mod rate;
pub mod slippage;
pub mod token_switch;

pub use rate::{QuoteRates, RateComputer};
pub use slippage::{MinimumReceived, SlippageAdjuster};
pub use token_switch::{SwitchableReserve, TokenPair, TokenSwitchSummary};
