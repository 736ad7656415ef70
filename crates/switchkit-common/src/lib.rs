//! # Switchkit Common
//!
//! Shared types, errors, and configuration for the Switchkit quote and
//! eligibility kernel.
//!
//! ## Core Types
//!
//! - [`Amount`]: fixed-point token amount paired with its decimal scale
//! - [`Quote`]: point-in-time aggregator quote with USD valuations
//! - [`ReserveSnapshot`]: read-only view of one borrowable asset market
//! - [`BorrowPosition`]/[`RateMode`]: a user's borrow in one reserve
//!
//! ## Ambient
//!
//! - [`config`]: environment-driven configuration
//! - [`logging`]: tracing subscriber setup
//! - [`error`]: unified error type

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types at crate root
pub use config::SwitchkitConfig;
pub use error::{MathError, QuoteError, Result, SwitchkitError};
pub use types::{
    amount::Amount,
    position::{BorrowPosition, RateMode},
    quote::Quote,
    reserve::ReserveSnapshot,
};

/// Switchkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest decimal scale a normalised amount can carry
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Symbol of the discounted-facility asset
pub const DEFAULT_DISCOUNTED_SYMBOL: &str = "GHO";

/// Quiet period before an input change triggers a new quote request
pub const QUOTE_DEBOUNCE_MS: u64 = 300;
