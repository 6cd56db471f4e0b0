//! Anti-manipulation guard parameters.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, BasisPoints};
use crate::error::AmmError;

/// Raw-unit floor below which a trade is treated as a probing trade.
pub const DEFAULT_MIN_TRADE_AMOUNT: u128 = 1_000;
/// Blocks a trader must wait between two trades.
pub const DEFAULT_COOLDOWN_BLOCKS: u64 = 1;
/// Width of the rolling frequency window.
pub const DEFAULT_WINDOW_BLOCKS: u64 = 100;
/// Trades allowed per trader per window.
pub const DEFAULT_MAX_TRADES_PER_WINDOW: u32 = 50;
/// Largest input allowed, relative to the input-side reserve (5%).
pub const DEFAULT_MAX_PRICE_IMPACT_BPS: u32 = 500;

/// Tuning for the guard chain evaluated before every swap.
///
/// All fields have defaults, so a partial JSON document only overrides
/// what it names.
///
/// # Validation
///
/// - `window_blocks >= 1`
/// - `max_trades_per_window >= 1`
/// - `max_price_impact` within `1..=10_000` bp
///
/// `cooldown_blocks = 0` is valid and disables the cooldown.
///
/// # Examples
///
/// ```
/// use sentinel_amm::config::GuardConfig;
///
/// let cfg = GuardConfig::from_json(r#"{ "max_trades_per_window": 10 }"#).expect("valid");
/// assert_eq!(cfg.max_trades_per_window, 10);
/// assert_eq!(cfg.window_blocks, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Smallest accepted `amount_in`, in raw units.
    pub min_trade_amount: Amount,
    /// Blocks that must separate two trades of one trader.
    pub cooldown_blocks: u64,
    /// Width of the rolling frequency window, in blocks.
    pub window_blocks: u64,
    /// Trades one trader may make inside a window.
    pub max_trades_per_window: u32,
    /// Largest `amount_in / reserve_in` accepted.
    pub max_price_impact: BasisPoints,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            min_trade_amount: Amount::new(DEFAULT_MIN_TRADE_AMOUNT),
            cooldown_blocks: DEFAULT_COOLDOWN_BLOCKS,
            window_blocks: DEFAULT_WINDOW_BLOCKS,
            max_trades_per_window: DEFAULT_MAX_TRADES_PER_WINDOW,
            max_price_impact: BasisPoints::new(DEFAULT_MAX_PRICE_IMPACT_BPS),
        }
    }
}

impl GuardConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ConfigParse`] if the document is malformed.
    /// - Any error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, AmmError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AmmError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the first
    /// violated bound.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.window_blocks == 0 {
            return Err(AmmError::InvalidConfiguration(
                "window_blocks must be at least 1",
            ));
        }
        if self.max_trades_per_window == 0 {
            return Err(AmmError::InvalidConfiguration(
                "max_trades_per_window must be at least 1",
            ));
        }
        let impact = self.max_price_impact;
        if impact == BasisPoints::ZERO || !impact.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "max_price_impact must be within 1..=10000 bp",
            ));
        }
        Ok(())
    }
}
