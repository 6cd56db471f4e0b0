//! Pool configuration.
//!
//! [`EngineConfig`] carries the immutable parameters of one guarded pool;
//! [`GuardConfig`] tunes the anti-manipulation guard and can be loaded
//! from JSON.

mod engine;
mod guard;

pub use engine::{EngineConfig, DEFAULT_FLASH_LOAN_FEE_BPS, DEFAULT_INITIAL_SHARES};
pub use guard::{
    GuardConfig, DEFAULT_COOLDOWN_BLOCKS, DEFAULT_MAX_PRICE_IMPACT_BPS,
    DEFAULT_MAX_TRADES_PER_WINDOW, DEFAULT_MIN_TRADE_AMOUNT, DEFAULT_WINDOW_BLOCKS,
};
