//! Anti-manipulation guard.
//!
//! Before a swap touches the ledger it passes through a [`GuardChain`]:
//! an ordered list of independent [`GuardCheck`]s. The standard chain is,
//! in this exact order:
//!
//! | # | Check | Error |
//! |---|-------|-------|
//! | 1 | [`ReentrancyCheck`] | [`AmmError::Reentrancy`] |
//! | 2 | [`FlashLoanLockCheck`] | [`AmmError::FlashLoanInProgress`] |
//! | 3 | [`MinTradeSizeCheck`] | [`AmmError::TradeTooSmall`] |
//! | 4 | [`CooldownCheck`] | [`AmmError::CooldownActive`] |
//! | 5 | [`FrequencyWindowCheck`] | [`AmmError::TooManyTradesInPeriod`] |
//! | 6 | [`PriceImpactCheck`] | [`AmmError::PriceImpactTooHigh`] |
//!
//! The first failing check decides the error the caller sees. Checks are
//! pure: the chain returns the [`TraderActivity`] to store, and the pool
//! stores it only when the whole swap commits.

mod activity;
mod checks;
mod lock;

use core::fmt;

pub use activity::{TraderActivity, TraderBook};
pub use checks::{
    CooldownCheck, FlashLoanLockCheck, FrequencyWindowCheck, MinTradeSizeCheck, PriceImpactCheck,
    ReentrancyCheck,
};
pub use lock::ReentrancyLock;

use crate::config::GuardConfig;
use crate::domain::{Address, Amount, BlockHeight, SwapDirection};
use crate::error::AmmError;

/// Everything a check may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardRequest {
    /// The trader, i.e. the caller of the swap.
    pub trader: Address,
    /// Requested direction.
    pub direction: SwapDirection,
    /// Requested input.
    pub amount_in: Amount,
    /// Current reserve of the input token.
    pub reserve_in: Amount,
    /// Block the swap executes in.
    pub block: BlockHeight,
    /// The trader's stored activity, if any.
    pub activity: Option<TraderActivity>,
    /// The call is nested inside another call on the pool.
    pub nested: bool,
    /// A flash loan on the pool is in flight.
    pub flash_loan_active: bool,
}

/// One independent condition a swap must satisfy.
pub trait GuardCheck: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Accepts or rejects `request`.
    ///
    /// # Errors
    ///
    /// Returns the guard rejection this check is responsible for.
    fn check(&self, request: &GuardRequest) -> Result<(), AmmError>;
}

/// An ordered composition of [`GuardCheck`]s.
pub struct GuardChain {
    config: GuardConfig,
    checks: Vec<Box<dyn GuardCheck>>,
}

impl GuardChain {
    /// The standard six-check chain tuned by `config`.
    #[must_use]
    pub fn standard(config: GuardConfig) -> Self {
        let checks: Vec<Box<dyn GuardCheck>> = vec![
            Box::new(ReentrancyCheck),
            Box::new(FlashLoanLockCheck),
            Box::new(MinTradeSizeCheck {
                minimum: config.min_trade_amount,
            }),
            Box::new(CooldownCheck {
                blocks: config.cooldown_blocks,
            }),
            Box::new(FrequencyWindowCheck {
                window_blocks: config.window_blocks,
                max_trades: config.max_trades_per_window,
            }),
            Box::new(PriceImpactCheck {
                max: config.max_price_impact,
            }),
        ];
        Self { config, checks }
    }

    /// Appends a custom check after the standard ones.
    #[must_use]
    pub fn with_check(mut self, check: Box<dyn GuardCheck>) -> Self {
        self.checks.push(check);
        self
    }

    /// The tuning the chain was built from.
    #[must_use]
    pub const fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Check names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|c| c.name())
    }

    /// Runs every check in order and returns the activity to store if the
    /// swap commits.
    ///
    /// # Errors
    ///
    /// Returns the first rejection.
    pub fn evaluate(&self, request: &GuardRequest) -> Result<TraderActivity, AmmError> {
        for check in &self.checks {
            if let Err(e) = check.check(request) {
                tracing::warn!(
                    check = check.name(),
                    trader = %request.trader,
                    direction = %request.direction,
                    amount_in = %request.amount_in,
                    block = request.block.get(),
                    error = %e,
                    "swap rejected by guard"
                );
                return Err(e);
            }
        }
        let next = match request.activity {
            Some(prev) => prev.record(request.block, request.direction, &self.config),
            None => TraderActivity::first(request.block, request.direction),
        };
        Ok(next)
    }
}

impl fmt::Debug for GuardChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardChain")
            .field("config", &self.config)
            .field("checks", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
