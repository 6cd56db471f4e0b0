//! The six standard guard checks.
//!
//! Each check is independent and side-effect free; ordering and state
//! updates belong to [`GuardChain`](super::GuardChain).

use super::{GuardCheck, GuardRequest};
use crate::domain::{Amount, BasisPoints};
use crate::error::AmmError;
use crate::math::{exceeds_price_impact, price_impact_bps};

/// Rejects a swap nested inside another call on the same pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReentrancyCheck;

impl GuardCheck for ReentrancyCheck {
    fn name(&self) -> &'static str {
        "reentrancy"
    }

    fn check(&self, request: &GuardRequest) -> Result<(), AmmError> {
        if request.nested {
            return Err(AmmError::Reentrancy);
        }
        Ok(())
    }
}

/// Rejects any swap while a flash loan on the pool is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlashLoanLockCheck;

impl GuardCheck for FlashLoanLockCheck {
    fn name(&self) -> &'static str {
        "flash_loan_lock"
    }

    fn check(&self, request: &GuardRequest) -> Result<(), AmmError> {
        if request.flash_loan_active {
            return Err(AmmError::FlashLoanInProgress);
        }
        Ok(())
    }
}

/// Rejects dust trades used to probe the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinTradeSizeCheck {
    /// Smallest accepted input, in raw units.
    pub minimum: Amount,
}

impl GuardCheck for MinTradeSizeCheck {
    fn name(&self) -> &'static str {
        "min_trade_size"
    }

    fn check(&self, request: &GuardRequest) -> Result<(), AmmError> {
        if request.amount_in < self.minimum {
            return Err(AmmError::TradeTooSmall {
                amount: request.amount_in.get(),
                minimum: self.minimum.get(),
            });
        }
        Ok(())
    }
}

/// Rejects a trader who traded less than `blocks` blocks ago.
///
/// Also covers same-block reverse trades: the second leg of a round
/// trip in one block always hits the cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownCheck {
    /// Required gap between two trades of one trader; zero disables.
    pub blocks: u64,
}

impl GuardCheck for CooldownCheck {
    fn name(&self) -> &'static str {
        "cooldown"
    }

    fn check(&self, request: &GuardRequest) -> Result<(), AmmError> {
        let Some(activity) = request.activity else {
            return Ok(());
        };
        let remaining = activity.cooldown_remaining(request.block, self.blocks);
        if remaining > 0 {
            return Err(AmmError::CooldownActive { remaining });
        }
        Ok(())
    }
}

/// Caps trades per trader inside a rolling window of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyWindowCheck {
    /// Window width in blocks.
    pub window_blocks: u64,
    /// Trades allowed per window.
    pub max_trades: u32,
}

impl GuardCheck for FrequencyWindowCheck {
    fn name(&self) -> &'static str {
        "frequency_window"
    }

    fn check(&self, request: &GuardRequest) -> Result<(), AmmError> {
        let Some(activity) = request.activity else {
            return Ok(());
        };
        let count = activity.effective_count(request.block, self.window_blocks);
        if count >= self.max_trades {
            return Err(AmmError::TooManyTradesInPeriod {
                count,
                max: self.max_trades,
            });
        }
        Ok(())
    }
}

/// Rejects inputs larger than a fraction of the input-side reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceImpactCheck {
    /// Largest accepted `amount_in / reserve_in`.
    pub max: BasisPoints,
}

impl GuardCheck for PriceImpactCheck {
    fn name(&self) -> &'static str {
        "price_impact"
    }

    fn check(&self, request: &GuardRequest) -> Result<(), AmmError> {
        if exceeds_price_impact(request.amount_in, request.reserve_in, self.max) {
            let impact_bps = price_impact_bps(request.amount_in, request.reserve_in)
                .unwrap_or(u128::MAX);
            return Err(AmmError::PriceImpactTooHigh {
                impact_bps,
                max_bps: self.max.get(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Address, BlockHeight, SwapDirection};
    use crate::guard::TraderActivity;

    fn request() -> GuardRequest {
        GuardRequest {
            trader: Address::repeat_byte(1),
            direction: SwapDirection::AToB,
            amount_in: Amount::new(5_000),
            reserve_in: Amount::new(100_000),
            block: BlockHeight::new(20),
            activity: None,
            nested: false,
            flash_loan_active: false,
        }
    }

    #[test]
    fn locks() {
        let mut req = request();
        assert!(ReentrancyCheck.check(&req).is_ok());
        assert!(FlashLoanLockCheck.check(&req).is_ok());
        req.nested = true;
        req.flash_loan_active = true;
        assert_eq!(ReentrancyCheck.check(&req), Err(AmmError::Reentrancy));
        assert_eq!(FlashLoanLockCheck.check(&req), Err(AmmError::FlashLoanInProgress));
    }

    #[test]
    fn min_trade_size_boundary() {
        let check = MinTradeSizeCheck {
            minimum: Amount::new(1_000),
        };
        let mut req = request();
        req.amount_in = Amount::new(1_000);
        assert!(check.check(&req).is_ok());
        req.amount_in = Amount::new(999);
        assert_eq!(
            check.check(&req),
            Err(AmmError::TradeTooSmall {
                amount: 999,
                minimum: 1_000
            })
        );
    }

    #[test]
    fn cooldown_only_applies_to_known_traders() {
        let check = CooldownCheck { blocks: 1 };
        let mut req = request();
        assert!(check.check(&req).is_ok());

        req.activity = Some(TraderActivity::first(BlockHeight::new(20), SwapDirection::BToA));
        assert_eq!(check.check(&req), Err(AmmError::CooldownActive { remaining: 1 }));

        req.block = BlockHeight::new(21);
        assert!(check.check(&req).is_ok());

        let disabled = CooldownCheck { blocks: 0 };
        req.block = BlockHeight::new(20);
        assert!(disabled.check(&req).is_ok());
    }

    #[test]
    fn frequency_window_cap() {
        let check = FrequencyWindowCheck {
            window_blocks: 100,
            max_trades: 50,
        };
        let mut activity = TraderActivity::first(BlockHeight::new(0), SwapDirection::AToB);
        activity.trade_count_in_window = 50;
        let mut req = request();
        req.activity = Some(activity);
        req.block = BlockHeight::new(99);
        assert_eq!(
            check.check(&req),
            Err(AmmError::TooManyTradesInPeriod { count: 50, max: 50 })
        );
        req.block = BlockHeight::new(100);
        assert!(check.check(&req).is_ok());
    }

    #[test]
    fn price_impact_cap() {
        let check = PriceImpactCheck {
            max: BasisPoints::new(500),
        };
        let mut req = request();
        assert!(check.check(&req).is_ok());
        req.amount_in = Amount::new(6_000);
        assert_eq!(
            check.check(&req),
            Err(AmmError::PriceImpactTooHigh {
                impact_bps: 600,
                max_bps: 500
            })
        );
    }
}
