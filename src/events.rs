//! Audit events emitted by committed pool operations.
//!
//! Events are appended to the pool's in-memory log as part of the same
//! all-or-nothing envelope as the state change they describe: an entry
//! point that fails leaves no event behind, except the single
//! [`PoolEvent::FlashLoan`] with a [`FlashLoanOutcome::Reverted`] outcome
//! that records a voided loan.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, BlockHeight, Shares, Timestamp};

/// How a flash loan ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashLoanOutcome {
    /// Repaid in full; the fee was retained.
    Settled,
    /// Voided; every effect was rolled back.
    Reverted {
        /// Display form of the error that voided the loan.
        reason: String,
    },
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    /// Liquidity added.
    Deposit {
        /// The liquidity provider.
        provider: Address,
        /// Token A deposited.
        amount_a: Amount,
        /// Token B deposited.
        amount_b: Amount,
        /// Shares minted.
        shares: Shares,
        /// Block of the deposit.
        block: BlockHeight,
    },
    /// Liquidity removed.
    Withdraw {
        /// The liquidity provider.
        provider: Address,
        /// Token A paid out.
        amount_a: Amount,
        /// Token B paid out.
        amount_b: Amount,
        /// Shares burned.
        shares: Shares,
        /// Block of the withdrawal.
        block: BlockHeight,
    },
    /// A swap was executed.
    Swap {
        /// The trader.
        trader: Address,
        /// Token sold to the pool.
        token_in: Address,
        /// Amount sold.
        amount_in: Amount,
        /// Token bought from the pool.
        token_out: Address,
        /// Amount bought.
        amount_out: Amount,
        /// Reserve A after the swap.
        reserve_a: Amount,
        /// Reserve B after the swap.
        reserve_b: Amount,
        /// Block timestamp of the swap.
        timestamp: Timestamp,
    },
    /// A flash loan finished.
    FlashLoan {
        /// The borrower contract.
        borrower: Address,
        /// The lent token.
        token: Address,
        /// Principal.
        amount: Amount,
        /// Fee charged.
        fee: Amount,
        /// Settled or reverted.
        outcome: FlashLoanOutcome,
    },
    /// Borrowers were added to the strategy registry.
    StrategiesApproved {
        /// Newly approved borrowers.
        strategies: Vec<Address>,
    },
    /// A borrower was removed from the strategy registry.
    StrategyRevoked {
        /// The revoked borrower.
        strategy: Address,
    },
}

impl PoolEvent {
    /// Short name of the event kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::Swap { .. } => "swap",
            Self::FlashLoan { .. } => "flash_loan",
            Self::StrategiesApproved { .. } => "strategies_approved",
            Self::StrategyRevoked { .. } => "strategy_revoked",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_tag() {
        let event = PoolEvent::FlashLoan {
            borrower: Address::repeat_byte(5),
            token: Address::repeat_byte(1),
            amount: Amount::new(100),
            fee: Amount::new(1),
            outcome: FlashLoanOutcome::Reverted {
                reason: "no re-entrancy".to_string(),
            },
        };
        let Ok(json) = serde_json::to_string(&event) else {
            panic!("expected Ok");
        };
        assert!(json.starts_with("{\"FlashLoan\""));
        assert!(json.contains("no re-entrancy"));
        assert_eq!(event.kind(), "flash_loan");
    }
}
