//! Unified error types for the Sentinel AMM engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Every mutating entry point of [`GuardedPool`](crate::pool::GuardedPool)
//! is atomic: when it returns an error, reserves, share balances, trader
//! activity and the strategy registry are exactly as they were before the
//! call.
//!
//! # Taxonomy
//!
//! [`AmmError::category`] sorts every variant into an [`ErrorCategory`]:
//!
//! | Category | Variants | Caller reaction |
//! |----------|----------|-----------------|
//! | [`Input`](ErrorCategory::Input) | `DeadlineExpired`, `SlippageExceeded`, `TradeTooSmall`, `RatioMismatch`, `InsufficientShares`, ... | fix the request |
//! | [`Guard`](ErrorCategory::Guard) | `CooldownActive`, `TooManyTradesInPeriod`, `PriceImpactTooHigh`, `Reentrancy`, `FlashLoanInProgress` | retry later or smaller |
//! | [`Authorization`](ErrorCategory::Authorization) | `StrategyNotApproved`, `NotAuthorized` | none |
//! | [`Settlement`](ErrorCategory::Settlement) | `RepaymentShortfall`, `InsufficientLiquidity`, `BorrowerFailed` | none |
//! | [`Arithmetic`](ErrorCategory::Arithmetic) | `Overflow`, `Underflow`, `DivisionByZero`, `ZeroReserve` | none |
//! | [`Collaborator`](ErrorCategory::Collaborator) | `TransferFailed` | none |

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every failure the engine can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    // -- input errors -------------------------------------------------------
    /// The block timestamp is past the caller-supplied deadline.
    #[error("deadline expired: now {now}, deadline {deadline}")]
    DeadlineExpired {
        /// Current block timestamp.
        now: u64,
        /// Deadline supplied by the caller.
        deadline: u64,
    },

    /// The quoted output is below the caller's minimum.
    #[error("slippage exceeded: got {got}, need {min}")]
    SlippageExceeded {
        /// Output the swap would deliver.
        got: u128,
        /// Minimum output requested.
        min: u128,
    },

    /// The input is below the dust floor.
    #[error("trade too small: {amount} below minimum {minimum}")]
    TradeTooSmall {
        /// Requested input.
        amount: u128,
        /// Configured floor.
        minimum: u128,
    },

    /// Deposit amounts do not match the pool ratio.
    #[error("deposit ratio mismatch: expected paired amount {expected}, got {got}")]
    RatioMismatch {
        /// Paired amount computed from the pool ratio.
        expected: u128,
        /// Paired amount supplied by the caller.
        got: u128,
    },

    /// Withdrawal exceeds the caller's share balance.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller tried to burn.
        requested: u128,
        /// Shares the caller owns.
        available: u128,
    },

    /// A quantity parameter is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A token does not belong to this pool.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// An identity parameter is the zero address.
    #[error("zero address not allowed")]
    ZeroAddress,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A serialized configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    // -- guard rejections ---------------------------------------------------
    /// The call is nested inside another in-progress call on this pool.
    #[error("no re-entrancy")]
    Reentrancy,

    /// A flash loan on this pool is still in flight.
    #[error("flash loan in progress")]
    FlashLoanInProgress,

    /// The trader traded too recently.
    #[error("trade cooldown active: {remaining} block(s) remaining")]
    CooldownActive {
        /// Blocks until the trader may trade again.
        remaining: u64,
    },

    /// The trader exhausted the rolling-window allowance.
    #[error("too many trades in period: {count} of {max} used")]
    TooManyTradesInPeriod {
        /// Trades already accepted in the current window.
        count: u32,
        /// Allowed trades per window.
        max: u32,
    },

    /// The input is too large relative to the input-side reserve.
    #[error("price impact too high: {impact_bps}bp exceeds {max_bps}bp")]
    PriceImpactTooHigh {
        /// Impact of the requested trade, in basis points (rounded up).
        impact_bps: u128,
        /// Configured maximum.
        max_bps: u32,
    },

    // -- authorization ------------------------------------------------------
    /// The borrower is not in the strategy registry.
    #[error("strategy not approved")]
    StrategyNotApproved,

    /// The caller lacks the registrar role.
    #[error("not authorized")]
    NotAuthorized,

    // -- settlement ---------------------------------------------------------
    /// The borrower returned less than principal plus fee, or the pool
    /// ended the loan holding less of the other token than its reserve.
    #[error("repayment shortfall: owed {owed}, repaid {repaid}")]
    RepaymentShortfall {
        /// Principal plus fee; for the other token, its reserve.
        owed: u128,
        /// Net balance increase observed after the callback; for the other
        /// token, the pool's balance.
        repaid: u128,
    },

    /// The pool cannot satisfy the request from its reserves.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The borrower callback reported a failure.
    #[error("borrower callback failed: {0}")]
    BorrowerFailed(String),

    // -- arithmetic ---------------------------------------------------------
    /// An intermediate value exceeded its representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A subtraction would have gone below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A reserve required for pricing is empty.
    #[error("zero reserve")]
    ZeroReserve,

    // -- collaborators ------------------------------------------------------
    /// The token capability refused a transfer.
    #[error("token transfer failed: {0}")]
    TransferFailed(&'static str),
}

/// Broad classification of an [`AmmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request itself is malformed or unsatisfiable.
    Input,
    /// The anti-manipulation guard rejected the request.
    Guard,
    /// The caller lacks a required permission.
    Authorization,
    /// A flash loan could not be issued or settled.
    Settlement,
    /// Checked arithmetic failed closed.
    Arithmetic,
    /// An external collaborator misbehaved.
    Collaborator,
}

impl AmmError {
    /// Returns the category this error belongs to.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::DeadlineExpired { .. }
            | Self::SlippageExceeded { .. }
            | Self::TradeTooSmall { .. }
            | Self::RatioMismatch { .. }
            | Self::InsufficientShares { .. }
            | Self::InvalidQuantity(_)
            | Self::InvalidToken(_)
            | Self::ZeroAddress
            | Self::InvalidConfiguration(_)
            | Self::ConfigParse(_) => ErrorCategory::Input,
            Self::Reentrancy
            | Self::FlashLoanInProgress
            | Self::CooldownActive { .. }
            | Self::TooManyTradesInPeriod { .. }
            | Self::PriceImpactTooHigh { .. } => ErrorCategory::Guard,
            Self::StrategyNotApproved | Self::NotAuthorized => ErrorCategory::Authorization,
            Self::RepaymentShortfall { .. }
            | Self::InsufficientLiquidity
            | Self::BorrowerFailed(_) => ErrorCategory::Settlement,
            Self::Overflow(_) | Self::Underflow(_) | Self::DivisionByZero | Self::ZeroReserve => {
                ErrorCategory::Arithmetic
            }
            Self::TransferFailed(_) => ErrorCategory::Collaborator,
        }
    }

    /// Returns `true` if the same request may succeed later without change
    /// (cooldown, window) or with a smaller amount (price impact).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CooldownActive { .. }
                | Self::TooManyTradesInPeriod { .. }
                | Self::PriceImpactTooHigh { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reentrancy_message_matches_guard_wording() {
        assert_eq!(AmmError::Reentrancy.to_string(), "no re-entrancy");
    }

    #[test]
    fn structured_messages_carry_fields() {
        let err = AmmError::SlippageExceeded { got: 9, min: 10 };
        assert_eq!(err.to_string(), "slippage exceeded: got 9, need 10");

        let err = AmmError::CooldownActive { remaining: 1 };
        assert!(err.to_string().contains("1 block"));
    }

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            AmmError::TradeTooSmall {
                amount: 1,
                minimum: 2
            }
            .category(),
            ErrorCategory::Input
        );
        assert_eq!(AmmError::Reentrancy.category(), ErrorCategory::Guard);
        assert_eq!(
            AmmError::FlashLoanInProgress.category(),
            ErrorCategory::Guard
        );
        assert_eq!(
            AmmError::NotAuthorized.category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            AmmError::RepaymentShortfall { owed: 2, repaid: 1 }.category(),
            ErrorCategory::Settlement
        );
        assert_eq!(
            AmmError::InsufficientLiquidity.category(),
            ErrorCategory::Settlement
        );
        assert_eq!(
            AmmError::Overflow("x").category(),
            ErrorCategory::Arithmetic
        );
        assert_eq!(
            AmmError::TransferFailed("x").category(),
            ErrorCategory::Collaborator
        );
    }

    #[test]
    fn only_time_or_size_bound_guards_are_retryable() {
        assert!(AmmError::CooldownActive { remaining: 1 }.is_retryable());
        assert!(AmmError::TooManyTradesInPeriod { count: 50, max: 50 }.is_retryable());
        assert!(AmmError::PriceImpactTooHigh {
            impact_bps: 600,
            max_bps: 500
        }
        .is_retryable());
        assert!(!AmmError::Reentrancy.is_retryable());
        assert!(!AmmError::StrategyNotApproved.is_retryable());
        assert!(!AmmError::DeadlineExpired {
            now: 2,
            deadline: 1
        }
        .is_retryable());
    }
}
