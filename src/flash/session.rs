//! Flash-loan state machine.
//!
//! ```text
//! Idle -> Issuing -> BorrowerExecuting -> Verifying -> Settled
//!            \              \                 \
//!             +--------------+-----------------+-> Reverted
//! ```
//!
//! `Settled` and `Reverted` are terminal for one loan; the pool resets the
//! session to `Idle` before the entry point returns on every path.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, PoolSide};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Where a flash loan is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlashLoanPhase {
    /// No loan in flight.
    #[default]
    Idle,
    /// Principal is being disbursed.
    Issuing,
    /// The borrower callback is running.
    BorrowerExecuting,
    /// Repayment is being checked.
    Verifying,
    /// Repaid in full; effects committed.
    Settled,
    /// Failed; effects discarded.
    Reverted,
}

impl FlashLoanPhase {
    /// `true` from `Issuing` through `Verifying`.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            Self::Issuing | Self::BorrowerExecuting | Self::Verifying
        )
    }
}

impl fmt::Display for FlashLoanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Issuing => "issuing",
            Self::BorrowerExecuting => "borrower_executing",
            Self::Verifying => "verifying",
            Self::Settled => "settled",
            Self::Reverted => "reverted",
        };
        f.write_str(name)
    }
}

/// What the borrower received and owes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlashLoanTerms {
    borrower: Address,
    token: Address,
    side: PoolSide,
    principal: Amount,
    fee: Amount,
    owed: Amount,
}

impl FlashLoanTerms {
    /// Creates loan terms.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `principal` is zero.
    /// - [`AmmError::Overflow`] if `principal + fee` overflows.
    pub fn new(
        borrower: Address,
        token: Address,
        side: PoolSide,
        principal: Amount,
        fee: Amount,
    ) -> Result<Self, AmmError> {
        if principal.is_zero() {
            return Err(AmmError::InvalidQuantity("flash loan principal must be positive"));
        }
        let owed = principal.safe_add(&fee)?;
        Ok(Self {
            borrower,
            token,
            side,
            principal,
            fee,
            owed,
        })
    }

    /// The borrower contract.
    #[must_use]
    pub const fn borrower(&self) -> Address {
        self.borrower
    }

    /// The lent token.
    #[must_use]
    pub const fn token(&self) -> Address {
        self.token
    }

    /// The pool side of the lent token.
    #[must_use]
    pub const fn side(&self) -> PoolSide {
        self.side
    }

    /// Amount disbursed.
    pub const fn principal(&self) -> Amount {
        self.principal
    }

    /// Fee due on top of the principal.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// `principal + fee`.
    pub const fn amount_owed(&self) -> Amount {
        self.owed
    }
}

/// Outcome of a settled flash loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlashLoanReceipt {
    /// The settled terms.
    pub terms: FlashLoanTerms,
    /// Amount returned by the borrower.
    pub repaid: Amount,
    /// Everything above the pre-loan balance, credited to the reserve.
    pub retained: Amount,
}

/// The flash-loan slot of one pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlashLoanSession {
    phase: FlashLoanPhase,
    terms: Option<FlashLoanTerms>,
}

impl FlashLoanSession {
    /// An idle session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: FlashLoanPhase::Idle,
            terms: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FlashLoanPhase {
        self.phase
    }

    /// `true` while a loan is in flight.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Terms of the loan in flight or just finished.
    #[must_use]
    pub const fn terms(&self) -> Option<FlashLoanTerms> {
        self.terms
    }

    /// `Idle -> Issuing`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::FlashLoanInProgress`] unless the session is idle.
    pub fn issue(&mut self, terms: FlashLoanTerms) -> Result<(), AmmError> {
        if self.phase != FlashLoanPhase::Idle {
            return Err(AmmError::FlashLoanInProgress);
        }
        self.terms = Some(terms);
        self.enter(FlashLoanPhase::Issuing);
        Ok(())
    }

    /// `Issuing -> BorrowerExecuting`.
    pub fn borrower_executing(&mut self) {
        self.enter(FlashLoanPhase::BorrowerExecuting);
    }

    /// `BorrowerExecuting -> Verifying`.
    pub fn verifying(&mut self) {
        self.enter(FlashLoanPhase::Verifying);
    }

    /// `Verifying -> Settled`.
    pub fn settle(&mut self) {
        self.enter(FlashLoanPhase::Settled);
    }

    /// Any phase `-> Reverted`.
    pub fn revert(&mut self) {
        self.enter(FlashLoanPhase::Reverted);
    }

    /// Back to `Idle`, dropping the terms.
    pub fn reset(&mut self) {
        self.phase = FlashLoanPhase::Idle;
        self.terms = None;
    }

    fn enter(&mut self, next: FlashLoanPhase) {
        tracing::debug!(from = %self.phase, to = %next, "flash loan phase");
        self.phase = next;
    }
}
