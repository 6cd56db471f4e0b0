//! Flash-loan settlement.
//!
//! A loan runs entirely inside one envelope:
//!
//! 1. the borrower must be in the strategy registry;
//! 2. the principal is sent from the pool address to the borrower;
//! 3. the borrower callback runs with the pool still locked, holding a
//!    [`BorrowerAccount`] that can only debit the borrower;
//! 4. the pool balance of the lent token must have grown back by at least
//!    `principal + fee` since disbursement;
//! 5. the pool must still hold both reserves in full.
//!
//! Anything above the pre-loan balance is credited to the reserve, so the
//! fee accrues to liquidity providers through the invariant. Any failure
//! rolls back every effect of the callback and leaves a single
//! `Reverted` event in the audit log.

use super::{BorrowerAccount, GuardedPool};
use crate::domain::{Address, Amount, CallContext, Rounding};
use crate::error::AmmError;
use crate::events::{FlashLoanOutcome, PoolEvent};
use crate::flash::{FlashLoanReceipt, FlashLoanTerms};
use crate::math::CheckedArithmetic;
use crate::traits::{FlashBorrower, TokenLedger};

impl<L: TokenLedger> GuardedPool<L> {
    /// Fee charged on a loan of `amount`, rounded up.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the fee does not fit.
    pub fn flash_fee(&self, amount: Amount) -> Result<Amount, AmmError> {
        self.config.flash_loan_fee().apply(amount, Rounding::Up)
    }

    /// Largest loan available in `token`: its whole reserve, or zero for a
    /// token outside the pair.
    #[must_use]
    pub fn max_flash_loan(&self, token: &Address) -> Amount {
        self.config
            .token_pair()
            .side_of(token)
            .map_or(Amount::ZERO, |side| self.state.ledger.reserve(side))
    }

    /// Lends `amount` of `token` to `borrower` for the duration of its
    /// [`FlashBorrower::on_flash_loan`] callback.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if called from inside another entry point.
    /// - [`AmmError::FlashLoanInProgress`] if a loan is already in flight.
    /// - [`AmmError::StrategyNotApproved`] if the borrower is not registered.
    /// - [`AmmError::InvalidToken`] if `token` is not in the pair.
    /// - [`AmmError::InvalidQuantity`] if `amount` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `amount` exceeds the reserve.
    /// - [`AmmError::RepaymentShortfall`] if less than `principal + fee`
    ///   came back, or the pool's balance of either token ended below its
    ///   reserve.
    /// - Any error returned by the borrower callback, unchanged.
    pub fn flash_loan(
        &mut self,
        ctx: &CallContext,
        token: Address,
        amount: Amount,
        borrower: &mut dyn FlashBorrower<L>,
        data: &[u8],
    ) -> Result<FlashLoanReceipt, AmmError> {
        if self.lock.is_engaged() {
            return Err(AmmError::Reentrancy);
        }
        if self.session.is_active() {
            return Err(AmmError::FlashLoanInProgress);
        }

        let borrower_addr = borrower.address();
        let result = self.atomic("flash_loan", |pool| {
            let outcome = pool.run_flash_loan(token, amount, borrower, data);
            if outcome.is_err() {
                pool.session.revert();
            }
            outcome
        });
        self.session.reset();

        match result {
            Ok(receipt) => {
                tracing::info!(
                    initiator = %ctx.caller,
                    borrower = %borrower_addr,
                    %token,
                    principal = %receipt.terms.principal(),
                    fee = %receipt.terms.fee(),
                    retained = %receipt.retained,
                    "flash loan settled"
                );
                Ok(receipt)
            }
            Err(e) => {
                let fee = self.flash_fee(amount).unwrap_or(Amount::ZERO);
                self.emit(PoolEvent::FlashLoan {
                    borrower: borrower_addr,
                    token,
                    amount,
                    fee,
                    outcome: FlashLoanOutcome::Reverted {
                        reason: e.to_string(),
                    },
                });
                tracing::warn!(
                    initiator = %ctx.caller,
                    borrower = %borrower_addr,
                    %token,
                    %amount,
                    error = %e,
                    "flash loan reverted"
                );
                Err(e)
            }
        }
    }

    fn run_flash_loan(
        &mut self,
        token: Address,
        amount: Amount,
        borrower: &mut dyn FlashBorrower<L>,
        data: &[u8],
    ) -> Result<FlashLoanReceipt, AmmError> {
        let borrower_addr = borrower.address();
        if !self.state.registry.is_approved(&borrower_addr) {
            return Err(AmmError::StrategyNotApproved);
        }
        let Some(side) = self.config.token_pair().side_of(&token) else {
            return Err(AmmError::InvalidToken("token is not part of this pool"));
        };
        if amount.is_zero() {
            return Err(AmmError::InvalidQuantity("flash loan amount must be positive"));
        }
        if amount > self.state.ledger.reserve(side) {
            return Err(AmmError::InsufficientLiquidity);
        }

        let fee = self.flash_fee(amount)?;
        let terms = FlashLoanTerms::new(borrower_addr, token, side, amount, fee)?;
        self.session.issue(terms)?;

        let pool_addr = self.pool_address();
        let balance_before = self.tokens.balance_of(&token, &pool_addr);
        self.tokens.transfer(&token, &pool_addr, &borrower_addr, amount)?;

        self.session.borrower_executing();
        borrower.on_flash_loan(&mut BorrowerAccount::new(self, borrower_addr), &terms, data)?;

        self.session.verifying();
        let balance_after = self.tokens.balance_of(&token, &pool_addr);
        let required = balance_before.safe_add(&fee)?;
        let disbursed = balance_before.safe_sub(&amount)?;
        let repaid = balance_after.saturating_sub(&disbursed);
        if balance_after < required {
            return Err(AmmError::RepaymentShortfall {
                owed: terms.amount_owed().get(),
                repaid: repaid.get(),
            });
        }

        let retained = balance_after.safe_sub(&balance_before)?;
        self.state.ledger.credit(side, retained)?;
        self.ensure_backed()?;
        self.session.settle();
        self.emit(PoolEvent::FlashLoan {
            borrower: borrower_addr,
            token,
            amount,
            fee,
            outcome: FlashLoanOutcome::Settled,
        });
        Ok(FlashLoanReceipt {
            terms,
            repaid,
            retained,
        })
    }
}
