//! Borrower callback capability for flash loans.

use crate::domain::Address;
use crate::error::AmmError;
use crate::flash::FlashLoanTerms;
use crate::pool::BorrowerAccount;
use crate::traits::TokenLedger;

/// A strategy contract that can receive a flash loan.
///
/// [`GuardedPool::flash_loan`] transfers the principal to
/// [`address`](Self::address), then calls
/// [`on_flash_loan`](Self::on_flash_loan). Before returning, the borrower
/// must move at least `principal + fee` of the lent token back to the
/// pool with [`BorrowerAccount::repay`].
///
/// The callback only sees the pool through a [`BorrowerAccount`], whose
/// transfers debit the borrower and nobody else. Any error returned from
/// the callback, or a short repayment, voids the whole loan: every effect
/// of the callback is rolled back.
///
/// The pool stays locked during the callback, so calling a mutating
/// entry point of the same pool fails with [`AmmError::Reentrancy`].
///
/// [`GuardedPool::flash_loan`]: crate::pool::GuardedPool::flash_loan
pub trait FlashBorrower<L: TokenLedger> {
    /// The borrower's identity in the strategy registry and token ledger.
    fn address(&self) -> Address;

    /// Runs the strategy with the borrowed funds.
    ///
    /// # Errors
    ///
    /// Any error aborts the loan and is returned to the requester.
    fn on_flash_loan(
        &mut self,
        account: &mut BorrowerAccount<'_, L>,
        terms: &FlashLoanTerms,
        data: &[u8],
    ) -> Result<(), AmmError>;
}
