//! The view of a pool handed to a flash-loan borrower.

use super::GuardedPool;
use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::traits::TokenLedger;

/// A borrower's access to the pool for the length of its callback.
///
/// Token movements made through the account always debit the borrower
/// itself; the pool's own balances are reachable only through repayment.
/// Entry points of the pool remain callable through
/// [`pool_mut`](Self::pool_mut), but the pool is locked, so every one of
/// them fails with [`AmmError::Reentrancy`].
pub struct BorrowerAccount<'a, L: TokenLedger> {
    pub(super) pool: &'a mut GuardedPool<L>,
    borrower: Address,
}

impl<'a, L: TokenLedger> BorrowerAccount<'a, L> {
    pub(super) fn new(pool: &'a mut GuardedPool<L>, borrower: Address) -> Self {
        Self { pool, borrower }
    }

    /// The borrower this account acts for.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.borrower
    }

    /// Read access to the pool: reserves, quotes, session phase.
    #[must_use]
    pub fn pool(&self) -> &GuardedPool<L> {
        &*self.pool
    }

    /// The pool itself, for strategies that call back into it.
    pub fn pool_mut(&mut self) -> &mut GuardedPool<L> {
        &mut *self.pool
    }

    /// The borrower's balance of `token`.
    #[must_use]
    pub fn balance_of(&self, token: &Address) -> Amount {
        self.pool.tokens.balance_of(token, &self.borrower)
    }

    /// Sends `amount` of `token` from the borrower to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] if the borrower lacks the
    /// balance.
    pub fn transfer(&mut self, token: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
        self.pool.tokens.transfer(token, &self.borrower, to, amount)
    }

    /// Sets the allowance of `spender` over the borrower's balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroAddress`] if `spender` is zero.
    pub fn approve(&mut self, token: &Address, spender: &Address, amount: Amount) -> Result<(), AmmError> {
        self.pool.tokens.approve(token, &self.borrower, spender, amount)
    }

    /// Sends `amount` of `token` back to the pool.
    ///
    /// # Errors
    ///
    /// Same as [`transfer`](Self::transfer).
    pub fn repay(&mut self, token: &Address, amount: Amount) -> Result<(), AmmError> {
        let pool_addr = self.pool.pool_address();
        self.transfer(token, &pool_addr, amount)
    }
}

impl<L: TokenLedger> core::fmt::Debug for BorrowerAccount<'_, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BorrowerAccount")
            .field("borrower", &self.borrower)
            .field("pool", &self.pool.pool_address())
            .finish()
    }
}
