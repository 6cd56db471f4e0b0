//! Fungible-token capability consumed by the pool.
//!
//! The pool never keeps token balances itself; it moves tokens through a
//! [`TokenLedger`] and trusts a successful return to mean the balances
//! changed atomically. Implementations decide how tokens are stored.
//!
//! # Staging
//!
//! [`snapshot`](TokenLedger::snapshot) and [`restore`](TokenLedger::restore)
//! let the pool discard every token movement made inside a failed entry
//! point, including movements made by a flash-loan borrower.

use crate::domain::{Address, Amount};
use crate::error::AmmError;

/// Balance and allowance bookkeeping for any number of tokens.
///
/// Every method takes the token's contract address first.
///
/// # Implementors
///
/// - [`InMemoryTokenLedger`](crate::tokens::InMemoryTokenLedger), a
///   map-backed reference ledger.
pub trait TokenLedger {
    /// Saved state produced by [`snapshot`](Self::snapshot).
    type Snapshot;

    /// Balance of `owner` in `token`.
    fn balance_of(&self, token: &Address, owner: &Address) -> Amount;

    /// Amount `spender` may still move out of `owner`'s balance.
    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount;

    /// Sets the allowance of `spender` over `owner`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroAddress`] if `owner` or `spender` is zero.
    fn approve(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Moves `amount` from `from` to `to`, called by `from` itself.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] if `from` lacks the balance.
    fn transfer(
        &mut self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] if the allowance or the
    /// balance is insufficient.
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Captures the complete ledger state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Returns the ledger to a captured state.
    fn restore(&mut self, snapshot: Self::Snapshot);
}
