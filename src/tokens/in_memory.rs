//! Map-backed token ledger.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::TokenLedger;

type BalanceKey = (Address, Address);
type AllowanceKey = (Address, Address, Address);

/// Balances and allowances for any number of tokens, kept in memory.
///
/// Snapshots are full clones, which keeps restore trivially exact.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{Address, Amount};
/// use sentinel_amm::tokens::InMemoryTokenLedger;
/// use sentinel_amm::traits::TokenLedger;
///
/// let token = Address::repeat_byte(1);
/// let alice = Address::repeat_byte(0xA1);
/// let bob = Address::repeat_byte(0xB0);
///
/// let mut ledger = InMemoryTokenLedger::new();
/// ledger.mint(&token, &alice, Amount::new(100)).expect("mint");
/// ledger.transfer(&token, &alice, &bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(&token, &bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryTokenLedger {
    balances: BTreeMap<BalanceKey, Amount>,
    allowances: BTreeMap<AllowanceKey, Amount>,
    supplies: BTreeMap<Address, Amount>,
}

impl InMemoryTokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` new units of `token` for `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if `to` is zero.
    /// - [`AmmError::Overflow`] if the balance or supply overflows.
    pub fn mint(&mut self, token: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
        if to.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        let supply = self.total_supply(token).safe_add(&amount)?;
        let balance = self.balance_of(token, to).safe_add(&amount)?;
        self.supplies.insert(*token, supply);
        self.balances.insert((*token, *to), balance);
        Ok(())
    }

    /// Units of `token` ever minted.
    pub fn total_supply(&self, token: &Address) -> Amount {
        self.supplies.get(token).copied().unwrap_or(Amount::ZERO)
    }

    fn move_balance(
        &mut self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if to.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        let from_balance = self
            .balance_of(token, from)
            .checked_sub(&amount)
            .ok_or(AmmError::TransferFailed("insufficient balance"))?;
        self.balances.insert((*token, *from), from_balance);
        let to_balance = self.balance_of(token, to).safe_add(&amount)?;
        self.balances.insert((*token, *to), to_balance);
        Ok(())
    }
}

impl TokenLedger for InMemoryTokenLedger {
    type Snapshot = Self;

    fn balance_of(&self, token: &Address, owner: &Address) -> Amount {
        self.balances
            .get(&(*token, *owner))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*token, *owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn approve(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if owner.is_zero() || spender.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        self.allowances.insert((*token, *owner, *spender), amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.move_balance(token, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let remaining = self
            .allowance(token, from, spender)
            .checked_sub(&amount)
            .ok_or(AmmError::TransferFailed("insufficient allowance"))?;
        let before = self.clone();
        if let Err(e) = self.move_balance(token, from, to, amount) {
            *self = before;
            return Err(e);
        }
        self.allowances.insert((*token, *from, *spender), remaining);
        Ok(())
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.clone()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        *self = snapshot;
    }
}
