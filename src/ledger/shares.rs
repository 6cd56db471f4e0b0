//! Share accounting: each provider's proportional claim on the reserves.

use std::collections::BTreeMap;

use crate::domain::{Address, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Share balances keyed by provider, plus the circulating total.
///
/// # Invariant
///
/// `total == Σ balances[p]` after every [`mint`](Self::mint) and
/// [`burn`](Self::burn). A provider whose balance reaches zero is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareBook {
    balances: BTreeMap<Address, Shares>,
    total: Shares,
}

impl ShareBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Circulating shares.
    #[must_use]
    pub const fn total(&self) -> Shares {
        self.total
    }

    /// Shares held by `provider`, zero if unknown.
    #[must_use]
    pub fn balance_of(&self, provider: &Address) -> Shares {
        self.balances.get(provider).copied().unwrap_or(Shares::ZERO)
    }

    /// Number of providers with a non-zero balance.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.balances.len()
    }

    /// Iterates `(provider, balance)` in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Shares)> {
        self.balances.iter()
    }

    /// Credits `shares` to `provider`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if `provider` is zero.
    /// - [`AmmError::InvalidQuantity`] if `shares` is zero.
    /// - [`AmmError::Overflow`] if a balance or the total overflows.
    pub fn mint(&mut self, provider: Address, shares: Shares) -> Result<(), AmmError> {
        if provider.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("cannot mint zero shares"));
        }
        let total = self.total.safe_add(&shares)?;
        let balance = self.balance_of(&provider).safe_add(&shares)?;
        self.balances.insert(provider, balance);
        self.total = total;
        Ok(())
    }

    /// Debits `shares` from `provider`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `shares` is zero.
    /// - [`AmmError::InsufficientShares`] if `provider` holds fewer.
    pub fn burn(&mut self, provider: &Address, shares: Shares) -> Result<(), AmmError> {
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("cannot burn zero shares"));
        }
        let available = self.balance_of(provider);
        if shares > available {
            return Err(AmmError::InsufficientShares {
                requested: shares.get(),
                available: available.get(),
            });
        }
        let remaining = available.safe_sub(&shares)?;
        let total = self.total.safe_sub(&shares)?;
        if remaining.is_zero() {
            self.balances.remove(provider);
        } else {
            self.balances.insert(*provider, remaining);
        }
        self.total = total;
        Ok(())
    }
}
