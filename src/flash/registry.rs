//! Access-control list of borrower contracts.

use std::collections::BTreeSet;

use crate::domain::Address;
use crate::error::AmmError;

/// Borrowers permitted to request flash loans, managed by one registrar.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::Address;
/// use sentinel_amm::flash::StrategyRegistry;
///
/// let registrar = Address::repeat_byte(0xAA);
/// let strategy = Address::repeat_byte(0x51);
/// let mut registry = StrategyRegistry::new(registrar);
///
/// registry.batch_approve(&registrar, &[strategy]).expect("registrar may approve");
/// assert!(registry.is_approved(&strategy));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyRegistry {
    registrar: Address,
    approved: BTreeSet<Address>,
}

impl StrategyRegistry {
    /// Creates an empty registry administered by `registrar`.
    #[must_use]
    pub const fn new(registrar: Address) -> Self {
        Self {
            registrar,
            approved: BTreeSet::new(),
        }
    }

    /// The privileged identity.
    #[must_use]
    pub const fn registrar(&self) -> Address {
        self.registrar
    }

    /// `true` if `borrower` may request flash loans.
    #[must_use]
    pub fn is_approved(&self, borrower: &Address) -> bool {
        self.approved.contains(borrower)
    }

    /// Number of approved borrowers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.approved.len()
    }

    /// `true` if no borrower is approved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }

    /// Approves every address in `borrowers`. All or nothing.
    ///
    /// Returns how many were newly approved.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotAuthorized`] if `caller` is not the registrar.
    /// - [`AmmError::ZeroAddress`] if any entry is zero.
    pub fn batch_approve(
        &mut self,
        caller: &Address,
        borrowers: &[Address],
    ) -> Result<usize, AmmError> {
        self.authorize(caller)?;
        if borrowers.iter().any(Address::is_zero) {
            return Err(AmmError::ZeroAddress);
        }
        Ok(borrowers
            .iter()
            .filter(|b| self.approved.insert(**b))
            .count())
    }

    /// Approves a single borrower.
    ///
    /// # Errors
    ///
    /// Same as [`batch_approve`](Self::batch_approve).
    pub fn approve(&mut self, caller: &Address, borrower: Address) -> Result<bool, AmmError> {
        self.batch_approve(caller, &[borrower]).map(|n| n == 1)
    }

    /// Withdraws a borrower's approval. Returns `true` if it was approved.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::NotAuthorized`] if `caller` is not the registrar.
    pub fn revoke(&mut self, caller: &Address, borrower: &Address) -> Result<bool, AmmError> {
        self.authorize(caller)?;
        Ok(self.approved.remove(borrower))
    }

    fn authorize(&self, caller: &Address) -> Result<(), AmmError> {
        if *caller != self.registrar {
            return Err(AmmError::NotAuthorized);
        }
        Ok(())
    }
}
