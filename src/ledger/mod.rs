//! Reserve ledger and share accounting.
//!
//! [`ReserveLedger`] holds the two reserves and the [`ShareBook`]. It is
//! the only place pool balances change, and each mutator either applies
//! completely or returns an error leaving the ledger untouched.
//!
//! # Invariants
//!
//! - `reserve_a × reserve_b` never decreases across a swap.
//! - `total_shares == Σ share_of(p)`.
//! - No reserve goes below zero; no shares are minted to the zero address.

mod shares;

use num_bigint::BigUint;

pub use shares::ShareBook;

use crate::domain::{Address, Amount, PoolSide, Shares, SwapDirection};
use crate::error::AmmError;
use crate::math::{wide_product, CheckedArithmetic};

/// Reserves of both tokens and outstanding shares.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{Address, Amount, Shares, SwapDirection};
/// use sentinel_amm::ledger::ReserveLedger;
///
/// let mut ledger = ReserveLedger::new();
/// let lp = Address::repeat_byte(1);
/// ledger.add_liquidity(lp, Amount::new(1_000), Amount::new(1_000), Shares::new(100)).expect("ok");
///
/// let k0 = ledger.invariant();
/// ledger.apply_swap(SwapDirection::AToB, Amount::new(100), Amount::new(90)).expect("ok");
/// assert!(ledger.invariant() >= k0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReserveLedger {
    reserve_a: Amount,
    reserve_b: Amount,
    shares: ShareBook,
}

impl ReserveLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(reserve_a, reserve_b)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Returns the reserve on `side`.
    pub const fn reserve(&self, side: PoolSide) -> Amount {
        match side {
            PoolSide::A => self.reserve_a,
            PoolSide::B => self.reserve_b,
        }
    }

    /// Returns `(reserve_in, reserve_out)` for a swap in `direction`.
    #[must_use]
    pub const fn oriented(&self, direction: SwapDirection) -> (Amount, Amount) {
        (
            self.reserve(direction.input_side()),
            self.reserve(direction.output_side()),
        )
    }

    /// Circulating shares.
    pub const fn total_shares(&self) -> Shares {
        self.shares.total()
    }

    /// Shares held by `provider`.
    pub fn share_of(&self, provider: &Address) -> Shares {
        self.shares.balance_of(provider)
    }

    /// Read access to the per-provider balances.
    #[must_use]
    pub const fn share_book(&self) -> &ShareBook {
        &self.shares
    }

    /// The constant-product invariant `reserve_a × reserve_b`, exact.
    #[must_use]
    pub fn invariant(&self) -> BigUint {
        wide_product(self.reserve_a.get(), self.reserve_b.get())
    }

    /// Adds both amounts to the reserves and mints `shares` to `provider`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] / [`AmmError::InvalidQuantity`] from the
    ///   share book.
    /// - [`AmmError::Overflow`] if a reserve overflows.
    pub fn add_liquidity(
        &mut self,
        provider: Address,
        amount_a: Amount,
        amount_b: Amount,
        shares: Shares,
    ) -> Result<(), AmmError> {
        let reserve_a = self.reserve_a.safe_add(&amount_a)?;
        let reserve_b = self.reserve_b.safe_add(&amount_b)?;
        let mut book = self.shares.clone();
        book.mint(provider, shares)?;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.shares = book;
        Ok(())
    }

    /// Burns `shares` from `provider` and removes the payout from the reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShares`] if `provider` holds fewer shares.
    /// - [`AmmError::Underflow`] if a payout exceeds its reserve.
    pub fn remove_liquidity(
        &mut self,
        provider: &Address,
        shares: Shares,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<(), AmmError> {
        let reserve_a = self.reserve_a.safe_sub(&amount_a)?;
        let reserve_b = self.reserve_b.safe_sub(&amount_b)?;
        let mut book = self.shares.clone();
        book.burn(provider, shares)?;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.shares = book;
        Ok(())
    }

    /// Moves `amount_in` into the input reserve and `amount_out` out of the
    /// output reserve.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if `amount_out` would empty
    ///   the output reserve.
    /// - [`AmmError::Overflow`] if the input reserve overflows.
    /// - [`AmmError::InvalidQuantity`] if the swap would shrink the invariant.
    pub fn apply_swap(
        &mut self,
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<(), AmmError> {
        let (reserve_in, reserve_out) = self.oriented(direction);
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out.safe_sub(&amount_out)?;
        if wide_product(new_in.get(), new_out.get())
            < wide_product(reserve_in.get(), reserve_out.get())
        {
            return Err(AmmError::InvalidQuantity("swap would shrink the invariant"));
        }
        self.set(direction.input_side(), new_in);
        self.set(direction.output_side(), new_out);
        Ok(())
    }

    /// Adds `amount` to the reserve on `side` without minting shares.
    ///
    /// Used to retain flash-loan fees for existing providers.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the reserve overflows.
    pub fn credit(&mut self, side: PoolSide, amount: Amount) -> Result<(), AmmError> {
        let updated = self.reserve(side).safe_add(&amount)?;
        self.set(side, updated);
        Ok(())
    }

    fn set(&mut self, side: PoolSide, value: Amount) {
        match side {
            PoolSide::A => self.reserve_a = value,
            PoolSide::B => self.reserve_b = value,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn seeded() -> ReserveLedger {
        let mut ledger = ReserveLedger::new();
        let Ok(()) = ledger.add_liquidity(
            Address::repeat_byte(1),
            Amount::new(10_000),
            Amount::new(20_000),
            Shares::new(100),
        ) else {
            panic!("expected Ok");
        };
        ledger
    }

    #[test]
    fn liquidity_round_trip() {
        let mut ledger = seeded();
        let lp = Address::repeat_byte(1);
        assert_eq!(ledger.reserves(), (Amount::new(10_000), Amount::new(20_000)));
        assert_eq!(ledger.share_of(&lp), Shares::new(100));

        let Ok(()) = ledger.remove_liquidity(&lp, Shares::new(100), Amount::new(10_000), Amount::new(20_000))
        else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.reserves(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(ledger.total_shares(), Shares::ZERO);
    }

    #[test]
    fn failed_mint_leaves_reserves() {
        let mut ledger = seeded();
        let before = ledger.clone();
        let result = ledger.add_liquidity(Address::ZERO, Amount::new(1), Amount::new(2), Shares::new(1));
        assert_eq!(result, Err(AmmError::ZeroAddress));
        assert_eq!(ledger, before);
    }

    #[test]
    fn failed_burn_leaves_reserves() {
        let mut ledger = seeded();
        let before = ledger.clone();
        let stranger = Address::repeat_byte(9);
        assert!(ledger
            .remove_liquidity(&stranger, Shares::new(1), Amount::new(1), Amount::new(1))
            .is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn swap_moves_both_reserves() {
        let mut ledger = seeded();
        let Ok(()) = ledger.apply_swap(SwapDirection::BToA, Amount::new(2_000), Amount::new(900)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.reserves(), (Amount::new(9_100), Amount::new(22_000)));
    }

    #[test]
    fn swap_cannot_drain_or_shrink() {
        let mut ledger = seeded();
        assert_eq!(
            ledger.apply_swap(SwapDirection::AToB, Amount::new(1), Amount::new(20_000)),
            Err(AmmError::InsufficientLiquidity)
        );
        assert!(matches!(
            ledger.apply_swap(SwapDirection::AToB, Amount::new(1), Amount::new(1_000)),
            Err(AmmError::InvalidQuantity(_))
        ));
        assert_eq!(ledger, seeded());
    }

    #[test]
    fn credit_grows_invariant() {
        let mut ledger = seeded();
        let k0 = ledger.invariant();
        assert!(ledger.credit(PoolSide::A, Amount::new(9)).is_ok());
        assert!(ledger.invariant() > k0);
        assert_eq!(ledger.total_shares(), Shares::new(100));
    }
}
