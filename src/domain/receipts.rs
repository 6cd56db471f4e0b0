//! Outcomes returned by the mutating pool entry points.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Shares, SwapDirection};
use crate::error::AmmError;

/// The outcome of an accepted swap.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{Amount, SwapDirection, SwapReceipt};
///
/// let receipt = SwapReceipt::new(
///     SwapDirection::AToB,
///     Amount::new(1000),
///     Amount::new(990),
///     Amount::new(3),
///     (Amount::new(101_000), Amount::new(99_010)),
/// );
/// assert!(receipt.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapReceipt {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
    reserves_after: (Amount, Amount),
}

impl SwapReceipt {
    /// Creates a new `SwapReceipt` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if:
    /// - `amount_in` is zero
    /// - `amount_out` is zero
    /// - `fee >= amount_in`
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
        reserves_after: (Amount, Amount),
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("amount_out must be positive"));
        }
        if fee.get() >= amount_in.get() {
            return Err(AmmError::InvalidQuantity("fee must be less than amount_in"));
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
            fee,
            reserves_after,
        })
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained by the pool.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Returns `(reserve_a, reserve_b)` after the swap.
    #[must_use]
    pub const fn reserves_after(&self) -> (Amount, Amount) {
        self.reserves_after
    }
}

impl fmt::Display for SwapReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swap({}, in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}

/// The outcome of an accepted deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepositReceipt {
    /// Token A pulled from the provider.
    pub amount_a: Amount,
    /// Token B pulled from the provider.
    pub amount_b: Amount,
    /// Shares minted to the provider.
    pub shares_minted: Shares,
    /// Circulating shares after the deposit.
    pub total_shares: Shares,
}

/// The outcome of an accepted withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// Shares burned from the provider.
    pub shares_burned: Shares,
    /// Token A paid out.
    pub amount_a: Amount,
    /// Token B paid out.
    pub amount_b: Amount,
    /// Circulating shares after the withdrawal.
    pub total_shares: Shares,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn reserves() -> (Amount, Amount) {
        (Amount::new(1), Amount::new(1))
    }

    #[test]
    fn valid_receipt() {
        let Ok(r) = SwapReceipt::new(
            SwapDirection::BToA,
            Amount::new(1000),
            Amount::new(990),
            Amount::new(3),
            reserves(),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(r.direction(), SwapDirection::BToA);
        assert_eq!(r.amount_in(), Amount::new(1000));
        assert_eq!(r.amount_out(), Amount::new(990));
        assert_eq!(r.fee(), Amount::new(3));
        assert_eq!(r.to_string(), "Swap(B->A, in=1000, out=990, fee=3)");
    }

    #[test]
    fn zero_amounts_rejected() {
        let d = SwapDirection::AToB;
        assert!(SwapReceipt::new(d, Amount::ZERO, Amount::new(1), Amount::ZERO, reserves()).is_err());
        assert!(SwapReceipt::new(d, Amount::new(1), Amount::ZERO, Amount::ZERO, reserves()).is_err());
    }

    #[test]
    fn fee_must_be_below_input() {
        let result = SwapReceipt::new(
            SwapDirection::AToB,
            Amount::new(100),
            Amount::new(50),
            Amount::new(100),
            reserves(),
        );
        assert_eq!(
            result,
            Err(AmmError::InvalidQuantity("fee must be less than amount_in"))
        );
    }
}
