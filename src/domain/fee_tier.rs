//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;

/// The proportional fee charged on swap input.
///
/// The fee is never paid out: it is deducted from the input before pricing
/// and the whole input is added to the reserve, so the fee stays in the pool
/// and grows `reserve_a * reserve_b`.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// let net = tier.net_of_fee(Amount::new(10_000)).expect("no overflow");
/// assert_eq!(net, Amount::new(9_970));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.30% fee (30 bp), the engine default.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns the part of `amount_in` that is priced:
    /// `amount_in * (10_000 - fee_bps) / 10_000`, floored.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the tier exceeds 100%.
    /// - [`AmmError::Overflow`] if the intermediate product overflows.
    pub fn net_of_fee(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        match self.0.complement() {
            Some(keep) => keep.apply(amount_in, Rounding::Down),
            None => Err(AmmError::InvalidConfiguration("fee tier above 100%")),
        }
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
