//! Token quantities in raw base units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A quantity of one token in its smallest unit, e.g. wei for an
/// 18-decimal token. Reserves, balances, fees and trade sizes are all
/// `Amount`s.
///
/// Only addition and subtraction live here; ratios go through
/// [`mul_div`](crate::math::mul_div). Both are checked so a bad input
/// fails closed instead of wrapping.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::Amount;
///
/// let reserve = Amount::new(100_000);
/// assert_eq!(reserve.checked_add(&Amount::new(1)), Some(Amount::new(100_001)));
/// assert_eq!(Amount::new(1).checked_sub(&reserve), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Nothing.
    pub const ZERO: Self = Self(0);

    /// Largest quantity; used as an unlimited allowance.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw quantity.
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// The raw quantity.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// `true` for a zero quantity.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `self + other`, or `None` past `u128::MAX`.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// `self - other`, or `None` below zero.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(diff) => Some(Self(diff)),
            None => None,
        }
    }

    /// `self - other`, clamped at zero.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
