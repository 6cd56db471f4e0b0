//! Pool sides and swap directions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the two reserves of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolSide {
    /// The first token of the pair.
    A,
    /// The second token of the pair.
    B,
}

impl PoolSide {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Which token a trader sells into the pool.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{PoolSide, SwapDirection};
///
/// let dir = SwapDirection::AToB;
/// assert_eq!(dir.input_side(), PoolSide::A);
/// assert_eq!(dir.reverse(), SwapDirection::BToA);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell token A, receive token B.
    AToB,
    /// Sell token B, receive token A.
    BToA,
}

impl SwapDirection {
    /// The side whose reserve receives the input.
    #[must_use]
    pub const fn input_side(self) -> PoolSide {
        match self {
            Self::AToB => PoolSide::A,
            Self::BToA => PoolSide::B,
        }
    }

    /// The side whose reserve pays the output.
    #[must_use]
    pub const fn output_side(self) -> PoolSide {
        self.input_side().opposite()
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::AToB => Self::BToA,
            Self::BToA => Self::AToB,
        }
    }

    /// The direction that sells `side`.
    #[must_use]
    pub const fn selling(side: PoolSide) -> Self {
        match side {
            PoolSide::A => Self::AToB,
            PoolSide::B => Self::BToA,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AToB => write!(f, "A->B"),
            Self::BToA => write!(f, "B->A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_follow_direction() {
        assert_eq!(SwapDirection::AToB.input_side(), PoolSide::A);
        assert_eq!(SwapDirection::AToB.output_side(), PoolSide::B);
        assert_eq!(SwapDirection::BToA.input_side(), PoolSide::B);
        assert_eq!(SwapDirection::BToA.output_side(), PoolSide::A);
    }

    #[test]
    fn reverse_and_selling() {
        assert_eq!(SwapDirection::BToA.reverse(), SwapDirection::AToB);
        assert_eq!(SwapDirection::selling(PoolSide::B), SwapDirection::BToA);
        assert_eq!(PoolSide::A.opposite(), PoolSide::B);
    }

    #[test]
    fn display() {
        assert_eq!(SwapDirection::AToB.to_string(), "A->B");
    }
}
