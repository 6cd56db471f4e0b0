//! Chain-agnostic account and contract identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A 32-byte identity for traders, liquidity providers, borrower contracts,
/// the registrar, the pool itself and token contracts.
///
/// The all-zero address is reserved: the engine never mints shares to it,
/// never approves it as a strategy and rejects it as a configured role.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::Address;
///
/// let alice = Address::repeat_byte(0xA1);
/// assert!(!alice.is_zero());
/// assert!(Address::ZERO.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// The reserved all-zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an address whose 32 bytes all equal `byte`.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 32])
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the reserved all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Address {
    /// Short form: `0x` followed by the first four bytes in hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0.iter().take(4) {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…")
    }
}
