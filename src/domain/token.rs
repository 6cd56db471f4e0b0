//! Token identity type.

use serde::{Deserialize, Serialize};

use super::{Address, Decimals};

/// A token traded by the pool: its contract address and declared precision.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{Address, Decimals, Token};
///
/// let dapp = Token::new(Address::repeat_byte(1), Decimals::MAX);
/// assert_eq!(dapp.to_raw_amount(100), 100 * 10u128.pow(18));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: Address,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub const fn new(address: Address, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// Returns the token contract address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the declared precision.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Converts whole tokens to raw units.
    #[must_use]
    pub const fn to_raw_amount(&self, whole: u64) -> u128 {
        self.decimals.scale_up(whole)
    }
}
