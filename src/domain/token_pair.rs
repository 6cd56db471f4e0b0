//! The two tokens of a pool and the sides they occupy.

use serde::{Deserialize, Serialize};

use super::{Address, PoolSide, Token};
use crate::error::AmmError;

/// The pool's two distinct tokens.
///
/// Unlike a routing pair, the order is the deployment order and is kept
/// as given: the first token is side [`A`](PoolSide::A), the second side
/// [`B`](PoolSide::B).
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{Address, Decimals, PoolSide, Token, TokenPair};
///
/// let dapp = Token::new(Address::repeat_byte(1), Decimals::MAX);
/// let usd = Token::new(Address::repeat_byte(2), Decimals::MAX);
/// let pair = TokenPair::new(dapp, usd).expect("distinct tokens");
/// assert_eq!(pair.side_of(&usd.address()), Some(PoolSide::B));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    token_a: Token,
    token_b: Token,
}

impl TokenPair {
    /// Creates a new `TokenPair`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if both tokens share an address.
    /// - [`AmmError::ZeroAddress`] if either token address is zero.
    pub fn new(token_a: Token, token_b: Token) -> Result<Self, AmmError> {
        if token_a.address().is_zero() || token_b.address().is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if token_a.address() == token_b.address() {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        Ok(Self { token_a, token_b })
    }

    /// Returns the side-A token.
    #[must_use]
    pub const fn first(&self) -> Token {
        self.token_a
    }

    /// Returns the side-B token.
    #[must_use]
    pub const fn second(&self) -> Token {
        self.token_b
    }

    /// Returns the token on `side`.
    #[must_use]
    pub const fn token(&self, side: PoolSide) -> Token {
        match side {
            PoolSide::A => self.token_a,
            PoolSide::B => self.token_b,
        }
    }

    /// Returns the side that `address` occupies, if it is one of the pair.
    #[must_use]
    pub fn side_of(&self, address: &Address) -> Option<PoolSide> {
        if *address == self.token_a.address() {
            Some(PoolSide::A)
        } else if *address == self.token_b.address() {
            Some(PoolSide::B)
        } else {
            None
        }
    }

    /// Returns `true` if `address` is one of the pair.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.side_of(address).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Decimals;

    fn tok(byte: u8) -> Token {
        Token::new(Address::repeat_byte(byte), Decimals::MAX)
    }

    #[test]
    fn keeps_deployment_order() {
        let Ok(pair) = TokenPair::new(tok(9), tok(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), tok(9));
        assert_eq!(pair.second(), tok(1));
        assert_eq!(pair.token(PoolSide::A), tok(9));
        assert_eq!(pair.token(PoolSide::B), tok(1));
    }

    #[test]
    fn rejects_same_address() {
        let Err(e) = TokenPair::new(tok(1), tok(1)) else {
            panic!("expected Err");
        };
        assert_eq!(
            e,
            AmmError::InvalidToken("token pair requires two distinct addresses")
        );
    }

    #[test]
    fn rejects_zero_address() {
        let zero = Token::new(Address::ZERO, Decimals::MAX);
        assert_eq!(TokenPair::new(zero, tok(1)), Err(AmmError::ZeroAddress));
    }

    #[test]
    fn side_lookup() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.side_of(&Address::repeat_byte(1)), Some(PoolSide::A));
        assert_eq!(pair.side_of(&Address::repeat_byte(2)), Some(PoolSide::B));
        assert_eq!(pair.side_of(&Address::repeat_byte(3)), None);
        assert!(!pair.contains(&Address::repeat_byte(3)));
    }
}
