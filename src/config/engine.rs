//! Immutable parameters of one guarded pool.

use super::GuardConfig;
use crate::domain::{Address, BasisPoints, Decimals, FeeTier, Shares, TokenPair};
use crate::error::AmmError;

/// Flash-loan fee charged on principal (0.09%).
pub const DEFAULT_FLASH_LOAN_FEE_BPS: u32 = 9;

/// Shares minted by the first deposit into an empty pool (100 × 10^18).
pub const DEFAULT_INITIAL_SHARES: u128 = Decimals::MAX.scale_up(100);

/// Configuration for a [`GuardedPool`](crate::pool::GuardedPool).
///
/// Defines the token pair, both fee rates, the flat first-deposit share
/// amount, the two privileged identities and the guard tuning.
///
/// # Validation
///
/// - `swap_fee` strictly below 100%, `flash_loan_fee` at most 100%.
/// - `initial_shares > 0`.
/// - `registrar` and `pool_address` non-zero.
/// - `pool_address` differs from both token addresses.
/// - `guard` passes [`GuardConfig::validate`].
///
/// # Examples
///
/// ```
/// use sentinel_amm::config::EngineConfig;
/// use sentinel_amm::domain::{Address, Decimals, Token, TokenPair};
///
/// let pair = TokenPair::new(
///     Token::new(Address::repeat_byte(1), Decimals::MAX),
///     Token::new(Address::repeat_byte(2), Decimals::MAX),
/// ).expect("distinct");
/// let cfg = EngineConfig::new(pair, Address::repeat_byte(0xAA), Address::repeat_byte(0xEE))
///     .expect("valid config");
/// assert_eq!(cfg.flash_loan_fee().get(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    token_pair: TokenPair,
    swap_fee: FeeTier,
    flash_loan_fee: BasisPoints,
    initial_shares: Shares,
    registrar: Address,
    pool_address: Address,
    guard: GuardConfig,
}

impl EngineConfig {
    /// Creates a configuration with default fees, share constant and guard.
    ///
    /// # Errors
    ///
    /// Returns any error from [`validate`](Self::validate).
    pub fn new(
        token_pair: TokenPair,
        registrar: Address,
        pool_address: Address,
    ) -> Result<Self, AmmError> {
        let config = Self {
            token_pair,
            swap_fee: FeeTier::default(),
            flash_loan_fee: BasisPoints::new(DEFAULT_FLASH_LOAN_FEE_BPS),
            initial_shares: Shares::new(DEFAULT_INITIAL_SHARES),
            registrar,
            pool_address,
            guard: GuardConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the swap fee.
    ///
    /// # Errors
    ///
    /// Returns any error from [`validate`](Self::validate).
    pub fn with_swap_fee(mut self, fee: FeeTier) -> Result<Self, AmmError> {
        self.swap_fee = fee;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the flash-loan fee.
    ///
    /// # Errors
    ///
    /// Returns any error from [`validate`](Self::validate).
    pub fn with_flash_loan_fee(mut self, fee: BasisPoints) -> Result<Self, AmmError> {
        self.flash_loan_fee = fee;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the first-deposit share amount.
    ///
    /// # Errors
    ///
    /// Returns any error from [`validate`](Self::validate).
    pub fn with_initial_shares(mut self, shares: Shares) -> Result<Self, AmmError> {
        self.initial_shares = shares;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the guard tuning.
    ///
    /// # Errors
    ///
    /// Returns any error from [`validate`](Self::validate).
    pub fn with_guard(mut self, guard: GuardConfig) -> Result<Self, AmmError> {
        self.guard = guard;
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] for out-of-range fees, a zero
    ///   share constant, a pool address that collides with a token, or a
    ///   bad guard.
    /// - [`AmmError::ZeroAddress`] if the registrar or pool address is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.swap_fee.basis_points().get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(AmmError::InvalidConfiguration(
                "swap fee must be below 100%",
            ));
        }
        if !self.flash_loan_fee.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "flash loan fee must not exceed 100%",
            ));
        }
        if self.initial_shares.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "initial shares must be positive",
            ));
        }
        if self.registrar.is_zero() || self.pool_address.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if self.token_pair.contains(&self.pool_address) {
            return Err(AmmError::InvalidConfiguration(
                "pool address collides with a token address",
            ));
        }
        self.guard.validate()
    }

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> FeeTier {
        self.swap_fee
    }

    /// Returns the flash-loan fee rate.
    #[must_use]
    pub const fn flash_loan_fee(&self) -> BasisPoints {
        self.flash_loan_fee
    }

    /// Returns the first-deposit share amount.
    #[must_use]
    pub const fn initial_shares(&self) -> Shares {
        self.initial_shares
    }

    /// Returns the registrar identity.
    #[must_use]
    pub const fn registrar(&self) -> Address {
        self.registrar
    }

    /// Returns the pool's own account in the token ledger.
    #[must_use]
    pub const fn pool_address(&self) -> Address {
        self.pool_address
    }

    /// Returns the guard tuning.
    #[must_use]
    pub const fn guard(&self) -> &GuardConfig {
        &self.guard
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, Token};

    fn pair() -> TokenPair {
        let Ok(pair) = TokenPair::new(
            Token::new(Address::repeat_byte(1), Decimals::MAX),
            Token::new(Address::repeat_byte(2), Decimals::MAX),
        ) else {
            panic!("expected valid pair");
        };
        pair
    }

    fn config() -> EngineConfig {
        let Ok(cfg) = EngineConfig::new(pair(), Address::repeat_byte(0xAA), Address::repeat_byte(0xEE))
        else {
            panic!("expected Ok");
        };
        cfg
    }

    #[test]
    fn defaults() {
        let cfg = config();
        assert_eq!(cfg.swap_fee(), FeeTier::TIER_0_30_PERCENT);
        assert_eq!(cfg.flash_loan_fee(), BasisPoints::new(9));
        assert_eq!(cfg.initial_shares(), Shares::new(100 * 10u128.pow(18)));
        assert_eq!(*cfg.guard(), GuardConfig::default());
    }

    #[test]
    fn zero_identities_rejected() {
        assert_eq!(
            EngineConfig::new(pair(), Address::ZERO, Address::repeat_byte(0xEE)),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(
            EngineConfig::new(pair(), Address::repeat_byte(0xAA), Address::ZERO),
            Err(AmmError::ZeroAddress)
        );
    }

    #[test]
    fn pool_address_must_not_be_a_token() {
        let result = EngineConfig::new(pair(), Address::repeat_byte(0xAA), Address::repeat_byte(1));
        assert!(matches!(result, Err(AmmError::InvalidConfiguration(_))));
    }

    #[test]
    fn builders_revalidate() {
        assert!(config()
            .with_swap_fee(FeeTier::new(BasisPoints::MAX_PERCENT))
            .is_err());
        assert!(config()
            .with_flash_loan_fee(BasisPoints::new(10_001))
            .is_err());
        assert!(config().with_initial_shares(Shares::ZERO).is_err());
        assert!(config()
            .with_guard(GuardConfig {
                window_blocks: 0,
                ..GuardConfig::default()
            })
            .is_err());

        let Ok(cfg) = config().with_flash_loan_fee(BasisPoints::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.flash_loan_fee(), BasisPoints::ZERO);
    }
}
