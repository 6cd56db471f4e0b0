//! The guarded constant-product pool.
//!
//! [`GuardedPool`] owns every piece of pool state (reserves, shares,
//! trader activity, strategy registry, flash-loan session, reentrancy
//! lock and audit log) together with the token ledger it settles through.
//! Nothing is process-global: two pools are two values.
//!
//! # Entry points
//!
//! | Method | Effect |
//! |--------|--------|
//! | [`add_liquidity`](GuardedPool::add_liquidity) | pull both tokens, mint shares |
//! | [`remove_liquidity`](GuardedPool::remove_liquidity) | burn shares, push both tokens |
//! | [`swap`](GuardedPool::swap) | guarded constant-product trade |
//! | [`flash_loan`](GuardedPool::flash_loan) | single-call loan to an approved borrower |
//! | [`batch_approve_strategies`](GuardedPool::batch_approve_strategies) | registrar-only |
//!
//! Each entry point is all-or-nothing: on error, pool state, token
//! balances and the audit log are exactly as before the call.
//!
//! A flash-loan borrower sees the pool only through a [`BorrowerAccount`];
//! nothing public moves tokens out of the pool's own balance.

mod borrower;
mod flash_loan;
mod liquidity;
mod registry;
mod swap;
mod transaction;

#[cfg(test)]
mod proptest_properties;
#[cfg(test)]
pub(crate) mod test_support;

pub use borrower::BorrowerAccount;

use num_bigint::BigUint;

use crate::config::EngineConfig;
use crate::domain::{Address, Amount, BlockHeight, PoolSide, Shares, SwapDirection};
use crate::error::AmmError;
use crate::events::PoolEvent;
use crate::flash::{FlashLoanSession, StrategyRegistry};
use crate::guard::{GuardChain, ReentrancyLock, TraderActivity, TraderBook};
use crate::ledger::ReserveLedger;
use crate::math::{quote_matching_deposit, quote_swap, withdrawal_amounts, SwapQuote};
use crate::traits::TokenLedger;

/// State that survives across calls and is rolled back as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PoolState {
    pub(crate) ledger: ReserveLedger,
    pub(crate) traders: TraderBook,
    pub(crate) registry: StrategyRegistry,
}

/// A two-token constant-product pool with an anti-manipulation guard and
/// flash loans.
///
/// # Examples
///
/// ```
/// use sentinel_amm::config::EngineConfig;
/// use sentinel_amm::domain::{
///     Address, Amount, BlockHeight, CallContext, Decimals, SwapDirection, Timestamp, Token,
///     TokenPair,
/// };
/// use sentinel_amm::pool::GuardedPool;
/// use sentinel_amm::tokens::InMemoryTokenLedger;
/// use sentinel_amm::traits::TokenLedger;
///
/// let (dapp, usd) = (Address::repeat_byte(1), Address::repeat_byte(2));
/// let pair = TokenPair::new(Token::new(dapp, Decimals::MAX), Token::new(usd, Decimals::MAX))
///     .expect("distinct tokens");
/// let pool_addr = Address::repeat_byte(0xEE);
/// let config = EngineConfig::new(pair, Address::repeat_byte(0xAA), pool_addr).expect("config");
///
/// let lp = Address::repeat_byte(0x11);
/// let trader = Address::repeat_byte(0x22);
/// let e18 = 10u128.pow(18);
/// let mut tokens = InMemoryTokenLedger::new();
/// tokens.mint(&dapp, &lp, Amount::new(100_000 * e18)).expect("mint");
/// tokens.mint(&usd, &lp, Amount::new(100_000 * e18)).expect("mint");
/// tokens.mint(&dapp, &trader, Amount::new(10 * e18)).expect("mint");
/// tokens.approve(&dapp, &lp, &pool_addr, Amount::MAX).expect("approve");
/// tokens.approve(&usd, &lp, &pool_addr, Amount::MAX).expect("approve");
/// tokens.approve(&dapp, &trader, &pool_addr, Amount::MAX).expect("approve");
///
/// let mut pool = GuardedPool::new(config, tokens).expect("pool");
/// let ctx = CallContext::new(lp, BlockHeight::new(1), Timestamp::new(1_000));
/// pool.add_liquidity(&ctx, Amount::new(100_000 * e18), Amount::new(100_000 * e18))
///     .expect("deposit");
///
/// let ctx = ctx.next_block(12).with_caller(trader);
/// let quote = pool.quote(SwapDirection::AToB, Amount::new(e18)).expect("quote");
/// let receipt = pool
///     .swap(&ctx, SwapDirection::AToB, Amount::new(e18), quote.amount_out, Timestamp::new(2_000))
///     .expect("swap");
/// assert_eq!(receipt.amount_out(), quote.amount_out);
/// ```
pub struct GuardedPool<L: TokenLedger> {
    config: EngineConfig,
    guard: GuardChain,
    state: PoolState,
    session: FlashLoanSession,
    lock: ReentrancyLock,
    events: Vec<PoolEvent>,
    tokens: L,
}

impl<L: TokenLedger> GuardedPool<L> {
    /// Creates an empty pool settling through `tokens`, guarded by the
    /// standard chain built from `config.guard()`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`EngineConfig::validate`].
    pub fn new(config: EngineConfig, tokens: L) -> Result<Self, AmmError> {
        let guard = GuardChain::standard(*config.guard());
        Self::with_guard_chain(config, tokens, guard)
    }

    /// Creates an empty pool with a caller-assembled guard chain.
    ///
    /// # Errors
    ///
    /// Returns any error from [`EngineConfig::validate`].
    pub fn with_guard_chain(
        config: EngineConfig,
        tokens: L,
        guard: GuardChain,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        tracing::info!(
            pool = %config.pool_address(),
            token_a = %config.token_pair().first().address(),
            token_b = %config.token_pair().second().address(),
            swap_fee = %config.swap_fee(),
            "pool created"
        );
        let registry = StrategyRegistry::new(config.registrar());
        Ok(Self {
            config,
            guard,
            state: PoolState {
                ledger: ReserveLedger::new(),
                traders: TraderBook::new(),
                registry,
            },
            session: FlashLoanSession::new(),
            lock: ReentrancyLock::new(),
            events: Vec::new(),
            tokens,
        })
    }

    // -- configuration and collaborators ------------------------------------

    /// The pool configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The pool's own account in the token ledger.
    #[must_use]
    pub const fn pool_address(&self) -> Address {
        self.config.pool_address()
    }

    /// The guard chain evaluated before every swap.
    #[must_use]
    pub const fn guard(&self) -> &GuardChain {
        &self.guard
    }

    /// The token ledger.
    #[must_use]
    pub const fn tokens(&self) -> &L {
        &self.tokens
    }

    #[cfg(test)]
    pub(crate) fn tokens_mut(&mut self) -> &mut L {
        &mut self.tokens
    }

    // -- ledger queries -----------------------------------------------------

    /// Returns `(reserve_a, reserve_b)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        self.state.ledger.reserves()
    }

    /// Circulating shares.
    pub const fn total_shares(&self) -> Shares {
        self.state.ledger.total_shares()
    }

    /// Shares held by `provider`.
    pub fn share_of(&self, provider: &Address) -> Shares {
        self.state.ledger.share_of(provider)
    }

    /// The constant-product invariant `reserve_a × reserve_b`.
    #[must_use]
    pub fn invariant(&self) -> BigUint {
        self.state.ledger.invariant()
    }

    // -- quotes -------------------------------------------------------------

    /// Quotes a swap of `amount_in` in `direction` at current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroReserve`] if the pool is empty.
    /// - [`AmmError::Overflow`] if the input is absurdly large.
    pub fn quote(&self, direction: SwapDirection, amount_in: Amount) -> Result<SwapQuote, AmmError> {
        let (reserve_in, reserve_out) = self.state.ledger.oriented(direction);
        quote_swap(amount_in, reserve_in, reserve_out, self.config.swap_fee())
    }

    /// Returns the amount of the other token that must accompany `amount`
    /// of the `side` token in a deposit.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroReserve`] if the pool is empty.
    pub fn quote_deposit(&self, side: PoolSide, amount: Amount) -> Result<Amount, AmmError> {
        let ledger = &self.state.ledger;
        quote_matching_deposit(amount, ledger.reserve(side), ledger.reserve(side.opposite()))
    }

    /// Returns `(amount_a, amount_b)` paid out for burning `shares` now.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if no shares circulate.
    /// - [`AmmError::InsufficientShares`] if `shares` exceeds the supply.
    pub fn quote_withdrawal(&self, shares: Shares) -> Result<(Amount, Amount), AmmError> {
        let (reserve_a, reserve_b) = self.reserves();
        withdrawal_amounts(shares, reserve_a, reserve_b, self.total_shares())
    }

    // -- guard queries ------------------------------------------------------

    /// Stored guard state of `trader`, `None` before their first swap.
    #[must_use]
    pub fn trader_activity(&self, trader: &Address) -> Option<TraderActivity> {
        self.state.traders.get(trader)
    }

    /// Blocks `trader` must still wait at `block`; zero if free to trade.
    #[must_use]
    pub fn cooldown_remaining(&self, trader: &Address, block: BlockHeight) -> u64 {
        self.trader_activity(trader)
            .map_or(0, |a| a.cooldown_remaining(block, self.guard.config().cooldown_blocks))
    }

    /// `true` while an entry point is executing.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.lock.is_engaged()
    }

    // -- flash-loan queries -------------------------------------------------

    /// The flash-loan slot.
    #[must_use]
    pub const fn flash_loan_session(&self) -> &FlashLoanSession {
        &self.session
    }

    /// `true` if `borrower` may request flash loans.
    #[must_use]
    pub fn is_strategy_approved(&self, borrower: &Address) -> bool {
        self.state.registry.is_approved(borrower)
    }

    // -- audit log ----------------------------------------------------------

    /// Events recorded since creation or the last drain.
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Takes every recorded event, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        core::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: PoolEvent) {
        self.events.push(event);
    }

    fn token_address(&self, side: PoolSide) -> Address {
        self.config.token_pair().token(side).address()
    }

    /// Fails unless the pool holds at least its recorded reserve of both
    /// tokens.
    fn ensure_backed(&self) -> Result<(), AmmError> {
        let pool_addr = self.pool_address();
        for side in [PoolSide::A, PoolSide::B] {
            let reserve = self.state.ledger.reserve(side);
            let held = self.tokens.balance_of(&self.token_address(side), &pool_addr);
            if held < reserve {
                return Err(AmmError::RepaymentShortfall {
                    owed: reserve.get(),
                    repaid: held.get(),
                });
            }
        }
        Ok(())
    }
}

impl<L: TokenLedger> core::fmt::Debug for GuardedPool<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GuardedPool")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("session", &self.session)
            .field("lock", &self.lock)
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}
