//! Shared fixtures for the pool's unit and property tests.

#![allow(clippy::panic)]

use super::GuardedPool;
use crate::config::EngineConfig;
use crate::domain::{Address, Amount, BlockHeight, CallContext, Decimals, Timestamp, Token, TokenPair};
use crate::tokens::InMemoryTokenLedger;
use crate::traits::TokenLedger;

pub(crate) const E18: u128 = Decimals::MAX.factor();

pub(crate) const TOKEN_A: Address = Address::repeat_byte(0x01);
pub(crate) const TOKEN_B: Address = Address::repeat_byte(0x02);
pub(crate) const REGISTRAR: Address = Address::repeat_byte(0xAA);
pub(crate) const POOL: Address = Address::repeat_byte(0xEE);
pub(crate) const LP: Address = Address::repeat_byte(0x11);
pub(crate) const LP2: Address = Address::repeat_byte(0x12);
pub(crate) const TRADER: Address = Address::repeat_byte(0x21);

/// `n` whole tokens of either side; both are 18-decimal.
pub(crate) fn tokens(n: u64) -> Amount {
    Amount::new(Token::new(TOKEN_A, Decimals::MAX).to_raw_amount(n))
}

pub(crate) fn config() -> EngineConfig {
    let Ok(pair) = TokenPair::new(
        Token::new(TOKEN_A, Decimals::MAX),
        Token::new(TOKEN_B, Decimals::MAX),
    ) else {
        panic!("valid pair");
    };
    let Ok(cfg) = EngineConfig::new(pair, REGISTRAR, POOL) else {
        panic!("valid config");
    };
    cfg
}

/// 1M of each token for every test account, with unlimited allowance
/// to the pool.
pub(crate) fn funded_ledger() -> InMemoryTokenLedger {
    let mut ledger = InMemoryTokenLedger::new();
    for who in [LP, LP2, TRADER] {
        for token in [TOKEN_A, TOKEN_B] {
            let Ok(()) = ledger.mint(&token, &who, tokens(1_000_000)) else {
                panic!("mint");
            };
            let Ok(()) = ledger.approve(&token, &who, &POOL, Amount::MAX) else {
                panic!("approve");
            };
        }
    }
    ledger
}

pub(crate) fn empty_pool() -> GuardedPool<InMemoryTokenLedger> {
    let Ok(pool) = GuardedPool::new(config(), funded_ledger()) else {
        panic!("valid pool");
    };
    pool
}

pub(crate) fn ctx(caller: Address) -> CallContext {
    CallContext::new(caller, BlockHeight::new(1), Timestamp::new(1_000))
}

/// A pool seeded by `LP` with 100k / 100k, and the context of that deposit.
pub(crate) fn funded_pool() -> (GuardedPool<InMemoryTokenLedger>, CallContext) {
    let mut pool = empty_pool();
    let ctx = ctx(LP);
    let Ok(_) = pool.add_liquidity(&ctx, tokens(100_000), tokens(100_000)) else {
        panic!("seed deposit");
    };
    (pool, ctx)
}
