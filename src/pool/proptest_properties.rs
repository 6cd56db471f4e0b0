//! Property-based tests for the guarded pool.
//!
//! 1. **Invariant preservation**: `reserve_a × reserve_b` never decreases
//!    across committed swaps, and a rejected swap changes nothing.
//! 2. **Round trip loses value**: A→B→A returns at most the original input.
//! 3. **Quote monotonicity**: a larger input never yields a smaller output
//!    or fee.
//! 4. **Share conservation**: provider balances always sum to the total
//!    supply, and reserves always match the pool's token balances.
//! 5. **Solvency**: after any sequence of deposits, withdrawals, swaps and
//!    flash loans, settled or not, the pool holds at least its reserve of
//!    each token.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::test_support::{
    ctx, funded_pool, tokens, E18, LP, LP2, REGISTRAR, TOKEN_A, TOKEN_B, TRADER,
};
use super::{BorrowerAccount, GuardedPool};
use crate::domain::{Address, Amount, PoolSide, Shares, SwapDirection, Timestamp};
use crate::error::AmmError;
use crate::flash::FlashLoanTerms;
use crate::tokens::InMemoryTokenLedger;
use crate::traits::{FlashBorrower, TokenLedger};

const FAR_FUTURE: Timestamp = Timestamp::new(u64::MAX);

/// Inputs between the guard's minimum and 2k tokens, well under the
/// price-impact cap of a 100k reserve.
fn trade_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![1_000u128..=1_000_000u128, 1_000u128..=2_000 * E18]
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![Just(SwapDirection::AToB), Just(SwapDirection::BToA)]
}

// ---------------------------------------------------------------------------
// Property 1: Invariant preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_never_decreases(
        trades in prop::collection::vec((direction_strategy(), trade_strategy()), 1..8),
    ) {
        let (mut pool, lp_ctx) = funded_pool();
        let mut ctx = lp_ctx.with_caller(TRADER);
        for (direction, amount) in trades {
            ctx = ctx.next_block(12);
            let k_before = pool.invariant();
            let reserves_before = pool.reserves();
            match pool.swap(&ctx, direction, Amount::new(amount), Amount::ZERO, FAR_FUTURE) {
                Ok(_) => prop_assert!(pool.invariant() >= k_before),
                Err(_) => prop_assert_eq!(pool.reserves(), reserves_before),
            }
            prop_assert!(!pool.is_locked());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Round trip loses value
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses_value(amount in trade_strategy()) {
        let (mut pool, lp_ctx) = funded_pool();
        let ctx = lp_ctx.next_block(12).with_caller(TRADER);
        let Ok(first) = pool.swap(&ctx, SwapDirection::AToB, Amount::new(amount), Amount::ZERO, FAR_FUTURE) else {
            return Ok(());
        };
        let ctx = ctx.next_block(12);
        let Ok(second) = pool.swap(&ctx, SwapDirection::BToA, first.amount_out(), Amount::ZERO, FAR_FUTURE) else {
            return Ok(());
        };
        prop_assert!(
            second.amount_out().get() <= amount,
            "round trip gained value: {} > {}",
            second.amount_out(),
            amount
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Quote monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_monotonic(
        small in 1u128..=1_000_000 * E18,
        extra in 0u128..=1_000_000 * E18,
        direction in direction_strategy(),
    ) {
        let (pool, _) = funded_pool();
        let Ok(lo) = pool.quote(direction, Amount::new(small)) else {
            return Ok(());
        };
        let Ok(hi) = pool.quote(direction, Amount::new(small + extra)) else {
            return Ok(());
        };
        prop_assert!(hi.amount_out >= lo.amount_out);
        prop_assert!(hi.fee >= lo.fee);
        prop_assert!(hi.amount_out < tokens(100_000));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Share conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shares_conserved(
        deposit in 1u64..=50_000u64,
        burn_pct in 1u128..=100u128,
        swap_first in any::<bool>(),
    ) {
        let (mut pool, lp_ctx) = funded_pool();
        if swap_first {
            let trader = lp_ctx.next_block(12).with_caller(TRADER);
            let Ok(_) = pool.swap(&trader, SwapDirection::AToB, tokens(1_000), Amount::ZERO, FAR_FUTURE) else {
                panic!("seed swap");
            };
        }

        let second = ctx(LP2);
        let amount_a = tokens(deposit);
        let Ok(amount_b) = pool.quote_deposit(PoolSide::A, amount_a) else {
            panic!("pool is funded");
        };
        if pool.add_liquidity(&second, amount_a, amount_b).is_err() {
            return Ok(());
        }

        let held = pool.share_of(&LP2);
        let burn = Shares::new((held.get() * burn_pct / 100).max(1));
        let Ok(_) = pool.remove_liquidity(&second, burn) else {
            panic!("burning held shares");
        };

        let sum: u128 = pool.share_of(&LP).get() + pool.share_of(&LP2).get();
        prop_assert_eq!(sum, pool.total_shares().get());

        let pool_addr = pool.pool_address();
        let (ra, rb) = pool.reserves();
        prop_assert_eq!(pool.tokens().balance_of(&TOKEN_A, &pool_addr), ra);
        prop_assert_eq!(pool.tokens().balance_of(&TOKEN_B, &pool_addr), rb);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Solvency
// ---------------------------------------------------------------------------

const STRATEGY: Address = Address::repeat_byte(0x51);

/// Repays `repay_bps` of what it owes, from its own balance.
struct PartialRepayer {
    repay_bps: u128,
}

impl FlashBorrower<InMemoryTokenLedger> for PartialRepayer {
    fn address(&self) -> Address {
        STRATEGY
    }

    fn on_flash_loan(
        &mut self,
        account: &mut BorrowerAccount<'_, InMemoryTokenLedger>,
        terms: &FlashLoanTerms,
        _data: &[u8],
    ) -> Result<(), AmmError> {
        let owed = terms.amount_owed().get();
        let amount = Amount::new(owed / 10_000 * self.repay_bps + owed % 10_000);
        account.repay(&terms.token(), amount)
    }
}

#[derive(Debug, Clone)]
enum Op {
    Swap(SwapDirection, u128),
    Deposit(u64),
    Withdraw(u128),
    Loan(PoolSide, u64, u128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (direction_strategy(), trade_strategy()).prop_map(|(d, a)| Op::Swap(d, a)),
        (1u64..=20_000).prop_map(Op::Deposit),
        (1u128..=100).prop_map(Op::Withdraw),
        (
            prop_oneof![Just(PoolSide::A), Just(PoolSide::B)],
            1u64..=150_000,
            9_000u128..=10_500,
        )
            .prop_map(|(side, n, bps)| Op::Loan(side, n, bps)),
    ]
}

fn assert_backed(pool: &GuardedPool<InMemoryTokenLedger>) -> Result<(), TestCaseError> {
    let pool_addr = pool.pool_address();
    let (ra, rb) = pool.reserves();
    prop_assert!(pool.tokens().balance_of(&TOKEN_A, &pool_addr) >= ra);
    prop_assert!(pool.tokens().balance_of(&TOKEN_B, &pool_addr) >= rb);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pool_stays_solvent(ops in prop::collection::vec(op_strategy(), 1..12)) {
        let (mut pool, lp_ctx) = funded_pool();
        let Ok(1) = pool.batch_approve_strategies(&lp_ctx.with_caller(REGISTRAR), &[STRATEGY]) else {
            panic!("approve strategy");
        };
        for token in [TOKEN_A, TOKEN_B] {
            let Ok(()) = pool.tokens_mut().mint(&token, &STRATEGY, tokens(10_000)) else {
                panic!("mint");
            };
        }

        let mut ctx = lp_ctx;
        for op in ops {
            ctx = ctx.next_block(12);
            match op {
                Op::Swap(direction, amount) => {
                    let trader = ctx.with_caller(TRADER);
                    let _ = pool.swap(&trader, direction, Amount::new(amount), Amount::ZERO, FAR_FUTURE);
                }
                Op::Deposit(n) => {
                    let amount_a = tokens(n);
                    if let Ok(amount_b) = pool.quote_deposit(PoolSide::A, amount_a) {
                        let _ = pool.add_liquidity(&ctx.with_caller(LP2), amount_a, amount_b);
                    }
                }
                Op::Withdraw(pct) => {
                    let held = pool.share_of(&LP2);
                    let burn = Shares::new(held.get() * pct / 100);
                    let _ = pool.remove_liquidity(&ctx.with_caller(LP2), burn);
                }
                Op::Loan(side, n, repay_bps) => {
                    let token = if side == PoolSide::A { TOKEN_A } else { TOKEN_B };
                    let mut borrower = PartialRepayer { repay_bps };
                    let _ = pool.flash_loan(&ctx, token, tokens(n), &mut borrower, &[]);
                }
            }
            assert_backed(&pool)?;
            prop_assert!(!pool.is_locked());
        }
    }
}
