//! Guarded swap entry point.

use super::GuardedPool;
use crate::domain::{Amount, CallContext, SwapDirection, SwapReceipt, Timestamp};
use crate::error::AmmError;
use crate::events::PoolEvent;
use crate::guard::{GuardRequest, TraderActivity};
use crate::traits::TokenLedger;

impl<L: TokenLedger> GuardedPool<L> {
    /// Sells `amount_in` of the input token for at least `min_amount_out`
    /// of the output token.
    ///
    /// Evaluation order, which decides the error a caller sees:
    ///
    /// 1. deadline
    /// 2. the guard chain (reentrancy, flash-loan lock, minimum size,
    ///    cooldown, frequency window, price impact)
    /// 3. slippage
    ///
    /// On success the input is pulled from the caller with
    /// `transfer_from` (the pool address must hold an allowance), the
    /// output is pushed with `transfer`, reserves and the caller's
    /// [`TraderActivity`] are updated and a [`PoolEvent::Swap`] is recorded.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DeadlineExpired`] if `ctx.timestamp > deadline`.
    /// - Any guard rejection, see [`crate::guard`].
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_amount_out`.
    /// - [`AmmError::InvalidQuantity`] if the output rounds to zero.
    /// - [`AmmError::TransferFailed`] if the caller's balance or allowance
    ///   is insufficient.
    pub fn swap(
        &mut self,
        ctx: &CallContext,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
        deadline: Timestamp,
    ) -> Result<SwapReceipt, AmmError> {
        if ctx.timestamp > deadline {
            return Err(AmmError::DeadlineExpired {
                now: ctx.timestamp.get(),
                deadline: deadline.get(),
            });
        }

        let (reserve_in, _) = self.state.ledger.oriented(direction);
        let request = GuardRequest {
            trader: ctx.caller,
            direction,
            amount_in,
            reserve_in,
            block: ctx.block,
            activity: self.state.traders.get(&ctx.caller),
            nested: self.lock.is_engaged(),
            flash_loan_active: self.session.is_active(),
        };
        let next_activity = self.guard.evaluate(&request)?;

        let quote = self.quote(direction, amount_in)?;
        if quote.amount_out < min_amount_out {
            return Err(AmmError::SlippageExceeded {
                got: quote.amount_out.get(),
                min: min_amount_out.get(),
            });
        }
        if quote.amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("swap output rounds to zero"));
        }

        self.atomic("swap", |pool| {
            pool.commit_swap(ctx, direction, amount_in, quote.amount_out, quote.fee, next_activity)
        })
    }

    fn commit_swap(
        &mut self,
        ctx: &CallContext,
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
        activity: TraderActivity,
    ) -> Result<SwapReceipt, AmmError> {
        let pool = self.pool_address();
        let token_in = self.token_address(direction.input_side());
        let token_out = self.token_address(direction.output_side());

        self.tokens
            .transfer_from(&token_in, &pool, &ctx.caller, &pool, amount_in)?;
        self.tokens.transfer(&token_out, &pool, &ctx.caller, amount_out)?;
        self.state.ledger.apply_swap(direction, amount_in, amount_out)?;
        self.state.traders.insert(ctx.caller, activity);

        let (reserve_a, reserve_b) = self.reserves();
        let receipt = SwapReceipt::new(direction, amount_in, amount_out, fee, (reserve_a, reserve_b))?;
        self.emit(PoolEvent::Swap {
            trader: ctx.caller,
            token_in,
            amount_in,
            token_out,
            amount_out,
            reserve_a,
            reserve_b,
            timestamp: ctx.timestamp,
        });
        tracing::info!(
            trader = %ctx.caller,
            %direction,
            %amount_in,
            %amount_out,
            %fee,
            block = ctx.block.get(),
            "swap executed"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use crate::domain::{Amount, SwapDirection, Timestamp};
    use crate::error::AmmError;
    use crate::pool::test_support::{funded_pool, tokens, LP, TRADER};
    use crate::traits::TokenLedger;

    #[test]
    fn swap_moves_tokens_and_reserves() {
        let (mut pool, ctx) = funded_pool();
        let ctx = ctx.next_block(12).with_caller(TRADER);
        let Ok(q) = pool.quote(SwapDirection::AToB, tokens(1)) else {
            panic!("expected Ok");
        };
        let Ok(receipt) = pool.swap(&ctx, SwapDirection::AToB, tokens(1), Amount::ZERO, Timestamp::new(u64::MAX))
        else {
            panic!("expected Ok");
        };
        assert_eq!(receipt.amount_out(), q.amount_out);
        let (ra, rb) = pool.reserves();
        assert_eq!(ra, tokens(100_001));
        assert_eq!(rb.get(), tokens(100_000).get() - q.amount_out.get());

        let token_a = pool.config().token_pair().first().address();
        let token_b = pool.config().token_pair().second().address();
        assert_eq!(pool.tokens().balance_of(&token_a, &pool.pool_address()), ra);
        assert_eq!(pool.tokens().balance_of(&token_b, &pool.pool_address()), rb);
        assert_eq!(pool.tokens().balance_of(&token_b, &TRADER), q.amount_out);
        assert!(pool.trader_activity(&TRADER).is_some());
    }

    #[test]
    fn deadline_checked_first() {
        let (mut pool, ctx) = funded_pool();
        let ctx = ctx.with_caller(TRADER);
        let result = pool.swap(
            &ctx,
            SwapDirection::AToB,
            Amount::new(1),
            Amount::ZERO,
            Timestamp::new(ctx.timestamp.get() - 1),
        );
        assert!(matches!(result, Err(AmmError::DeadlineExpired { .. })));
    }

    #[test]
    fn slippage_rejected_without_state_change() {
        let (mut pool, ctx) = funded_pool();
        let ctx = ctx.next_block(12).with_caller(TRADER);
        let Ok(q) = pool.quote(SwapDirection::BToA, tokens(1)) else {
            panic!("expected Ok");
        };
        let min = Amount::new(q.amount_out.get() + 1);
        let before = pool.reserves();
        let result = pool.swap(&ctx, SwapDirection::BToA, tokens(1), min, Timestamp::new(u64::MAX));
        assert!(matches!(result, Err(AmmError::SlippageExceeded { .. })));
        assert_eq!(pool.reserves(), before);
        assert!(pool.trader_activity(&TRADER).is_none());
    }

    #[test]
    fn missing_allowance_rolls_back() {
        let (mut pool, ctx) = funded_pool();
        let stranger = crate::domain::Address::repeat_byte(0x77);
        let token_a = pool.config().token_pair().first().address();
        let Ok(()) = pool.tokens_mut().mint(&token_a, &stranger, tokens(5)) else {
            panic!("expected Ok");
        };
        let ctx = ctx.next_block(12).with_caller(stranger);
        let before = pool.reserves();
        let result = pool.swap(&ctx, SwapDirection::AToB, tokens(1), Amount::ZERO, Timestamp::new(u64::MAX));
        assert!(matches!(result, Err(AmmError::TransferFailed(_))));
        assert_eq!(pool.reserves(), before);
        assert!(pool.trader_activity(&stranger).is_none());
        assert_eq!(pool.share_of(&LP).get(), 100 * 10u128.pow(18));
    }
}
