//! Deposits and withdrawals.

use super::GuardedPool;
use crate::domain::{Amount, CallContext, DepositReceipt, PoolSide, Shares, WithdrawalReceipt};
use crate::error::AmmError;
use crate::events::PoolEvent;
use crate::math::{quote_matching_deposit, shares_for_deposit};
use crate::traits::TokenLedger;

impl<L: TokenLedger> GuardedPool<L> {
    /// Deposits both tokens and mints pool shares to the caller.
    ///
    /// The first deposit into an empty pool sets the price and mints the
    /// configured initial share supply. Every later deposit must match
    /// the current ratio: `amount_b` must equal the paired amount quoted
    /// for `amount_a`, or `amount_a` the paired amount quoted for
    /// `amount_b`. Shares are minted as `amount_a × total / reserve_a`.
    ///
    /// Both tokens are pulled with `transfer_from`, so the caller must
    /// have approved the pool address.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if called from inside another entry point.
    /// - [`AmmError::InvalidQuantity`] if either amount is zero or the
    ///   deposit would mint zero shares.
    /// - [`AmmError::RatioMismatch`] if the amounts are off ratio.
    /// - [`AmmError::TransferFailed`] if either pull fails.
    pub fn add_liquidity(
        &mut self,
        ctx: &CallContext,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<DepositReceipt, AmmError> {
        self.atomic("add_liquidity", |pool| {
            if amount_a.is_zero() || amount_b.is_zero() {
                return Err(AmmError::InvalidQuantity("deposit amounts must be positive"));
            }
            let shares = pool.shares_to_mint(amount_a, amount_b)?;

            let pool_addr = pool.pool_address();
            let token_a = pool.token_address(PoolSide::A);
            let token_b = pool.token_address(PoolSide::B);
            pool.tokens
                .transfer_from(&token_a, &pool_addr, &ctx.caller, &pool_addr, amount_a)?;
            pool.tokens
                .transfer_from(&token_b, &pool_addr, &ctx.caller, &pool_addr, amount_b)?;
            pool.state
                .ledger
                .add_liquidity(ctx.caller, amount_a, amount_b, shares)?;

            pool.emit(PoolEvent::Deposit {
                provider: ctx.caller,
                amount_a,
                amount_b,
                shares,
                block: ctx.block,
            });
            let total_shares = pool.total_shares();
            tracing::info!(
                provider = %ctx.caller,
                %amount_a,
                %amount_b,
                shares = %shares,
                total_shares = %total_shares,
                "liquidity added"
            );
            Ok(DepositReceipt {
                amount_a,
                amount_b,
                shares_minted: shares,
                total_shares,
            })
        })
    }

    /// Burns `shares` and pays the caller their pro-rata slice of both
    /// reserves, rounded down.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if called from inside another entry point.
    /// - [`AmmError::InvalidQuantity`] if `shares` is zero.
    /// - [`AmmError::InsufficientShares`] if the caller holds fewer shares.
    pub fn remove_liquidity(
        &mut self,
        ctx: &CallContext,
        shares: Shares,
    ) -> Result<WithdrawalReceipt, AmmError> {
        self.atomic("remove_liquidity", |pool| {
            if shares.is_zero() {
                return Err(AmmError::InvalidQuantity("shares to burn must be positive"));
            }
            let held = pool.share_of(&ctx.caller);
            if shares > held {
                return Err(AmmError::InsufficientShares {
                    requested: shares.get(),
                    available: held.get(),
                });
            }
            let (amount_a, amount_b) = pool.quote_withdrawal(shares)?;
            pool.state
                .ledger
                .remove_liquidity(&ctx.caller, shares, amount_a, amount_b)?;

            let pool_addr = pool.pool_address();
            for (side, amount) in [(PoolSide::A, amount_a), (PoolSide::B, amount_b)] {
                if !amount.is_zero() {
                    let token = pool.token_address(side);
                    pool.tokens.transfer(&token, &pool_addr, &ctx.caller, amount)?;
                }
            }

            pool.emit(PoolEvent::Withdraw {
                provider: ctx.caller,
                amount_a,
                amount_b,
                shares,
                block: ctx.block,
            });
            let total_shares = pool.total_shares();
            tracing::info!(
                provider = %ctx.caller,
                %amount_a,
                %amount_b,
                shares = %shares,
                total_shares = %total_shares,
                "liquidity removed"
            );
            Ok(WithdrawalReceipt {
                shares_burned: shares,
                amount_a,
                amount_b,
                total_shares,
            })
        })
    }

    fn shares_to_mint(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares, AmmError> {
        let total = self.total_shares();
        if total.is_zero() {
            return Ok(self.config.initial_shares());
        }
        let (reserve_a, reserve_b) = self.reserves();
        let expected_b = quote_matching_deposit(amount_a, reserve_a, reserve_b)?;
        let expected_a = quote_matching_deposit(amount_b, reserve_b, reserve_a)?;
        if amount_b != expected_b && amount_a != expected_a {
            return Err(AmmError::RatioMismatch {
                expected: expected_b.get(),
                got: amount_b.get(),
            });
        }
        let shares = shares_for_deposit(amount_a, reserve_a, total)?;
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit too small to mint shares"));
        }
        Ok(shares)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use crate::domain::{Amount, Shares};
    use crate::error::AmmError;
    use crate::events::PoolEvent;
    use crate::pool::test_support::{ctx, empty_pool, funded_pool, tokens, E18, LP, LP2, TOKEN_A};
    use crate::traits::TokenLedger;

    // -- deposits -----------------------------------------------------------

    #[test]
    fn first_deposit_mints_initial_shares() {
        let mut pool = empty_pool();
        let Ok(receipt) = pool.add_liquidity(&ctx(LP), tokens(100_000), tokens(100_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(receipt.shares_minted, Shares::new(100 * E18));
        assert_eq!(pool.total_shares(), Shares::new(100 * E18));
        assert_eq!(pool.reserves(), (tokens(100_000), tokens(100_000)));
        assert!(matches!(pool.events(), [PoolEvent::Deposit { .. }]));
    }

    #[test]
    fn proportional_deposit_mints_pro_rata() {
        let (mut pool, _) = funded_pool();
        let Ok(receipt) = pool.add_liquidity(&ctx(LP2), tokens(50_000), tokens(50_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(receipt.shares_minted, Shares::new(50 * E18));
        assert_eq!(receipt.total_shares, Shares::new(150 * E18));
        assert_eq!(pool.share_of(&LP2), Shares::new(50 * E18));
    }

    #[test]
    fn off_ratio_deposit_rejected() {
        let (mut pool, _) = funded_pool();
        let before = pool.reserves();
        let result = pool.add_liquidity(&ctx(LP2), tokens(50_000), tokens(40_000));
        assert_eq!(
            result,
            Err(AmmError::RatioMismatch {
                expected: 50_000 * E18,
                got: 40_000 * E18,
            })
        );
        assert_eq!(pool.reserves(), before);
        assert_eq!(pool.events().len(), 1);
    }

    #[test]
    fn zero_amount_rejected() {
        let mut pool = empty_pool();
        let result = pool.add_liquidity(&ctx(LP), Amount::ZERO, tokens(1));
        assert!(matches!(result, Err(AmmError::InvalidQuantity(_))));
        assert!(!pool.is_locked());
    }

    #[test]
    fn unfunded_depositor_leaves_no_trace() {
        let mut pool = empty_pool();
        let broke = crate::domain::Address::repeat_byte(0x99);
        let result = pool.add_liquidity(&ctx(broke), tokens(1), tokens(1));
        assert!(matches!(result, Err(AmmError::TransferFailed(_))));
        assert_eq!(pool.total_shares(), Shares::ZERO);
        assert!(pool.events().is_empty());
    }

    // -- withdrawals --------------------------------------------------------

    #[test]
    fn full_withdrawal_returns_everything() {
        let (mut pool, ctx) = funded_pool();
        let before = pool.tokens().balance_of(&TOKEN_A, &LP);
        let Ok(receipt) = pool.remove_liquidity(&ctx, Shares::new(100 * E18)) else {
            panic!("expected Ok");
        };
        assert_eq!(receipt.amount_a, tokens(100_000));
        assert_eq!(receipt.amount_b, tokens(100_000));
        assert_eq!(pool.reserves(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(pool.total_shares(), Shares::ZERO);
        let Some(expected) = before.checked_add(&tokens(100_000)) else {
            panic!("no overflow");
        };
        assert_eq!(pool.tokens().balance_of(&TOKEN_A, &LP), expected);
    }

    #[test]
    fn withdrawing_more_than_held_rejected() {
        let (mut pool, _) = funded_pool();
        let result = pool.remove_liquidity(&ctx(LP2), Shares::new(1));
        assert_eq!(
            result,
            Err(AmmError::InsufficientShares {
                requested: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn partial_withdrawal_is_pro_rata() {
        let (mut pool, ctx) = funded_pool();
        let Ok(receipt) = pool.remove_liquidity(&ctx, Shares::new(25 * E18)) else {
            panic!("expected Ok");
        };
        assert_eq!(receipt.amount_a, tokens(25_000));
        assert_eq!(receipt.total_shares, Shares::new(75 * E18));
        assert_eq!(pool.reserves(), (tokens(75_000), tokens(75_000)));
    }
}
