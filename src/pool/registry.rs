//! Registrar-only management of the strategy registry.

use super::GuardedPool;
use crate::domain::{Address, CallContext};
use crate::error::AmmError;
use crate::events::PoolEvent;
use crate::traits::TokenLedger;

impl<L: TokenLedger> GuardedPool<L> {
    /// Approves every address in `strategies` as a flash-loan borrower.
    ///
    /// All or nothing. Returns how many were newly approved; only those
    /// appear in the emitted [`PoolEvent::StrategiesApproved`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if called from inside another entry point.
    /// - [`AmmError::NotAuthorized`] if the caller is not the registrar.
    /// - [`AmmError::ZeroAddress`] if any entry is zero.
    pub fn batch_approve_strategies(
        &mut self,
        ctx: &CallContext,
        strategies: &[Address],
    ) -> Result<usize, AmmError> {
        self.atomic("batch_approve_strategies", |pool| {
            let fresh: Vec<Address> = strategies
                .iter()
                .copied()
                .filter(|s| !pool.state.registry.is_approved(s))
                .collect();
            let added = pool.state.registry.batch_approve(&ctx.caller, strategies)?;
            if added > 0 {
                let mut fresh = fresh;
                fresh.sort_unstable();
                fresh.dedup();
                pool.emit(PoolEvent::StrategiesApproved { strategies: fresh });
            }
            tracing::info!(registrar = %ctx.caller, added, requested = strategies.len(), "strategies approved");
            Ok(added)
        })
    }

    /// Approves one borrower. Returns `false` if it was already approved.
    ///
    /// # Errors
    ///
    /// Same as [`batch_approve_strategies`](Self::batch_approve_strategies).
    pub fn approve_strategy(&mut self, ctx: &CallContext, strategy: Address) -> Result<bool, AmmError> {
        self.batch_approve_strategies(ctx, &[strategy]).map(|added| added == 1)
    }

    /// Withdraws a borrower's approval. Returns `false` if it was not
    /// approved.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if called from inside another entry point.
    /// - [`AmmError::NotAuthorized`] if the caller is not the registrar.
    pub fn revoke_strategy(&mut self, ctx: &CallContext, strategy: &Address) -> Result<bool, AmmError> {
        self.atomic("revoke_strategy", |pool| {
            let removed = pool.state.registry.revoke(&ctx.caller, strategy)?;
            if removed {
                pool.emit(PoolEvent::StrategyRevoked { strategy: *strategy });
                tracing::info!(registrar = %ctx.caller, %strategy, "strategy revoked");
            }
            Ok(removed)
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use crate::domain::Address;
    use crate::error::AmmError;
    use crate::events::PoolEvent;
    use crate::pool::test_support::{ctx, empty_pool, REGISTRAR, TRADER};

    #[test]
    fn registrar_approves_and_revokes() {
        let mut pool = empty_pool();
        let registrar = ctx(REGISTRAR);
        let (s1, s2) = (Address::repeat_byte(0x51), Address::repeat_byte(0x52));

        assert_eq!(pool.batch_approve_strategies(&registrar, &[s1, s2, s1]), Ok(2));
        assert!(pool.is_strategy_approved(&s1));
        assert_eq!(pool.approve_strategy(&registrar, s2), Ok(false));
        assert_eq!(pool.revoke_strategy(&registrar, &s1), Ok(true));
        assert!(!pool.is_strategy_approved(&s1));

        let kinds: Vec<_> = pool.events().iter().map(PoolEvent::kind).collect();
        assert_eq!(kinds, ["strategies_approved", "strategy_revoked"]);
        assert_eq!(
            pool.events().first(),
            Some(&PoolEvent::StrategiesApproved { strategies: vec![s1, s2] })
        );
    }

    #[test]
    fn outsider_rejected() {
        let mut pool = empty_pool();
        let s = Address::repeat_byte(0x51);
        assert_eq!(
            pool.batch_approve_strategies(&ctx(TRADER), &[s]),
            Err(AmmError::NotAuthorized)
        );
        assert_eq!(pool.revoke_strategy(&ctx(TRADER), &s), Err(AmmError::NotAuthorized));
        assert!(pool.events().is_empty());
    }

    #[test]
    fn zero_entry_voids_batch() {
        let mut pool = empty_pool();
        let s = Address::repeat_byte(0x51);
        assert_eq!(
            pool.batch_approve_strategies(&ctx(REGISTRAR), &[s, Address::ZERO]),
            Err(AmmError::ZeroAddress)
        );
        assert!(!pool.is_strategy_approved(&s));
    }
}
