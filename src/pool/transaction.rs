//! All-or-nothing envelope shared by every mutating entry point.
//!
//! Mutations are applied in place after a checkpoint of the pool state,
//! the token ledger and the audit-log length. Commit drops the
//! checkpoint; rollback restores all three. The reentrancy lock is held
//! for the whole envelope and released on both paths.

use super::{GuardedPool, PoolState};
use crate::error::AmmError;
use crate::traits::TokenLedger;

/// Everything needed to undo an envelope.
pub(crate) struct Checkpoint<S> {
    state: PoolState,
    tokens: S,
    events_len: usize,
}

impl<L: TokenLedger> GuardedPool<L> {
    pub(crate) fn checkpoint(&self) -> Checkpoint<L::Snapshot> {
        Checkpoint {
            state: self.state.clone(),
            tokens: self.tokens.snapshot(),
            events_len: self.events.len(),
        }
    }

    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint<L::Snapshot>) {
        self.state = checkpoint.state;
        self.tokens.restore(checkpoint.tokens);
        self.events.truncate(checkpoint.events_len);
    }

    /// Runs `body` under the reentrancy lock, committing on `Ok` and
    /// rolling back on `Err`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the lock is already held; nothing runs.
    /// - Whatever `body` returns.
    pub(crate) fn atomic<T>(
        &mut self,
        operation: &'static str,
        body: impl FnOnce(&mut Self) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        self.lock.acquire()?;
        let checkpoint = self.checkpoint();
        tracing::debug!(operation, "envelope entered");

        let result = body(self);
        match &result {
            Ok(_) => tracing::debug!(operation, "envelope committed"),
            Err(e) => {
                self.rollback(checkpoint);
                tracing::debug!(operation, error = %e, "envelope rolled back");
            }
        }

        self.lock.release();
        result
    }
}
