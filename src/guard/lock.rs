//! Reentrancy lock.

use crate::error::AmmError;

/// A flag set for the whole duration of a mutating entry point.
///
/// It is acquired on entry and released on every exit path, including
/// errors, by [`GuardedPool`](crate::pool::GuardedPool). A call that finds
/// it engaged is nested inside another call on the same pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReentrancyLock {
    engaged: bool,
}

impl ReentrancyLock {
    /// Creates a released lock.
    #[must_use]
    pub const fn new() -> Self {
        Self { engaged: false }
    }

    /// `true` while an entry point is executing.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Engages the lock.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Reentrancy`] if it is already engaged.
    pub fn acquire(&mut self) -> Result<(), AmmError> {
        if self.engaged {
            return Err(AmmError::Reentrancy);
        }
        self.engaged = true;
        Ok(())
    }

    /// Releases the lock. Releasing a released lock is a no-op.
    pub fn release(&mut self) {
        self.engaged = false;
    }
}
