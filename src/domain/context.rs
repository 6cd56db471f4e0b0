//! Block time and the per-call execution context.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Address;

/// A block number. Guard windows and cooldowns are measured in blocks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Creates a block height.
    #[must_use]
    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    /// Returns the raw block number.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Blocks elapsed since `earlier`, zero if `earlier` is in the future.
    #[must_use]
    pub const fn blocks_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// The block `n` blocks later.
    #[must_use]
    pub const fn advance(&self, n: u64) -> Self {
        Self(self.0.saturating_add(n))
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A block timestamp in seconds. Swap deadlines are expressed in it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the raw seconds.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The timestamp `seconds` later.
    #[must_use]
    pub const fn plus(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

/// Who is calling and when: the equivalent of `msg.sender`,
/// `block.number` and `block.timestamp`.
///
/// Every entry point of [`GuardedPool`](crate::pool::GuardedPool) takes one.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{Address, BlockHeight, CallContext, Timestamp};
///
/// let ctx = CallContext::new(Address::repeat_byte(7), BlockHeight::new(10), Timestamp::new(1_000));
/// let later = ctx.next_block(12);
/// assert_eq!(later.block, BlockHeight::new(11));
/// assert_eq!(later.timestamp, Timestamp::new(1_012));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    /// The immediate caller.
    pub caller: Address,
    /// The block the call executes in.
    pub block: BlockHeight,
    /// The timestamp of that block.
    pub timestamp: Timestamp,
}

impl CallContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(caller: Address, block: BlockHeight, timestamp: Timestamp) -> Self {
        Self {
            caller,
            block,
            timestamp,
        }
    }

    /// The same block, called by someone else.
    #[must_use]
    pub const fn with_caller(&self, caller: Address) -> Self {
        Self {
            caller,
            block: self.block,
            timestamp: self.timestamp,
        }
    }

    /// The next block, `block_time` seconds later.
    #[must_use]
    pub const fn next_block(&self, block_time: u64) -> Self {
        self.advance_blocks(1, block_time)
    }

    /// `blocks` blocks later, each `block_time` seconds apart.
    #[must_use]
    pub const fn advance_blocks(&self, blocks: u64, block_time: u64) -> Self {
        Self {
            caller: self.caller,
            block: self.block.advance(blocks),
            timestamp: self.timestamp.plus(blocks.saturating_mul(block_time)),
        }
    }
}
