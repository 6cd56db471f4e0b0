//! Per-trader history consulted by the cooldown and frequency checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::GuardConfig;
use crate::domain::{Address, BlockHeight, SwapDirection};

/// What the guard remembers about one trader.
///
/// Created on the trader's first accepted swap and replaced on every
/// later one. A rejected swap never touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraderActivity {
    /// Block of the last accepted swap.
    pub last_trade_block: BlockHeight,
    /// First block of the current frequency window.
    pub window_start: BlockHeight,
    /// Accepted swaps inside the current window.
    pub trade_count_in_window: u32,
    /// Direction of the last accepted swap.
    pub last_direction: SwapDirection,
}

impl TraderActivity {
    /// Activity after a trader's very first swap.
    #[must_use]
    pub const fn first(block: BlockHeight, direction: SwapDirection) -> Self {
        Self {
            last_trade_block: block,
            window_start: block,
            trade_count_in_window: 1,
            last_direction: direction,
        }
    }

    /// `true` when the window that started at `window_start` has closed
    /// by `block`.
    #[must_use]
    pub const fn window_expired(&self, block: BlockHeight, window_blocks: u64) -> bool {
        block.blocks_since(self.window_start) >= window_blocks
    }

    /// Trades that count against the window at `block`: zero once the
    /// window has rolled over.
    #[must_use]
    pub const fn effective_count(&self, block: BlockHeight, window_blocks: u64) -> u32 {
        if self.window_expired(block, window_blocks) {
            0
        } else {
            self.trade_count_in_window
        }
    }

    /// Blocks left before the trader may trade again at `block`.
    #[must_use]
    pub const fn cooldown_remaining(&self, block: BlockHeight, cooldown_blocks: u64) -> u64 {
        cooldown_blocks.saturating_sub(block.blocks_since(self.last_trade_block))
    }

    /// The activity to store once a swap at `block` has been accepted.
    #[must_use]
    pub const fn record(
        &self,
        block: BlockHeight,
        direction: SwapDirection,
        config: &GuardConfig,
    ) -> Self {
        if self.window_expired(block, config.window_blocks) {
            return Self::first(block, direction);
        }
        Self {
            last_trade_block: block,
            window_start: self.window_start,
            trade_count_in_window: self.trade_count_in_window.saturating_add(1),
            last_direction: direction,
        }
    }
}

/// Activity of every trader who has ever swapped on the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraderBook {
    entries: BTreeMap<Address, TraderActivity>,
}

impl TraderBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activity of `trader`, if they have traded before.
    #[must_use]
    pub fn get(&self, trader: &Address) -> Option<TraderActivity> {
        self.entries.get(trader).copied()
    }

    /// Stores `activity` for `trader`.
    pub fn insert(&mut self, trader: Address, activity: TraderActivity) {
        self.entries.insert(trader, activity);
    }

    /// Number of traders tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nobody has traded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
