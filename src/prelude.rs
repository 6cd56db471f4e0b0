//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use sentinel_amm::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, BlockHeight, CallContext, Decimals, DepositReceipt, FeeTier,
    PoolSide, Rounding, Shares, SwapDirection, SwapReceipt, Timestamp, Token, TokenPair,
    WithdrawalReceipt,
};

pub use crate::config::{EngineConfig, GuardConfig};
pub use crate::error::{AmmError, Result};
pub use crate::events::{FlashLoanOutcome, PoolEvent};
pub use crate::flash::{FlashLoanPhase, FlashLoanReceipt, FlashLoanTerms};
pub use crate::guard::{GuardChain, GuardCheck, GuardRequest, TraderActivity};
pub use crate::math::{CheckedArithmetic, SwapQuote};
pub use crate::pool::{BorrowerAccount, GuardedPool};
pub use crate::tokens::InMemoryTokenLedger;
pub use crate::traits::{FlashBorrower, TokenLedger};
