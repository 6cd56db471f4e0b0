//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the value types that model the pool's world:
//! identities, tokens, raw amounts, shares, fee rates, block time and
//! the receipts returned by entry points. Newtypes with validated
//! constructors enforce their invariants.

mod address;
mod amount;
mod basis_points;
mod context;
mod decimals;
mod direction;
mod fee_tier;
mod receipts;
mod rounding;
mod shares;
mod token;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub(crate) use basis_points::BPS_DENOMINATOR;
pub use basis_points::BasisPoints;
pub use context::{BlockHeight, CallContext, Timestamp};
pub use decimals::Decimals;
pub use direction::{PoolSide, SwapDirection};
pub use fee_tier::FeeTier;
pub use receipts::{DepositReceipt, SwapReceipt, WithdrawalReceipt};
pub use rounding::Rounding;
pub use shares::Shares;
pub use token::Token;
pub use token_pair::TokenPair;
