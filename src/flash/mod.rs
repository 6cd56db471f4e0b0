//! Flash-loan settlement protocol and strategy registry.
//!
//! A loan is driven by [`GuardedPool::flash_loan`](crate::pool::GuardedPool::flash_loan)
//! through the [`FlashLoanPhase`] state machine held in a
//! [`FlashLoanSession`]. Only borrowers in the [`StrategyRegistry`] may
//! borrow. The fee is a basis-point rate of principal, rounded up, and is
//! retained in the lent token's reserve.

mod registry;
mod session;

pub use registry::StrategyRegistry;
pub use session::{FlashLoanPhase, FlashLoanReceipt, FlashLoanSession, FlashLoanTerms};
