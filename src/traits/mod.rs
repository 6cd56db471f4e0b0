//! Capabilities the pool consumes from its collaborators.
//!
//! [`TokenLedger`] moves tokens; [`FlashBorrower`] is the callback a
//! strategy contract implements to receive flash loans.

mod flash_borrower;
mod token_ledger;

pub use flash_borrower::FlashBorrower;
pub use token_ledger::TokenLedger;
