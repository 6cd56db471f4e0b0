//! Reference implementations of the token capability.

mod in_memory;

pub use in_memory::InMemoryTokenLedger;
