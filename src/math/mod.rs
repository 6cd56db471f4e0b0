//! Arithmetic utilities for pool calculations.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on domain newtypes, [`mul_div`] for ratios whose intermediate product
//! exceeds `u128`, and the pure constant-product formulas used by the
//! swap engine and the liquidity manager.

mod checked;
mod constant_product;
mod full_math;

pub use checked::CheckedArithmetic;
pub use constant_product::{
    exceeds_price_impact, price_impact_bps, quote_matching_deposit, quote_swap,
    shares_for_deposit, withdrawal_amounts, SwapQuote,
};
pub use full_math::{mul_div, wide_product};
