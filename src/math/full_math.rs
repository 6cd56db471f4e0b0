//! Multiply-then-divide with a wide intermediate.
//!
//! Reserves of 18-decimal tokens make `a * b` overflow `u128` long before
//! the quotient does, so every ratio in the engine goes through
//! [`mul_div`], which forms the product as a [`BigUint`] and only narrows
//! the final quotient.
//!
//! # Convention
//!
//! **Always round against the user** (protocol-favorable):
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal payout, minted shares, paired deposit quote | [`Rounding::Down`] |
//! | Flash-loan fee, reported price impact | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use sentinel_amm::domain::Rounding;
//! use sentinel_amm::math::mul_div;
//!
//! let e18 = 10u128.pow(18);
//! // 100k * 100k tokens overflows u128 but the ratio does not
//! let out = mul_div(100_000 * e18, 100_000 * e18, 200_000 * e18, Rounding::Down);
//! assert_eq!(out, Ok(50_000 * e18));
//! assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
//! ```

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::domain::Rounding;
use crate::error::AmmError;

/// Computes `a * b / denominator` with an unbounded intermediate.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let numerator = BigUint::from(a) * BigUint::from(b);
    let denominator = BigUint::from(denominator);
    let quotient = &numerator / &denominator;
    let quotient = if rounding.is_up() && !(&numerator % &denominator).is_zero() {
        quotient + 1u32
    } else {
        quotient
    };
    quotient
        .to_u128()
        .ok_or(AmmError::Overflow("mul_div quotient exceeds u128"))
}

/// Returns the exact product `a * b`.
///
/// Used for the constant-product invariant `k = reserve_a * reserve_b`,
/// which is compared but never narrowed.
#[must_use]
pub fn wide_product(a: u128, b: u128) -> BigUint {
    BigUint::from(a) * BigUint::from(b)
}
