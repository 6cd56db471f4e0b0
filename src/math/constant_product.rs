//! Constant-product pricing and liquidity formulas.
//!
//! The swap invariant is `x × y = k` where `x` and `y` are the reserves
//! of the two tokens. Fees are deducted from the input amount **before**
//! the pricing formula is applied, and stay in the pool.
//!
//! # Swap Algorithm
//!
//! 1. `net_input = amount_in × (10 000 − fee_bps) / 10 000` (floor)
//! 2. `amount_out = reserve_out × net_input / (reserve_in + net_input)` (floor)
//! 3. `reserve_in += amount_in`, `reserve_out -= amount_out`
//!
//! Because the denominator is strictly larger than `net_input`,
//! `amount_out < reserve_out` always holds and the pool cannot be drained.
//!
//! These functions are pure. State changes happen in
//! [`ReserveLedger`](crate::ledger::ReserveLedger).

use crate::domain::{Amount, BasisPoints, FeeTier, Rounding, Shares, BPS_DENOMINATOR};
use crate::error::AmmError;
use crate::math::mul_div;

/// Output of [`quote_swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapQuote {
    /// Amount the trader receives.
    pub amount_out: Amount,
    /// Part of the input retained as fee.
    pub fee: Amount,
}

/// Prices `amount_in` against the given reserves.
///
/// An output that floors to zero is returned as zero; callers decide
/// whether that is acceptable.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is empty.
/// - [`AmmError::InvalidConfiguration`] if the fee tier exceeds 100%.
/// - [`AmmError::Overflow`] if an intermediate sum overflows.
///
/// # Examples
///
/// ```
/// use sentinel_amm::domain::{Amount, FeeTier};
/// use sentinel_amm::math::quote_swap;
///
/// let e18 = 10u128.pow(18);
/// let reserve = Amount::new(100_000 * e18);
/// let q = quote_swap(Amount::new(e18), reserve, reserve, FeeTier::default()).expect("quote");
/// assert!(q.amount_out.get() < e18);
/// ```
pub fn quote_swap(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee_tier: FeeTier,
) -> Result<SwapQuote, AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    let net_input = fee_tier.net_of_fee(amount_in)?;
    let fee = amount_in
        .checked_sub(&net_input)
        .ok_or(AmmError::Underflow("fee exceeds input"))?;
    let denominator = reserve_in
        .checked_add(&net_input)
        .ok_or(AmmError::Overflow("swap denominator overflow"))?;
    let amount_out = mul_div(
        reserve_out.get(),
        net_input.get(),
        denominator.get(),
        Rounding::Down,
    )?;
    Ok(SwapQuote {
        amount_out: Amount::new(amount_out),
        fee,
    })
}

/// Returns the paired amount that keeps the pool ratio:
/// `amount × reserve_to / reserve_from`, floored.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is empty.
/// - [`AmmError::Overflow`] if the result does not fit.
pub fn quote_matching_deposit(
    amount: Amount,
    reserve_from: Amount,
    reserve_to: Amount,
) -> Result<Amount, AmmError> {
    if reserve_from.is_zero() || reserve_to.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    mul_div(
        amount.get(),
        reserve_to.get(),
        reserve_from.get(),
        Rounding::Down,
    )
    .map(Amount::new)
}

/// Shares minted for a ratio-matched deposit of `amount_a`:
/// `amount_a × total_shares / reserve_a`, floored.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if `reserve_a` is empty.
/// - [`AmmError::Overflow`] if the result does not fit.
pub fn shares_for_deposit(
    amount_a: Amount,
    reserve_a: Amount,
    total_shares: Shares,
) -> Result<Shares, AmmError> {
    if reserve_a.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    mul_div(
        amount_a.get(),
        total_shares.get(),
        reserve_a.get(),
        Rounding::Down,
    )
    .map(Shares::new)
}

/// Pro-rata payout for burning `shares`:
/// `(reserve_a × shares / total, reserve_b × shares / total)`, floored.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `total_shares` is zero.
/// - [`AmmError::InsufficientShares`] if `shares > total_shares`.
pub fn withdrawal_amounts(
    shares: Shares,
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Shares,
) -> Result<(Amount, Amount), AmmError> {
    if total_shares.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    if shares > total_shares {
        return Err(AmmError::InsufficientShares {
            requested: shares.get(),
            available: total_shares.get(),
        });
    }
    let a = mul_div(reserve_a.get(), shares.get(), total_shares.get(), Rounding::Down)?;
    let b = mul_div(reserve_b.get(), shares.get(), total_shares.get(), Rounding::Down)?;
    Ok((Amount::new(a), Amount::new(b)))
}

/// Size of `amount_in` relative to `reserve_in`, in basis points, rounded up.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if `reserve_in` is empty.
pub fn price_impact_bps(amount_in: Amount, reserve_in: Amount) -> Result<u128, AmmError> {
    if reserve_in.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    mul_div(
        amount_in.get(),
        u128::from(BPS_DENOMINATOR),
        reserve_in.get(),
        Rounding::Up,
    )
}

/// Returns `true` when `amount_in / reserve_in` is strictly above `max`.
///
/// Compared exactly as `amount_in × 10 000 > reserve_in × max`, so an
/// input of exactly the limit is allowed. An empty reserve makes every
/// non-zero input exceed the limit.
#[must_use]
pub fn exceeds_price_impact(amount_in: Amount, reserve_in: Amount, max: BasisPoints) -> bool {
    let lhs = super::wide_product(amount_in.get(), u128::from(BPS_DENOMINATOR));
    let rhs = super::wide_product(reserve_in.get(), u128::from(max.get()));
    lhs > rhs
}
