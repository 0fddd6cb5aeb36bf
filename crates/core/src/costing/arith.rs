//! Overflow-safe decimal helpers.
//!
//! Costing degrades to zero instead of panicking when host-supplied figures
//! overflow the decimal range.

use rust_decimal::Decimal;

/// `a * b`, or zero on overflow.
pub(crate) fn product(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "decimal overflow in product, using zero");
        Decimal::ZERO
    })
}

/// `a + b`, or zero on overflow.
pub(crate) fn sum(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "decimal overflow in sum, using zero");
        Decimal::ZERO
    })
}

/// Sum of all values, or zero as soon as any addition overflows.
pub(crate) fn total(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .unwrap_or_else(|| {
            tracing::warn!("decimal overflow in total, using zero");
            Decimal::ZERO
        })
}

/// `a - b`, or zero on overflow.
pub(crate) fn difference(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "decimal overflow in difference, using zero");
        Decimal::ZERO
    })
}

/// `part / base * 100` rounded to `dp` places, or zero when `base <= 0`.
pub(crate) fn percent(part: Decimal, base: Decimal, dp: u32) -> Decimal {
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(base)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |pct| pct.round_dp(dp))
}
