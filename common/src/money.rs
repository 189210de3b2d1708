//! Monetary helpers.
//!
//! All amounts are [`Decimal`] values with 2-decimal currency semantics. Values are only
//! rounded where a share of an amount is produced; inputs are kept as entered.
//!
//! `Decimal` operators panic on overflow. Arithmetic over user-supplied amounts goes
//! through the checked helpers here, which report [`InvalidInput::AmountOutOfRange`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::InvalidInput;

/// Currency amount.
pub type Money = Decimal;

/// Number of decimal places of a currency amount.
pub const CENT_PLACES: u32 = 2;

/// The smallest currency unit.
pub const CENT: Money = Decimal::from_parts(1, 0, 0, false, CENT_PLACES);

/// Rounds `amount` to whole cents, halves away from zero.
pub fn round_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `a + b`, failing with `field` named when the sum leaves the representable range.
pub fn add(a: Money, b: Money, field: &'static str) -> Result<Money, InvalidInput> {
    a.checked_add(b).ok_or(InvalidInput::AmountOutOfRange { field })
}

/// Checked sum of `amounts`. Zero for an empty sequence.
pub fn sum<I>(amounts: I, field: &'static str) -> Result<Money, InvalidInput>
where
    I: IntoIterator<Item = Money>,
{
    amounts
        .into_iter()
        .try_fold(Money::ZERO, |acc, amount| add(acc, amount, field))
}

/// Returns `part / whole * 100` rounded to cents, or zero when `whole` is zero.
pub fn percentage(part: Money, whole: Money) -> Result<Decimal, InvalidInput> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(whole)
        .and_then(|quotient| quotient.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_cents)
        .ok_or(InvalidInput::AmountOutOfRange { field: "percentage" })
}
