use colored::*;
use rust_decimal::Decimal;
use sourcing_common::money::{self, Money};

use crate::terminal::colors;

/// `$12.50`, `-$3.00`.
pub fn money(amount: Money) -> String {
    let rounded = money::round_cents(amount);
    if rounded < Money::ZERO {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded)
    }
}

pub fn percent(value: Decimal) -> String {
    format!("{:.2}%", money::round_cents(value))
}

/// Share in `[0, 1]` shown as a percentage.
pub fn ratio(ratio: Decimal) -> String {
    percent(ratio * Decimal::ONE_HUNDRED)
}

/// Savings and their percentage, green when under budget and red when over.
pub fn efficiency(amount: Money, percentage: Decimal) -> ColoredString {
    let text = format!("{} ({})", money(amount), percent(percentage));
    if amount < Money::ZERO {
        text.color(colors::LOSS).bold()
    } else {
        text.color(colors::GAIN).bold()
    }
}
