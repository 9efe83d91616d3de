// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: &str = "R$";

/// Two decimal places, half away from zero, always padded.
pub fn format_amount(d: Decimal) -> String {
    let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

pub fn format_currency(d: Decimal) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_amount(d))
}

/// Share of `part` in `total` as a percentage with one decimal place.
pub fn percentage(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / total)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_percentage(p: Decimal) -> String {
    format!("{:.1}%", p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn pads_to_two_decimals() {
        assert_eq!(format_amount(dec("5")), "5.00");
        assert_eq!(format_amount(dec("5.1")), "5.10");
        assert_eq!(format_amount(dec("0")), "0.00");
        assert_eq!(format_amount(dec("1234.5")), "1234.50");
    }

    #[test]
    fn rounds_midpoint_away_from_zero() {
        assert_eq!(format_amount(dec("5.005")), "5.01");
        assert_eq!(format_amount(dec("5.004")), "5.00");
        assert_eq!(format_amount(dec("-2.5")), "-2.50");
        assert_eq!(format_amount(dec("-2.345")), "-2.35");
    }

    #[test]
    fn currency_has_symbol() {
        assert_eq!(format_currency(dec("10")), "R$ 10.00");
    }

    #[test]
    fn percentage_of_total() {
        assert_eq!(percentage(dec("25"), dec("200")), dec("12.5"));
        assert_eq!(percentage(dec("1"), dec("3")), dec("33.3"));
        assert_eq!(percentage(dec("5"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(format_percentage(dec("12.5")), "12.5%");
    }
}
