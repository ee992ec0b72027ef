//! Pure fee and total arithmetic.
//!
//! Everything here is side-effect free: the functions consume plain numbers
//! and return plain numbers. Malformed numeric input never raises; it
//! degrades to zero so a blank or garbled field behaves exactly like an
//! explicit "0" entry.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{BillItem, ItemType};

/// Whether the discount field is a fixed currency amount or a percentage of
/// the pre-discount subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountMode {
    Fixed,
    Percent,
}

/// The four category subtotals that sum to the pre-discount amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeBreakdown {
    pub consultation: Decimal,
    pub medicine: Decimal,
    pub test: Decimal,
    pub other: Decimal,
}

impl FeeBreakdown {
    pub fn subtotal(&self) -> Decimal {
        self.consultation + self.medicine + self.test + self.other
    }
}

/// Parse a monetary text field, substituting zero for anything unparsable.
pub fn parse_amount(input: &str) -> Decimal {
    Decimal::from_str_exact(input.trim()).unwrap_or(Decimal::ZERO)
}

/// Parse a quantity text field, substituting zero for anything unparsable.
pub fn parse_quantity(input: &str) -> i64 {
    input.trim().parse().unwrap_or(0)
}

/// `quantity * unit_price`.
///
/// Negative quantities are not rejected here; they propagate into the line
/// total and act as manual corrections.
pub fn line_total(quantity: i64, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Discount expressed as an amount.
///
/// In percentage mode the input is clamped at 100 before applying, so a
/// discount can never exceed the subtotal through that path.
pub fn discount_amount(subtotal: Decimal, discount: Decimal, mode: DiscountMode) -> Decimal {
    match mode {
        DiscountMode::Fixed => discount,
        DiscountMode::Percent => {
            let percent = discount.min(Decimal::ONE_HUNDRED);
            subtotal * percent / Decimal::ONE_HUNDRED
        }
    }
}

/// Final bill total: `subtotal - discount`, rounded to 2 decimal places.
pub fn bill_total(fees: &FeeBreakdown, discount: Decimal, mode: DiscountMode) -> Decimal {
    let subtotal = fees.subtotal();
    let total = subtotal - discount_amount(subtotal, discount, mode);
    total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum item line totals into category fees.
///
/// Consultation, Medicine and Test map to their own buckets; every other
/// item type lands in `other`.
pub fn breakdown_from_items<'a>(items: impl IntoIterator<Item = &'a BillItem>) -> FeeBreakdown {
    let mut fees = FeeBreakdown::default();
    for item in items {
        let total = item.total_price();
        match item.item_type {
            ItemType::Consultation => fees.consultation += total,
            ItemType::Medicine => fees.medicine += total,
            ItemType::Test => fees.test += total,
            _ => fees.other += total,
        }
    }
    fees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn fees(c: &str, m: &str, t: &str, o: &str) -> FeeBreakdown {
        FeeBreakdown {
            consultation: dec(c),
            medicine: dec(m),
            test: dec(t),
            other: dec(o),
        }
    }

    #[test]
    fn fixed_discount_total() {
        // fees (500, 200, 150, 0), discount 50 fixed -> 800.00
        let total = bill_total(&fees("500", "200", "150", "0"), dec("50"), DiscountMode::Fixed);
        assert_eq!(total, dec("800.00"));
        assert_eq!(format!("{total:.2}"), "800.00");
    }

    #[test]
    fn percent_discount_total() {
        // same fees, 10 percent -> subtotal 850, discount 85, total 765.00
        let breakdown = fees("500", "200", "150", "0");
        assert_eq!(discount_amount(breakdown.subtotal(), dec("10"), DiscountMode::Percent), dec("85"));
        let total = bill_total(&breakdown, dec("10"), DiscountMode::Percent);
        assert_eq!(total, dec("765.00"));
    }

    #[test]
    fn percent_discount_clamps_at_100() {
        let breakdown = fees("100", "0", "0", "0");
        let total = bill_total(&breakdown, dec("150"), DiscountMode::Percent);
        assert_eq!(total, Decimal::ZERO);
        assert_eq!(
            discount_amount(breakdown.subtotal(), dec("150"), DiscountMode::Percent),
            dec("100")
        );
    }

    #[test]
    fn percent_matches_formula_for_various_inputs() {
        let breakdown = fees("123.45", "67.89", "0.01", "8.65");
        for pct in ["0", "12.5", "33", "99.99", "100"] {
            let expected = (breakdown.subtotal()
                - breakdown.subtotal() * dec(pct) / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(bill_total(&breakdown, dec(pct), DiscountMode::Percent), expected);
        }
    }

    #[test]
    fn blank_and_garbage_fields_behave_like_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12.3.4"), Decimal::ZERO);
        assert_eq!(parse_amount(" 42.50 "), dec("42.50"));
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("three"), 0);
        assert_eq!(parse_quantity(" 7 "), 7);

        // Same total with parsed-garbage fees as with explicit zeros.
        let garbled = FeeBreakdown {
            consultation: parse_amount("500"),
            medicine: parse_amount(""),
            test: parse_amount("n/a"),
            other: parse_amount("0"),
        };
        assert_eq!(
            bill_total(&garbled, parse_amount(""), DiscountMode::Fixed),
            bill_total(&fees("500", "0", "0", "0"), Decimal::ZERO, DiscountMode::Fixed)
        );
    }

    #[test]
    fn line_total_multiplies_quantity_and_price() {
        assert_eq!(line_total(3, dec("25.50")), dec("76.50"));
        assert_eq!(line_total(0, dec("99.99")), Decimal::ZERO);
    }

    #[test]
    fn negative_quantity_propagates_into_line_total() {
        assert_eq!(line_total(-2, dec("10")), dec("-20"));
    }

    #[test]
    fn items_group_into_category_buckets() {
        let items = vec![
            BillItem::new("Consult", ItemType::Consultation, 1, dec("500")),
            BillItem::new("Amoxicillin", ItemType::Medicine, 2, dec("50")),
            BillItem::new("Paracetamol", ItemType::Medicine, 1, dec("100")),
            BillItem::new("Blood panel", ItemType::Test, 1, dec("150")),
            BillItem::new("Ward bed", ItemType::Room, 2, dec("75")),
            BillItem::new("Dressing", ItemType::Service, 1, dec("25")),
        ];
        let fees = breakdown_from_items(&items);
        assert_eq!(fees.consultation, dec("500"));
        assert_eq!(fees.medicine, dec("200"));
        assert_eq!(fees.test, dec("150"));
        assert_eq!(fees.other, dec("175"));
        assert_eq!(fees.subtotal(), dec("1025"));
    }

    #[test]
    fn unrecognized_item_type_names_fall_back_to_other() {
        assert_eq!(ItemType::from_name("medicine"), ItemType::Medicine);
        assert_eq!(ItemType::from_name("  TEST "), ItemType::Test);
        assert_eq!(ItemType::from_name("X-Ray"), ItemType::Other);
        assert_eq!(ItemType::from_name(""), ItemType::Other);
    }

    #[test]
    fn total_rounds_to_two_decimal_places() {
        let breakdown = fees("33.335", "0", "0", "0");
        assert_eq!(bill_total(&breakdown, Decimal::ZERO, DiscountMode::Fixed), dec("33.34"));
        // Percentage discounts can produce long fractions; the total stays at 2dp.
        let breakdown = fees("100", "0", "0", "0");
        assert_eq!(bill_total(&breakdown, dec("33.333"), DiscountMode::Percent), dec("66.67"));
    }
}
