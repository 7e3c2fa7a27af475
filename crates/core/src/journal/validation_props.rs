//! Property-based tests for journal entry validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{JournalItemInput, LineAmount};
use super::validation::validate_items;

/// Strategy for generating positive line amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for picking an account code from a small chart.
fn coa_code() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("1100".to_string()),
        Just("1200".to_string()),
        Just("2100".to_string()),
        Just("4000".to_string()),
        Just("5100".to_string()),
    ]
}

fn debit_item(coa_code: String, amount: Decimal) -> JournalItemInput {
    JournalItemInput {
        coa_code,
        description: None,
        amount: LineAmount::Debit(amount),
    }
}

fn credit_item(coa_code: String, amount: Decimal) -> JournalItemInput {
    JournalItemInput {
        coa_code,
        description: None,
        amount: LineAmount::Credit(amount),
    }
}

/// Strategy for a balanced entry: every generated amount appears once as
/// a debit line and once as a credit line.
fn balanced_items() -> impl Strategy<Value = Vec<JournalItemInput>> {
    prop::collection::vec((coa_code(), coa_code(), positive_amount()), 1..8).prop_map(|triples| {
        let mut items = Vec::with_capacity(triples.len() * 2);
        for (debit_code, credit_code, amount) in triples {
            items.push(debit_item(debit_code, amount));
            items.push(credit_item(credit_code, amount));
        }
        items
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* balanced entry, validation succeeds and the recomputed
    /// totals equal the sum of each side.
    #[test]
    fn prop_balanced_entries_accepted(items in balanced_items()) {
        let expected: Decimal = items.iter().map(|item| item.amount.debit()).sum();

        let totals = validate_items(&items).unwrap();

        prop_assert_eq!(totals.total_debit, expected);
        prop_assert_eq!(totals.total_credit, expected);
        prop_assert!(totals.is_balanced);
    }

    /// *For any* balanced entry, inflating one debit line breaks the
    /// balance and the error reports both exact sums.
    #[test]
    fn prop_unbalanced_entries_report_exact_sums(
        items in balanced_items(),
        extra in positive_amount(),
    ) {
        let mut items = items;
        let inflated = items[0].amount.amount() + extra;
        items[0].amount = LineAmount::Debit(inflated);

        let total_debit: Decimal = items.iter().map(|item| item.amount.debit()).sum();
        let total_credit: Decimal = items.iter().map(|item| item.amount.credit()).sum();

        let err = validate_items(&items).unwrap_err();

        prop_assert_eq!(err, JournalError::Unbalanced { total_debit, total_credit });
    }

    /// *For any* entry containing a zero-amount line, validation fails
    /// before the balance check runs.
    #[test]
    fn prop_zero_amounts_rejected(
        items in balanced_items(),
        position in any::<prop::sample::Index>(),
    ) {
        let mut items = items;
        let idx = position.index(items.len());
        items[idx].amount = LineAmount::Debit(Decimal::ZERO);

        let err = validate_items(&items).unwrap_err();

        prop_assert_eq!(err, JournalError::ZeroAmount);
    }

    /// *For any* entry containing a negative line, validation fails and
    /// echoes the offending amount.
    #[test]
    fn prop_negative_amounts_rejected(
        items in balanced_items(),
        amount in positive_amount(),
    ) {
        let mut items = items;
        items[0].amount = LineAmount::Credit(-amount);

        let err = validate_items(&items).unwrap_err();

        prop_assert_eq!(err, JournalError::NegativeAmount(-amount));
    }

    /// *For any* set of debit-only lines, validation fails because an
    /// entry must touch both sides.
    #[test]
    fn prop_single_sided_entries_rejected(
        amounts in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let items: Vec<JournalItemInput> = amounts
            .into_iter()
            .map(|amount| debit_item("5100".to_string(), amount))
            .collect();

        let err = validate_items(&items).unwrap_err();

        prop_assert_eq!(err, JournalError::SingleSided);
    }
}

mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_smallest_representable_amount_accepted() {
        let items = vec![
            debit_item("1100".to_string(), dec!(0.01)),
            credit_item("4000".to_string(), dec!(0.01)),
        ];

        let totals = validate_items(&items).unwrap();

        assert_eq!(totals.total_debit, dec!(0.01));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_mixed_precision_sums_balance_exactly() {
        // 0.1 + 0.2 == 0.3 holds for decimals, unlike floats.
        let items = vec![
            debit_item("1100".to_string(), dec!(0.1)),
            debit_item("1200".to_string(), dec!(0.2)),
            credit_item("4000".to_string(), dec!(0.3)),
        ];

        let totals = validate_items(&items).unwrap();

        assert!(totals.is_balanced);
        assert_eq!(totals.total_credit, dec!(0.3));
    }
}
