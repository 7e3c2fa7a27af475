//! Property-based tests for reversal construction.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use ledgera_shared::types::JournalEntryId;

use super::reversal::{REVERSAL_REFERENCE_TYPE, ReversalInput, ReversalService};
use super::types::{JournalItemInput, LineAmount};

/// Strategy for generating positive line amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a line on either side.
fn line_amount() -> impl Strategy<Value = LineAmount> {
    prop_oneof![
        positive_amount().prop_map(LineAmount::Debit),
        positive_amount().prop_map(LineAmount::Credit),
    ]
}

/// Strategy for a journal line with an arbitrary code and optional memo.
fn journal_item() -> impl Strategy<Value = JournalItemInput> {
    ("[1-5][0-9]{3}", prop::option::of("[a-z ]{1,20}"), line_amount()).prop_map(
        |(coa_code, description, amount)| JournalItemInput {
            coa_code,
            description,
            amount,
        },
    )
}

/// Strategy for a reversal request over an arbitrary original entry.
fn reversal_input() -> impl Strategy<Value = ReversalInput> {
    (prop::collection::vec(journal_item(), 1..8), "[A-Za-z ]{1,30}").prop_map(|(items, reason)| {
        ReversalInput {
            original_id: JournalEntryId::new(),
            original_entry_number: "JE-260115-0042".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            reason,
            items,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* original entry, the reversal carries the same lines in
    /// the same order with debits and credits swapped.
    #[test]
    fn prop_reversal_swaps_every_line(input in reversal_input()) {
        let reversal = ReversalService::build_reversal(&input);

        prop_assert_eq!(reversal.items.len(), input.items.len());
        for (original, reversed) in input.items.iter().zip(reversal.items.iter()) {
            prop_assert_eq!(reversed.amount, original.amount.swapped());
            prop_assert_eq!(&reversed.coa_code, &original.coa_code);
            prop_assert_eq!(&reversed.description, &original.description);
        }
    }

    /// *For any* original entry, posting the original together with its
    /// reversal nets every account to zero.
    #[test]
    fn prop_original_plus_reversal_nets_to_zero(input in reversal_input()) {
        let reversal = ReversalService::build_reversal(&input);

        let mut net: HashMap<String, Decimal> = HashMap::new();
        for item in input.items.iter().chain(reversal.items.iter()) {
            let signed = item.amount.debit() - item.amount.credit();
            *net.entry(item.coa_code.clone()).or_insert(Decimal::ZERO) += signed;
        }

        for (coa_code, balance) in net {
            prop_assert_eq!(balance, Decimal::ZERO, "account {} did not net out", coa_code);
        }
    }

    /// *For any* line amount, swapping sides twice returns the original.
    #[test]
    fn prop_double_swap_is_identity(amount in line_amount()) {
        prop_assert_eq!(amount.swapped().swapped(), amount);
    }

    /// *For any* reversal, the output references the original entry and
    /// keeps its accounting date.
    #[test]
    fn prop_reversal_references_original(input in reversal_input()) {
        let reversal = ReversalService::build_reversal(&input);

        prop_assert_eq!(
            reversal.reference_type.as_deref(),
            Some(REVERSAL_REFERENCE_TYPE)
        );
        prop_assert_eq!(reversal.reference_id, Some(input.original_id.into_inner()));
        prop_assert_eq!(reversal.entry_date, input.entry_date);
        prop_assert!(reversal.description.contains(&input.original_entry_number));
        prop_assert!(reversal.description.contains(&input.reason));
    }

    /// *For any* set of lines, swapping sides preserves whether the set
    /// balances. A valid original therefore yields a valid reversal.
    #[test]
    fn prop_swapping_preserves_balance(input in reversal_input()) {
        let reversal = ReversalService::build_reversal(&input);

        prop_assert_eq!(
            ReversalService::validate_reversal(&reversal.items),
            ReversalService::validate_reversal(&input.items)
        );
    }
}
