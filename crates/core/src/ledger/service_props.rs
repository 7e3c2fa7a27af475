//! Property-based tests for ledger view construction.

use chrono::NaiveDate;
use ledgera_shared::types::{AccountId, JournalEntryId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::coa::{Account, AccountType, BalanceSide};

use super::balance::balance_change;
use super::service::LedgerService;
use super::types::LedgerEntryRow;

fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Revenue),
        Just(AccountType::Expense),
    ]
}

fn make_account(account_type: AccountType) -> Account {
    Account {
        id: AccountId::new(),
        code: format!("{}100", account_type.code_prefix()),
        name: format!("{account_type} account"),
        account_type,
        is_active: true,
    }
}

/// Strategy for posted rows: each carries either a debit or a credit,
/// never both, matching the storage check constraint.
fn row_strategy() -> impl Strategy<Value = LedgerEntryRow> {
    (1i64..100_000_000i64, any::<bool>(), 0u32..364).prop_map(|(cents, is_debit, day_offset)| {
        let amount = Decimal::new(cents, 2);
        let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        LedgerEntryRow {
            entry_id: JournalEntryId::new(),
            entry_number: format!("JE-260101-{:04}", day_offset % 10_000),
            entry_date: base + chrono::Days::new(u64::from(day_offset)),
            description: "generated posting".to_string(),
            debit: if is_debit { amount } else { Decimal::ZERO },
            credit: if is_debit { Decimal::ZERO } else { amount },
        }
    })
}

fn rows_strategy(max_len: usize) -> impl Strategy<Value = Vec<LedgerEntryRow>> {
    prop::collection::vec(row_strategy(), 0..=max_len)
}

/// Swaps every row's debit and credit, as a posted reversal would.
fn swap_rows(rows: &[LedgerEntryRow]) -> Vec<LedgerEntryRow> {
    rows.iter()
        .map(|row| LedgerEntryRow {
            entry_id: JournalEntryId::new(),
            entry_number: row.entry_number.clone(),
            entry_date: row.entry_date,
            description: row.description.clone(),
            debit: row.credit,
            credit: row.debit,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* account type and window, the closing balance equals
    /// the opening balance plus the signed sum of the window rows.
    #[test]
    fn prop_closing_balance_identity(
        account_type in account_type_strategy(),
        opening_rows in rows_strategy(10),
        window_rows in rows_strategy(20),
    ) {
        let account = make_account(account_type);
        let side = account_type.normal_balance();

        let view =
            LedgerService::build_account_view(&account, &opening_rows, window_rows.clone());

        let signed_sum: Decimal = window_rows
            .iter()
            .map(|row| balance_change(side, row.debit, row.credit))
            .sum();
        prop_assert_eq!(view.closing_balance, view.opening_balance + signed_sum);

        // For debit-normal accounts this is the familiar
        // opening + total_debit - total_credit identity.
        if side == BalanceSide::DebitNormal {
            prop_assert_eq!(
                view.closing_balance,
                view.opening_balance + view.total_debit - view.total_credit
            );
        }
    }

    /// *For any* inputs, building the view twice yields identical
    /// results (reads are idempotent).
    #[test]
    fn prop_build_is_idempotent(
        account_type in account_type_strategy(),
        opening_rows in rows_strategy(5),
        window_rows in rows_strategy(10),
    ) {
        let account = make_account(account_type);

        let first =
            LedgerService::build_account_view(&account, &opening_rows, window_rows.clone());
        let second = LedgerService::build_account_view(&account, &opening_rows, window_rows);

        prop_assert_eq!(first.opening_balance, second.opening_balance);
        prop_assert_eq!(first.closing_balance, second.closing_balance);
        prop_assert_eq!(first.lines.len(), second.lines.len());
        for (a, b) in first.lines.iter().zip(second.lines.iter()) {
            prop_assert_eq!(a.running_balance, b.running_balance);
        }
    }

    /// *For any* window, appending the side-swapped copy of every row
    /// nets the account back to its opening balance.
    #[test]
    fn prop_reversal_nets_to_opening(
        account_type in account_type_strategy(),
        opening_rows in rows_strategy(5),
        window_rows in rows_strategy(10),
    ) {
        let account = make_account(account_type);

        let mut with_reversals = window_rows.clone();
        with_reversals.extend(swap_rows(&window_rows));

        let view = LedgerService::build_account_view(&account, &opening_rows, with_reversals);

        prop_assert_eq!(view.closing_balance, view.opening_balance);
    }

    /// *For any* non-empty window, the last line's running balance is
    /// the closing balance and every line preserves input order.
    #[test]
    fn prop_last_running_balance_is_closing(
        account_type in account_type_strategy(),
        window_rows in rows_strategy(15),
    ) {
        let account = make_account(account_type);
        let view = LedgerService::build_account_view(&account, &[], window_rows.clone());

        prop_assert_eq!(view.lines.len(), window_rows.len());
        if let Some(last) = view.lines.last() {
            prop_assert_eq!(last.running_balance, view.closing_balance);
        } else {
            prop_assert_eq!(view.closing_balance, view.opening_balance);
        }
        for (line, row) in view.lines.iter().zip(window_rows.iter()) {
            prop_assert_eq!(line.entry_date, row.entry_date);
            prop_assert_eq!(line.debit, row.debit);
            prop_assert_eq!(line.credit, row.credit);
        }
    }
}
