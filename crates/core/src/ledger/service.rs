//! Ledger view construction.
//!
//! Pure folds over already-fetched rows; the database layer is
//! responsible for selecting only posted, non-deleted items and for
//! ordering them chronologically.

use rust_decimal::Decimal;

use crate::coa::Account;

use super::balance::{RunningBalance, balance_change};
use super::types::{LedgerAccountView, LedgerEntryRow, LedgerLine};

/// Stateless service that folds posted rows into ledger views.
pub struct LedgerService;

impl LedgerService {
    /// Builds the ledger view for one account.
    ///
    /// `opening_rows` is the full posted history strictly before the
    /// window and only contributes to the opening balance;
    /// `window_rows` become lines with running balances. An account
    /// with no activity yields `closing_balance == opening_balance`
    /// and no lines, which is not an error.
    #[must_use]
    pub fn build_account_view(
        account: &Account,
        opening_rows: &[LedgerEntryRow],
        window_rows: Vec<LedgerEntryRow>,
    ) -> LedgerAccountView {
        let side = account.account_type.normal_balance();

        let opening_balance = opening_rows
            .iter()
            .map(|row| balance_change(side, row.debit, row.credit))
            .sum();

        let mut running = RunningBalance::opening(opening_balance);
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        let lines: Vec<LedgerLine> = window_rows
            .into_iter()
            .map(|row| {
                total_debit += row.debit;
                total_credit += row.credit;
                running = running.apply(balance_change(side, row.debit, row.credit));

                LedgerLine {
                    entry_id: row.entry_id,
                    entry_number: row.entry_number,
                    entry_date: row.entry_date,
                    description: row.description,
                    debit: row.debit,
                    credit: row.credit,
                    running_balance: running.current_balance,
                }
            })
            .collect();

        LedgerAccountView {
            coa_code: account.code.clone(),
            coa_name: account.name.clone(),
            account_type: account.account_type,
            opening_balance,
            lines,
            total_debit,
            total_credit,
            closing_balance: running.current_balance,
        }
    }
}
