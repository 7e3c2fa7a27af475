//! Ledger view types.

use chrono::NaiveDate;
use ledgera_shared::types::JournalEntryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coa::AccountType;

/// A posted journal item as fetched from storage, before running
/// balances are attached.
///
/// Rows are expected in chronological order (entry date, then entry
/// number, then line number); the fold preserves their order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryRow {
    /// The journal entry this item belongs to.
    pub entry_id: JournalEntryId,
    /// Human-readable entry number.
    pub entry_number: String,
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
    /// Line memo, falling back to the entry description.
    pub description: String,
    /// Debit amount (zero for credit lines).
    pub debit: Decimal,
    /// Credit amount (zero for debit lines).
    pub credit: Decimal,
}

/// One posting in a ledger view, with its running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    /// The journal entry this item belongs to.
    pub entry_id: JournalEntryId,
    /// Human-readable entry number.
    pub entry_number: String,
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
    /// Line memo, falling back to the entry description.
    pub description: String,
    /// Debit amount (zero for credit lines).
    pub debit: Decimal,
    /// Credit amount (zero for debit lines).
    pub credit: Decimal,
    /// Account balance after this posting.
    pub running_balance: Decimal,
}

/// Per-account ledger over a reporting window.
///
/// Derived, never persisted: rebuilt from posted journal items on every
/// read, so two reads with identical arguments and no intervening
/// writes return identical views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerAccountView {
    /// Account code.
    pub coa_code: String,
    /// Account name.
    pub coa_name: String,
    /// Account classification, which fixes the sign convention.
    pub account_type: AccountType,
    /// Balance carried from all posted history before the window.
    pub opening_balance: Decimal,
    /// Postings within the window, in chronological order.
    pub lines: Vec<LedgerLine>,
    /// Sum of debits within the window.
    pub total_debit: Decimal,
    /// Sum of credits within the window.
    pub total_credit: Decimal,
    /// The last running balance, or the opening balance for an empty
    /// window.
    pub closing_balance: Decimal,
}
