//! Journal entry domain types.
//!
//! This module defines the types used for creating and validating
//! journal entries in the double-entry bookkeeping system.

use chrono::NaiveDate;
use ledgera_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The debit-or-credit amount of a single journal line.
///
/// A line carries exactly one side. The invalid state of a line with
/// both a debit and a credit amount is unrepresentable here; storage
/// enforces the same rule with a check constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "side", content = "amount", rename_all = "lowercase")]
pub enum LineAmount {
    /// Debit line (increases asset/expense accounts).
    Debit(Decimal),
    /// Credit line (increases liability/equity/revenue accounts).
    Credit(Decimal),
}

impl LineAmount {
    /// Returns the magnitude of the line regardless of side.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        match self {
            Self::Debit(amount) | Self::Credit(amount) => amount,
        }
    }

    /// Returns the debit amount (zero for a credit line).
    #[must_use]
    pub fn debit(self) -> Decimal {
        match self {
            Self::Debit(amount) => amount,
            Self::Credit(_) => Decimal::ZERO,
        }
    }

    /// Returns the credit amount (zero for a debit line).
    #[must_use]
    pub fn credit(self) -> Decimal {
        match self {
            Self::Debit(_) => Decimal::ZERO,
            Self::Credit(amount) => amount,
        }
    }

    /// Returns true for a debit line.
    #[must_use]
    pub const fn is_debit(self) -> bool {
        matches!(self, Self::Debit(_))
    }

    /// Returns the opposite side with the same magnitude.
    ///
    /// Reversing entries are built by swapping every line.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::Debit(amount) => Self::Credit(amount),
            Self::Credit(amount) => Self::Debit(amount),
        }
    }
}

/// Journal entry lifecycle status.
///
/// Entries move `draft -> posted -> reversed`. No transition leaves
/// `reversed` and nothing ever returns to `draft`. Draft entries may
/// also be soft-deleted instead of posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Entry is being drafted; invisible to the ledger.
    Draft,
    /// Entry is posted to the ledger (immutable except for reversal).
    Posted,
    /// Entry has been cancelled by a compensating entry (immutable).
    Reversed,
}

impl JournalStatus {
    /// Returns true if the entry can still be modified.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry may be posted.
    #[must_use]
    pub fn can_post(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry may be reversed.
    #[must_use]
    pub fn can_reverse(self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Returns true if the entry may be soft-deleted.
    ///
    /// Posted entries are undone by reversal, never by deletion.
    #[must_use]
    pub fn can_delete(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns the lowercase name used in storage and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
        }
    }
}

impl std::fmt::Display for JournalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for a single journal line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalItemInput {
    /// Chart of accounts code this line posts to.
    pub coa_code: String,
    /// Optional memo for this line.
    pub description: Option<String>,
    /// Debit or credit amount.
    pub amount: LineAmount,
}

/// Input for creating a journal entry.
///
/// Totals are deliberately absent: the engine recomputes them from the
/// items and never trusts caller-supplied sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntryInput {
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
    /// Free-text description of the financial event.
    pub description: String,
    /// Optional kind of the originating source document (sale, purchase, ...).
    pub reference_type: Option<String>,
    /// Optional id of the originating source document.
    pub reference_id: Option<Uuid>,
    /// Ordered line items.
    pub items: Vec<JournalItemInput>,
}

/// Totals recomputed from an entry's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Sum of all debit line amounts.
    pub total_debit: Decimal,
    /// Sum of all credit line amounts.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals and computes the balanced flag.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }
}

/// A journal line whose account code resolved against the chart of accounts.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    /// The resolved account.
    pub account_id: AccountId,
    /// The account code as submitted.
    pub coa_code: String,
    /// Optional memo for this line.
    pub description: Option<String>,
    /// Debit or credit amount.
    pub amount: LineAmount,
}
