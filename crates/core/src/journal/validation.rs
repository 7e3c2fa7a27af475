//! Journal entry validation rules.
//!
//! All rules run before anything is persisted. A rejected entry leaves
//! no trace in storage.

use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{EntryTotals, JournalItemInput, LineAmount};

/// Validates journal line items and recomputes the entry totals.
///
/// Rules, checked in order:
/// 1. at least one line item;
/// 2. every line amount strictly positive;
/// 3. at least one debit line and one credit line;
/// 4. total debits equal total credits.
///
/// Totals are always recomputed from the items. Caller-supplied sums
/// are never trusted, so a balanced-looking header over unbalanced
/// lines cannot slip through.
///
/// # Errors
///
/// Returns the first violated rule as a [`JournalError`].
pub fn validate_items(items: &[JournalItemInput]) -> Result<EntryTotals, JournalError> {
    if items.is_empty() {
        return Err(JournalError::EmptyEntry);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for item in items {
        let amount = item.amount.amount();
        if amount.is_zero() {
            return Err(JournalError::ZeroAmount);
        }
        if amount < Decimal::ZERO {
            return Err(JournalError::NegativeAmount(amount));
        }

        match item.amount {
            LineAmount::Debit(amount) => {
                total_debit += amount;
                has_debit = true;
            }
            LineAmount::Credit(amount) => {
                total_credit += amount;
                has_credit = true;
            }
        }
    }

    if !has_debit || !has_credit {
        return Err(JournalError::SingleSided);
    }

    if total_debit != total_credit {
        return Err(JournalError::Unbalanced {
            total_debit,
            total_credit,
        });
    }

    Ok(EntryTotals::new(total_debit, total_credit))
}
