//! Reversal of posted journal entries.
//!
//! A reversal never mutates the original entry. It assembles a new
//! compensating entry with every line's side swapped, dated like the
//! original, so the two entries net to zero for every affected account.

use chrono::NaiveDate;
use ledgera_shared::types::JournalEntryId;
use rust_decimal::Decimal;

use super::types::{CreateEntryInput, JournalItemInput};

/// Reference type recorded on compensating entries.
pub const REVERSAL_REFERENCE_TYPE: &str = "reversal";

/// Input for building a compensating entry.
#[derive(Debug, Clone)]
pub struct ReversalInput {
    /// The posted entry being reversed.
    pub original_id: JournalEntryId,
    /// The original's human-readable entry number.
    pub original_entry_number: String,
    /// Accounting date for the compensating entry (the original's date,
    /// so a ledger window covering the original also nets to zero).
    pub entry_date: NaiveDate,
    /// Why the entry is being reversed.
    pub reason: String,
    /// The original line items, in order.
    pub items: Vec<JournalItemInput>,
}

/// Stateless service that assembles compensating entries.
pub struct ReversalService;

impl ReversalService {
    /// Builds the compensating entry input for a posted entry.
    ///
    /// Every line keeps its account, memo, and magnitude with the side
    /// swapped. Line order is preserved. The compensating entry carries
    /// a `reversal` reference back to the original.
    #[must_use]
    pub fn build_reversal(input: &ReversalInput) -> CreateEntryInput {
        let items = input
            .items
            .iter()
            .map(|item| JournalItemInput {
                coa_code: item.coa_code.clone(),
                description: item.description.clone(),
                amount: item.amount.swapped(),
            })
            .collect();

        CreateEntryInput {
            entry_date: input.entry_date,
            description: reversal_description(&input.original_entry_number, &input.reason),
            reference_type: Some(REVERSAL_REFERENCE_TYPE.to_string()),
            reference_id: Some(input.original_id.into_inner()),
            items,
        }
    }

    /// Returns true when the original items are balanced.
    ///
    /// Posted entries always balance; `false` here means the stored rows
    /// are corrupt and the reversal must not proceed.
    #[must_use]
    pub fn validate_reversal(items: &[JournalItemInput]) -> bool {
        let total_debit: Decimal = items.iter().map(|item| item.amount.debit()).sum();
        let total_credit: Decimal = items.iter().map(|item| item.amount.credit()).sum();

        total_debit == total_credit
    }
}

/// Formats the description recorded on a compensating entry.
#[must_use]
pub fn reversal_description(original_entry_number: &str, reason: &str) -> String {
    format!("Reversal of {original_entry_number}: {reason}")
}
