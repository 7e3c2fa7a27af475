//! Journal entry engine.
//!
//! Pure business logic for double-entry journal entries: input shapes,
//! balance validation, account resolution, entry numbering, the posting
//! status machine, and reversal construction. No storage access; the
//! database layer injects lookups as closures.

pub mod error;
pub mod number;
pub mod reversal;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod reversal_props;

#[cfg(test)]
mod validation_props;

pub use error::JournalError;
pub use number::{ENTRY_NUMBER_PREFIX, format_entry_number, random_suffix};
pub use reversal::{REVERSAL_REFERENCE_TYPE, ReversalInput, ReversalService, reversal_description};
pub use service::JournalService;
pub use types::{
    CreateEntryInput, EntryTotals, JournalItemInput, JournalStatus, LineAmount, ResolvedItem,
};
pub use validation::validate_items;
