//! Journal entry number generation.
//!
//! Entry numbers follow the scheme `JE-yyMMdd-nnnn`, e.g.
//! `JE-260115-0042`. The suffix is random, not sequential; uniqueness is
//! guaranteed by the storage layer's unique constraint, and callers
//! regenerate on a collision instead of trusting improbability.

use chrono::NaiveDate;
use uuid::Uuid;

/// Prefix shared by all journal entry numbers.
pub const ENTRY_NUMBER_PREFIX: &str = "JE";

/// Formats an entry number from a date and a four-digit suffix.
///
/// Suffixes outside 0..=9999 wrap so the format stays fixed-width.
#[must_use]
pub fn format_entry_number(date: NaiveDate, suffix: u16) -> String {
    format!(
        "{ENTRY_NUMBER_PREFIX}-{}-{:04}",
        date.format("%y%m%d"),
        suffix % 10_000
    )
}

/// Draws a random four-digit suffix.
///
/// Random bytes come from a v4 UUID, which avoids a dedicated RNG
/// dependency. Collisions are expected eventually and are handled by
/// the unique constraint plus retry at the storage layer.
#[must_use]
pub fn random_suffix() -> u16 {
    let bytes = Uuid::new_v4().into_bytes();
    u16::from_be_bytes([bytes[0], bytes[1]]) % 10_000
}
