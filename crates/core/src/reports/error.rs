//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report compilation.
///
/// Reports have no data-driven failure modes: insufficient data yields
/// zero or empty sections. Only a nonsensical period is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}
