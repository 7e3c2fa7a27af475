//! Journal entry error types.
//!
//! Covers the rules checked before anything is persisted: entry shape,
//! line amounts, balance, and chart of accounts resolution.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while validating a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    // ========== Validation Errors ==========
    /// Entry must have at least one line item.
    #[error("Journal entry must have at least one line item")]
    EmptyEntry,

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Entry must contain at least one debit line and one credit line.
    #[error("Journal entry must contain at least one debit and one credit line")]
    SingleSided,

    /// Entry is not balanced (total debits != total credits).
    #[error("Journal entry is not balanced. Debit: {total_debit}, Credit: {total_credit}")]
    Unbalanced {
        /// Sum of all debit line amounts.
        total_debit: Decimal,
        /// Sum of all credit line amounts.
        total_credit: Decimal,
    },

    // ========== Integrity Errors ==========
    /// Line references an account code missing from the chart of accounts.
    #[error("Account code '{0}' does not resolve in the chart of accounts")]
    UnknownAccount(String),

    /// Line references a deactivated account.
    #[error("Account '{0}' is inactive and cannot accept new postings")]
    InactiveAccount(String),
}

impl JournalError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::SingleSided => "SINGLE_SIDED",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::InactiveAccount(_) => "INACTIVE_ACCOUNT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(JournalError::EmptyEntry.error_code(), "EMPTY_ENTRY");
        assert_eq!(JournalError::ZeroAmount.error_code(), "ZERO_AMOUNT");
        assert_eq!(
            JournalError::NegativeAmount(dec!(-5)).error_code(),
            "NEGATIVE_AMOUNT"
        );
        assert_eq!(JournalError::SingleSided.error_code(), "SINGLE_SIDED");
        assert_eq!(
            JournalError::Unbalanced {
                total_debit: dec!(100),
                total_credit: dec!(150),
            }
            .error_code(),
            "UNBALANCED"
        );
        assert_eq!(
            JournalError::UnknownAccount("9999".to_string()).error_code(),
            "UNKNOWN_ACCOUNT"
        );
        assert_eq!(
            JournalError::InactiveAccount("1100".to_string()).error_code(),
            "INACTIVE_ACCOUNT"
        );
    }

    #[test]
    fn test_unbalanced_message_names_both_sums() {
        let err = JournalError::Unbalanced {
            total_debit: dec!(100.00),
            total_credit: dec!(150.00),
        };
        let msg = err.to_string();
        assert!(msg.contains("100.00"));
        assert!(msg.contains("150.00"));
    }
}
