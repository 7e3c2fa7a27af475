//! Chart of accounts error types.

use super::types::AccountType;

/// Errors raised by chart of accounts validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoaError {
    /// Account code is empty or does not start with a classifying digit.
    #[error("Invalid account code '{0}': must start with a digit 1-5")]
    InvalidCode(String),

    /// Account code prefix contradicts the declared account type.
    #[error("Account code {code} implies type '{implied}' but '{declared}' was declared")]
    CodeTypeMismatch {
        /// The offending code.
        code: String,
        /// Type implied by the code's leading digit.
        implied: AccountType,
        /// Type the caller declared.
        declared: AccountType,
    },

    /// Account type string did not parse.
    #[error("Unknown account type '{0}'")]
    UnknownAccountType(String),
}
