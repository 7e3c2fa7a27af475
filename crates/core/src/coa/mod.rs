//! Chart of accounts classification.
//!
//! The chart of accounts (COA) maps account codes to names and types.
//! Codes are hierarchical by convention: the leading digit marks the
//! account type (1=asset, 2=liability, 3=equity, 4=revenue, 5=expense).
//! The journal engine treats the registry as read-only; maintenance
//! operations live in the database layer.

pub mod error;
pub mod types;

pub use error::CoaError;
pub use types::{Account, AccountType, BalanceSide, validate_account_code};
