//! Chart of accounts domain types.

use ledgera_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use super::error::CoaError;

/// Account classification in the chart of accounts.
///
/// In double-entry bookkeeping the type determines which side increases
/// the balance: assets and expenses grow with debits, liabilities,
/// equity, and revenue grow with credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (codes 1xxx).
    Asset,
    /// Liability account (codes 2xxx).
    Liability,
    /// Equity account (codes 3xxx).
    Equity,
    /// Revenue account (codes 4xxx).
    Revenue,
    /// Expense account (codes 5xxx).
    Expense,
}

impl AccountType {
    /// Classifies an account code by its leading digit.
    ///
    /// Returns `None` for an empty code or one that does not start with
    /// a classifying digit.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.chars().next()? {
            '1' => Some(Self::Asset),
            '2' => Some(Self::Liability),
            '3' => Some(Self::Equity),
            '4' => Some(Self::Revenue),
            '5' => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the leading digit used by codes of this type.
    #[must_use]
    pub const fn code_prefix(self) -> char {
        match self {
            Self::Asset => '1',
            Self::Liability => '2',
            Self::Equity => '3',
            Self::Revenue => '4',
            Self::Expense => '5',
        }
    }

    /// Returns the lowercase name used in storage and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Returns which side increases balances of this account type.
    ///
    /// Asset and expense accounts are debit-normal; liability, equity,
    /// and revenue accounts are credit-normal.
    #[must_use]
    pub const fn normal_balance(self) -> BalanceSide {
        match self {
            Self::Asset | Self::Expense => BalanceSide::DebitNormal,
            Self::Liability | Self::Equity | Self::Revenue => BalanceSide::CreditNormal,
        }
    }
}

/// The side on which an account's balance normally grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSide {
    /// Debits increase the balance (asset, expense).
    DebitNormal,
    /// Credits increase the balance (liability, equity, revenue).
    CreditNormal,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = CoaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            other => Err(CoaError::UnknownAccountType(other.to_string())),
        }
    }
}

/// A chart of accounts entry.
///
/// Read-only from the journal engine's point of view; created and
/// maintained through the account repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Unique, hierarchical-by-convention account code.
    pub code: String,
    /// Human-readable account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Deactivated accounts keep their history but reject new postings.
    pub is_active: bool,
}

/// Validates an account code against its declared type.
///
/// The code must be non-empty, start with a classifying digit, and that
/// digit must agree with the declared type.
///
/// # Errors
///
/// Returns `CoaError::InvalidCode` for an unclassifiable code and
/// `CoaError::CodeTypeMismatch` when the prefix contradicts the type.
pub fn validate_account_code(code: &str, declared: AccountType) -> Result<(), CoaError> {
    let implied =
        AccountType::from_code(code).ok_or_else(|| CoaError::InvalidCode(code.to_string()))?;

    if implied == declared {
        Ok(())
    } else {
        Err(CoaError::CodeTypeMismatch {
            code: code.to_string(),
            implied,
            declared,
        })
    }
}
