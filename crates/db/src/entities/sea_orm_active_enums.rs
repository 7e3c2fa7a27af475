//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account classification (`account_type` PG enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<ledgera_core::coa::AccountType> for AccountType {
    fn from(value: ledgera_core::coa::AccountType) -> Self {
        match value {
            ledgera_core::coa::AccountType::Asset => Self::Asset,
            ledgera_core::coa::AccountType::Liability => Self::Liability,
            ledgera_core::coa::AccountType::Equity => Self::Equity,
            ledgera_core::coa::AccountType::Revenue => Self::Revenue,
            ledgera_core::coa::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for ledgera_core::coa::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

/// Journal entry lifecycle status (`journal_status` PG enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "journal_status")]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Entry is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Entry is posted to the ledger.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Entry has been cancelled by a compensating entry.
    #[sea_orm(string_value = "reversed")]
    Reversed,
}

impl From<ledgera_core::journal::JournalStatus> for JournalStatus {
    fn from(value: ledgera_core::journal::JournalStatus) -> Self {
        match value {
            ledgera_core::journal::JournalStatus::Draft => Self::Draft,
            ledgera_core::journal::JournalStatus::Posted => Self::Posted,
            ledgera_core::journal::JournalStatus::Reversed => Self::Reversed,
        }
    }
}

impl From<JournalStatus> for ledgera_core::journal::JournalStatus {
    fn from(value: JournalStatus) -> Self {
        match value {
            JournalStatus::Draft => Self::Draft,
            JournalStatus::Posted => Self::Posted,
            JournalStatus::Reversed => Self::Reversed,
        }
    }
}
