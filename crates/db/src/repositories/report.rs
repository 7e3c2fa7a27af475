//! Report repository.
//!
//! Aggregates posted journal activity per account and hands the sums
//! to the core report compilers. Reports are derived on every request;
//! nothing here is persisted.

use chrono::NaiveDate;
use ledgera_core::ledger::balance_change;
use ledgera_core::reports::{
    self as core_reports, AccountActivity, CashAccountFlow, CashFlowReport, ProfitLossReport,
    ReportService, TrialBalanceReport, is_cash_code,
};
use ledgera_shared::types::AccountId;
use rust_decimal::Decimal;
use sea_orm::sea_query::JoinType;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::entities::{chart_of_accounts, journal_entries, journal_items, sea_orm_active_enums};

/// Error types for report generation.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Report compilation failed.
    #[error(transparent)]
    Compile(#[from] core_reports::ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Grouped per-account debit and credit sums, as fetched.
#[derive(Debug, FromQueryResult)]
struct ActivityRow {
    account_id: uuid::Uuid,
    code: String,
    name: String,
    account_type: sea_orm_active_enums::AccountType,
    total_debit: Decimal,
    total_credit: Decimal,
}

/// Repository for compiled financial reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Compiles the profit and loss report for the period.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted period or a failed query.
    pub async fn profit_loss(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<ProfitLossReport, ReportError> {
        let activity = self.period_activity(period_start, period_end).await?;
        Ok(ReportService::compile_profit_loss(
            period_start,
            period_end,
            activity,
        )?)
    }

    /// Compiles the cash flow report for the period.
    ///
    /// Opening cash replays all posted activity on the cash and bank
    /// accounts before the period start.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted period or a failed query.
    pub async fn cash_flow(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<CashFlowReport, ReportError> {
        let opening_cash = self
            .pre_period_activity(period_start)
            .await?
            .into_iter()
            .filter(|account| is_cash_code(&account.code))
            .map(|account| account.total_debit - account.total_credit)
            .sum();

        let flows: Vec<CashAccountFlow> = self
            .period_activity(period_start, period_end)
            .await?
            .into_iter()
            .filter(|account| is_cash_code(&account.code))
            .map(|account| CashAccountFlow {
                code: account.code,
                name: account.name,
                inflows: account.total_debit,
                outflows: account.total_credit,
            })
            .collect();

        Ok(ReportService::compile_cash_flow(
            period_start,
            period_end,
            opening_cash,
            flows,
        )?)
    }

    /// Compiles the trial balance for the period.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted period or a failed query.
    pub async fn trial_balance(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<TrialBalanceReport, ReportError> {
        let activity = self.period_activity(period_start, period_end).await?;
        Ok(ReportService::compile_trial_balance(
            period_start,
            period_end,
            activity,
        )?)
    }

    /// Per-account posted sums within `[from, to]`, ordered by code.
    async fn period_activity(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AccountActivity>, ReportError> {
        let rows = activity_query()
            .filter(journal_entries::Column::EntryDate.gte(from))
            .filter(journal_entries::Column::EntryDate.lte(to))
            .into_model::<ActivityRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(account_activity).collect())
    }

    /// Per-account posted sums strictly before `start`.
    async fn pre_period_activity(
        &self,
        start: NaiveDate,
    ) -> Result<Vec<AccountActivity>, ReportError> {
        let rows = activity_query()
            .filter(journal_entries::Column::EntryDate.lt(start))
            .into_model::<ActivityRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(account_activity).collect())
    }
}

/// Base query: posted, non-deleted items grouped by account.
fn activity_query() -> sea_orm::Select<journal_items::Entity> {
    journal_items::Entity::find()
        .select_only()
        .column_as(chart_of_accounts::Column::Id, "account_id")
        .column(chart_of_accounts::Column::Code)
        .column(chart_of_accounts::Column::Name)
        .column(chart_of_accounts::Column::AccountType)
        .column_as(journal_items::Column::DebitAmount.sum(), "total_debit")
        .column_as(journal_items::Column::CreditAmount.sum(), "total_credit")
        .join(
            JoinType::InnerJoin,
            journal_items::Relation::JournalEntries.def(),
        )
        .join(
            JoinType::InnerJoin,
            journal_items::Relation::ChartOfAccounts.def(),
        )
        .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::JournalStatus::Posted))
        .filter(journal_entries::Column::DeletedAt.is_null())
        .group_by(chart_of_accounts::Column::Id)
        .group_by(chart_of_accounts::Column::Code)
        .group_by(chart_of_accounts::Column::Name)
        .group_by(chart_of_accounts::Column::AccountType)
        .order_by_asc(chart_of_accounts::Column::Code)
}

/// Maps a grouped row to the compiler's input shape with a typed
/// balance per the account's normal side.
fn account_activity(row: ActivityRow) -> AccountActivity {
    let account_type: ledgera_core::coa::AccountType = row.account_type.into();
    let balance = balance_change(
        account_type.normal_balance(),
        row.total_debit,
        row.total_credit,
    );

    AccountActivity {
        account_id: AccountId::from_uuid(row.account_id),
        code: row.code,
        name: row.name,
        account_type,
        total_debit: row.total_debit,
        total_credit: row.total_credit,
        balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(
        code: &str,
        account_type: sea_orm_active_enums::AccountType,
        debit: Decimal,
        credit: Decimal,
    ) -> ActivityRow {
        ActivityRow {
            account_id: uuid::Uuid::new_v4(),
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type,
            total_debit: debit,
            total_credit: credit,
        }
    }

    #[test]
    fn test_account_activity_debit_normal_balance() {
        let activity = account_activity(row(
            "1100",
            sea_orm_active_enums::AccountType::Asset,
            dec!(800),
            dec!(300),
        ));

        assert_eq!(activity.balance, dec!(500));
        assert_eq!(activity.account_type, ledgera_core::coa::AccountType::Asset);
    }

    #[test]
    fn test_account_activity_credit_normal_balance() {
        let activity = account_activity(row(
            "4000",
            sea_orm_active_enums::AccountType::Revenue,
            dec!(100),
            dec!(1500),
        ));

        assert_eq!(activity.balance, dec!(1400));
    }
}
