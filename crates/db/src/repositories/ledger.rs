//! Ledger repository.
//!
//! Fetches posted journal items and hands them to the core ledger fold.
//! Balances are derived on every read by replaying posted history; no
//! running balance is ever persisted, so the ledger cannot drift from
//! the journal.

use chrono::NaiveDate;
use ledgera_core::ledger::{LedgerAccountView, LedgerEntryRow, LedgerService};
use ledgera_shared::types::JournalEntryId;
use rust_decimal::Decimal;
use sea_orm::sea_query::JoinType;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::entities::{chart_of_accounts, journal_entries, journal_items, sea_orm_active_enums};
use crate::repositories::account::domain_account;

/// Error types for ledger view construction.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The window is inverted.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Which accounts a ledger request covers.
#[derive(Debug, Clone)]
pub enum LedgerScope {
    /// Every active account, ordered by code.
    AllAccounts,
    /// A single account by code, active or not.
    Account(String),
}

/// Date window for fetching posted rows. Bounds are accounting dates;
/// `Between` is inclusive on both ends.
#[derive(Debug, Clone, Copy)]
enum RowWindow {
    /// All history strictly before the date (opening balance replay).
    Before(NaiveDate),
    /// Rows within the reporting window.
    Between(NaiveDate, NaiveDate),
}

/// A posted item row joined with its entry header.
#[derive(Debug, FromQueryResult)]
struct ItemRow {
    entry_id: uuid::Uuid,
    entry_number: String,
    entry_date: NaiveDate,
    item_description: Option<String>,
    entry_description: String,
    debit_amount: Decimal,
    credit_amount: Decimal,
}

/// Repository for derived ledger views.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds ledger views for the scope over `[date_from, date_to]`.
    ///
    /// Opening balances replay the full posted history before
    /// `date_from`. Only posted, non-deleted entries contribute; drafts
    /// and soft-deleted entries are invisible, and reversed pairs both
    /// appear as ordinary lines netting to zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` for an inverted window and
    /// `AccountNotFound` when a single-account scope names an unknown
    /// code.
    pub async fn build_ledger(
        &self,
        scope: &LedgerScope,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<LedgerAccountView>, LedgerError> {
        if date_from > date_to {
            return Err(LedgerError::InvalidDateRange {
                start: date_from,
                end: date_to,
            });
        }

        let accounts = self.resolve_scope(scope).await?;

        let mut views = Vec::with_capacity(accounts.len());
        for model in &accounts {
            let account = domain_account(model);
            let opening_rows = self
                .posted_rows(&account.code, RowWindow::Before(date_from))
                .await?;
            let window_rows = self
                .posted_rows(&account.code, RowWindow::Between(date_from, date_to))
                .await?;

            views.push(LedgerService::build_account_view(
                &account,
                &opening_rows,
                window_rows,
            ));
        }

        Ok(views)
    }

    async fn resolve_scope(
        &self,
        scope: &LedgerScope,
    ) -> Result<Vec<chart_of_accounts::Model>, LedgerError> {
        match scope {
            LedgerScope::AllAccounts => Ok(chart_of_accounts::Entity::find()
                .filter(chart_of_accounts::Column::IsActive.eq(true))
                .order_by_asc(chart_of_accounts::Column::Code)
                .all(&self.db)
                .await?),
            // A deactivated account still has history worth reading.
            LedgerScope::Account(code) => Ok(vec![
                chart_of_accounts::Entity::find()
                    .filter(chart_of_accounts::Column::Code.eq(code))
                    .one(&self.db)
                    .await?
                    .ok_or_else(|| LedgerError::AccountNotFound(code.clone()))?,
            ]),
        }
    }

    /// Fetches posted items for one account within the window, in
    /// chronological order.
    async fn posted_rows(
        &self,
        coa_code: &str,
        window: RowWindow,
    ) -> Result<Vec<LedgerEntryRow>, LedgerError> {
        let mut query = journal_items::Entity::find()
            .select_only()
            .column_as(journal_entries::Column::Id, "entry_id")
            .column(journal_entries::Column::EntryNumber)
            .column(journal_entries::Column::EntryDate)
            .column_as(journal_items::Column::Description, "item_description")
            .column_as(journal_entries::Column::Description, "entry_description")
            .column(journal_items::Column::DebitAmount)
            .column(journal_items::Column::CreditAmount)
            .join(JoinType::InnerJoin, journal_items::Relation::JournalEntries.def())
            .filter(journal_items::Column::CoaCode.eq(coa_code))
            .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::JournalStatus::Posted))
            .filter(journal_entries::Column::DeletedAt.is_null());

        query = match window {
            RowWindow::Before(date) => {
                query.filter(journal_entries::Column::EntryDate.lt(date))
            }
            RowWindow::Between(from, to) => query
                .filter(journal_entries::Column::EntryDate.gte(from))
                .filter(journal_entries::Column::EntryDate.lte(to)),
        };

        let rows = query
            .order_by_asc(journal_entries::Column::EntryDate)
            .order_by_asc(journal_entries::Column::EntryNumber)
            .order_by_asc(journal_items::Column::LineNo)
            .into_model::<ItemRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(ledger_row).collect())
    }
}

/// Maps a joined item row to the core fold's input shape.
fn ledger_row(row: ItemRow) -> LedgerEntryRow {
    LedgerEntryRow {
        entry_id: JournalEntryId::from_uuid(row.entry_id),
        entry_number: row.entry_number,
        entry_date: row.entry_date,
        description: row.item_description.unwrap_or(row.entry_description),
        debit: row.debit_amount,
        credit: row.credit_amount,
    }
}
