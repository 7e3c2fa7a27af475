//! Journal entry repository.
//!
//! Persists journal entries and drives their lifecycle: create as
//! draft, post, reverse, soft-delete. Validation and reversal
//! construction live in `ledgera_core`; this layer resolves accounts,
//! wraps each mutation in a transaction, and handles entry number
//! collisions by regenerating and retrying.

use std::collections::HashMap;

use chrono::Utc;
use ledgera_core::journal::{
    CreateEntryInput, JournalError, JournalItemInput, JournalService, JournalStatus, LineAmount,
    ResolvedItem, ReversalInput, ReversalService, format_entry_number, random_suffix,
};
use ledgera_shared::types::{JournalEntryId, JournalItemId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::{chart_of_accounts, journal_entries, journal_items};
use crate::repositories::account::domain_account;

/// How many entry numbers to try before giving up.
///
/// With 10,000 suffixes per day, exhausting five random draws means the
/// day is essentially full.
const MAX_NUMBER_ATTEMPTS: u32 = 5;

/// Error types for journal entry operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalEntryError {
    /// Journal entry not found (or soft-deleted).
    #[error("Journal entry not found: {0}")]
    NotFound(Uuid),

    /// Entry failed business validation.
    #[error(transparent)]
    Validation(#[from] JournalError),

    /// Entry is already posted.
    #[error("Journal entry {0} is already posted")]
    AlreadyPosted(Uuid),

    /// Entry must be posted first.
    #[error("Journal entry {0} is not posted")]
    NotPosted(Uuid),

    /// Entry has already been reversed.
    #[error("Journal entry {0} has already been reversed")]
    AlreadyReversed(Uuid),

    /// Only draft entries may be deleted.
    #[error("Journal entry {0} is posted; reverse it instead of deleting")]
    CanOnlyDeleteDraft(Uuid),

    /// Stored line items do not balance; the row data is corrupt.
    #[error("Journal entry {0} has unbalanced stored items")]
    CorruptEntry(Uuid),

    /// Could not find a free entry number.
    #[error("Could not allocate a unique entry number after {0} attempts")]
    EntryNumberConflict(u32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A journal entry together with its line items, ordered by line number.
#[derive(Debug, Clone)]
pub struct EntryWithItems {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The line items in line number order.
    pub items: Vec<journal_items::Model>,
}

/// Filters for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Only entries with this status.
    pub status: Option<JournalStatus>,
    /// Only entries dated on or after this date.
    pub date_from: Option<chrono::NaiveDate>,
    /// Only entries dated on or before this date.
    pub date_to: Option<chrono::NaiveDate>,
    /// Only entries with this source document type.
    pub reference_type: Option<String>,
    /// Only entries referencing this source document.
    pub reference_id: Option<Uuid>,
}

/// Repository for journal entry lifecycle operations.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft journal entry.
    ///
    /// Totals are recomputed from the line items; any totals the caller
    /// may have computed are ignored. The entry number is generated
    /// here and regenerated on a unique constraint collision.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the items fail the balance rules
    /// or reference unknown/inactive accounts, `EntryNumberConflict` if
    /// no free number is found, or a database error.
    pub async fn create_entry(
        &self,
        input: CreateEntryInput,
    ) -> Result<EntryWithItems, JournalEntryError> {
        let accounts = self.load_accounts(&input.items).await?;
        let (resolved, totals) =
            JournalService::validate_and_resolve(&input, |code| accounts.get(code).cloned())?;

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let entry_number = format_entry_number(input.entry_date, random_suffix());

            let txn = self.db.begin().await?;
            let header = new_entry_header(&input, &entry_number, totals.total_debit);
            match insert_entry(&txn, header, &resolved).await {
                Ok(created) => {
                    txn.commit().await?;
                    info!(
                        entry_number = %created.entry.entry_number,
                        lines = created.items.len(),
                        total = %created.entry.total_debit,
                        "journal entry created"
                    );
                    return Ok(created);
                }
                Err(err) if is_unique_violation(&err) => {
                    warn!(attempt, entry_number, "entry number collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(JournalEntryError::EntryNumberConflict(MAX_NUMBER_ATTEMPTS))
    }

    /// Posts a draft entry to the ledger.
    ///
    /// The update itself re-checks the draft status, so a concurrent
    /// post or delete between the read and the write cannot slip
    /// through. The database enforces the balance invariant again with
    /// a trigger on the status transition.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing or deleted entry and
    /// `AlreadyPosted` for entries past draft.
    pub async fn post_entry(
        &self,
        id: Uuid,
        posted_by: Option<String>,
    ) -> Result<journal_entries::Model, JournalEntryError> {
        let entry = self.find_live(id).await?;
        ensure_can_post(id, entry.status.clone().into())?;

        let now = Utc::now().into();
        let update = journal_entries::ActiveModel {
            status: Set(ledgera_core::journal::JournalStatus::Posted.into()),
            posted_at: Set(Some(now)),
            posted_by: Set(posted_by),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = journal_entries::Entity::update_many()
            .set(update)
            .filter(live_draft_filter(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            // Lost a race: re-read to report what the entry became.
            let entry = self.find_live(id).await?;
            ensure_can_post(id, entry.status.into())?;
        }

        let posted = self.find_live(id).await?;
        info!(entry_number = %posted.entry_number, "journal entry posted");
        Ok(posted)
    }

    /// Reverses a posted entry with a compensating entry.
    ///
    /// The compensating entry swaps every line's side, carries the
    /// original's accounting date, and is posted immediately. The
    /// original flips to `reversed` in the same transaction. The
    /// original rows themselves are never modified beyond the status
    /// and back-reference.
    ///
    /// # Errors
    ///
    /// Returns `NotPosted` for drafts, `AlreadyReversed` for reversed
    /// entries, and `CorruptEntry` if the stored items do not balance.
    pub async fn reverse_entry(
        &self,
        id: Uuid,
        reason: String,
        posted_by: Option<String>,
    ) -> Result<EntryWithItems, JournalEntryError> {
        let original = self.get_entry(id).await?;
        ensure_can_reverse(id, original.entry.status.clone().into())?;

        let original_items = item_inputs(&original.items);
        if !ReversalService::validate_reversal(&original_items) {
            return Err(JournalEntryError::CorruptEntry(id));
        }

        let reversal_input = ReversalInput {
            original_id: JournalEntryId::from_uuid(id),
            original_entry_number: original.entry.entry_number.clone(),
            entry_date: original.entry.entry_date,
            reason,
            items: original_items,
        };
        let reversal = ReversalService::build_reversal(&reversal_input);

        // The original posted with these totals, so the swapped entry
        // carries the same ones.
        let total = original.entry.total_debit;
        let resolved = self.resolve_reversal_items(&reversal.items).await?;

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let entry_number = format_entry_number(reversal.entry_date, random_suffix());

            let txn = self.db.begin().await?;
            match insert_posted_reversal(
                &txn,
                &original.entry,
                &reversal,
                &resolved,
                &entry_number,
                total,
                posted_by.clone(),
            )
            .await
            {
                Ok(created) => {
                    txn.commit().await?;
                    info!(
                        original = %original.entry.entry_number,
                        reversal = %created.entry.entry_number,
                        "journal entry reversed"
                    );
                    return Ok(created);
                }
                Err(err) if is_unique_violation(&err) => {
                    warn!(attempt, entry_number, "entry number collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(JournalEntryError::EntryNumberConflict(MAX_NUMBER_ATTEMPTS))
    }

    /// Soft-deletes a draft entry.
    ///
    /// The row stays for audit; every read path filters it out. The
    /// update only matches live drafts, so an entry posted concurrently
    /// can never be tombstoned.
    ///
    /// # Errors
    ///
    /// Returns `CanOnlyDeleteDraft` for posted or reversed entries.
    pub async fn delete_entry(&self, id: Uuid) -> Result<(), JournalEntryError> {
        let entry = self.find_live(id).await?;
        ensure_can_delete(id, entry.status.clone().into())?;

        let now = Utc::now().into();
        let update = journal_entries::ActiveModel {
            deleted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = journal_entries::Entity::update_many()
            .set(update)
            .filter(live_draft_filter(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            // Lost a race: re-read to report what the entry became.
            let entry = self.find_live(id).await?;
            ensure_can_delete(id, entry.status.into())?;
        }

        info!(entry_number = %entry.entry_number, "draft journal entry deleted");
        Ok(())
    }

    /// Fetches an entry with its items, excluding soft-deleted entries.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry is missing or deleted.
    pub async fn get_entry(&self, id: Uuid) -> Result<EntryWithItems, JournalEntryError> {
        let entry = self.find_live(id).await?;
        let items = entry
            .find_related(journal_items::Entity)
            .order_by_asc(journal_items::Column::LineNo)
            .all(&self.db)
            .await?;

        Ok(EntryWithItems { entry, items })
    }

    /// Lists entries matching the filter, newest accounting date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        filter: &EntryFilter,
    ) -> Result<Vec<journal_entries::Model>, JournalEntryError> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::DeletedAt.is_null());

        if let Some(status) = filter.status {
            query = query.filter(
                journal_entries::Column::Status
                    .eq(crate::entities::sea_orm_active_enums::JournalStatus::from(status)),
            );
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(date_to));
        }
        if let Some(reference_type) = &filter.reference_type {
            query = query.filter(journal_entries::Column::ReferenceType.eq(reference_type));
        }
        if let Some(reference_id) = filter.reference_id {
            query = query.filter(journal_entries::Column::ReferenceId.eq(reference_id));
        }

        Ok(query
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::EntryNumber)
            .all(&self.db)
            .await?)
    }

    async fn find_live(&self, id: Uuid) -> Result<journal_entries::Model, JournalEntryError> {
        journal_entries::Entity::find_by_id(id)
            .filter(journal_entries::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(JournalEntryError::NotFound(id))
    }

    /// Loads the accounts referenced by the input lines, keyed by code.
    async fn load_accounts(
        &self,
        items: &[JournalItemInput],
    ) -> Result<HashMap<String, ledgera_core::coa::Account>, JournalEntryError> {
        let codes: Vec<&str> = items.iter().map(|item| item.coa_code.as_str()).collect();

        let rows = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Code.is_in(codes))
            .all(&self.db)
            .await?;

        Ok(rows
            .iter()
            .map(|row| (row.code.clone(), domain_account(row)))
            .collect())
    }

    /// Resolves the reversal's line items against the chart of accounts.
    ///
    /// The accounts must exist because the original posted against
    /// them; deactivation since then does not block the reversal.
    async fn resolve_reversal_items(
        &self,
        items: &[JournalItemInput],
    ) -> Result<Vec<ResolvedItem>, JournalEntryError> {
        let accounts = self.load_accounts(items).await?;

        items
            .iter()
            .map(|item| {
                let account = accounts
                    .get(&item.coa_code)
                    .ok_or_else(|| JournalError::UnknownAccount(item.coa_code.clone()))?;
                Ok(ResolvedItem {
                    account_id: account.id,
                    coa_code: item.coa_code.clone(),
                    description: item.description.clone(),
                    amount: item.amount,
                })
            })
            .collect()
    }
}

/// Builds the draft header row for a new entry.
fn new_entry_header(
    input: &CreateEntryInput,
    entry_number: &str,
    total: Decimal,
) -> journal_entries::ActiveModel {
    let now = Utc::now().into();
    journal_entries::ActiveModel {
        id: Set(JournalEntryId::new().into_inner()),
        entry_number: Set(entry_number.to_string()),
        entry_date: Set(input.entry_date),
        description: Set(input.description.clone()),
        reference_type: Set(input.reference_type.clone()),
        reference_id: Set(input.reference_id),
        total_debit: Set(total),
        total_credit: Set(total),
        status: Set(ledgera_core::journal::JournalStatus::Draft.into()),
        posted_at: Set(None),
        posted_by: Set(None),
        reverses_entry_id: Set(None),
        reversed_by_entry_id: Set(None),
        deleted_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Inserts a header and its items inside an open transaction.
async fn insert_entry(
    txn: &DatabaseTransaction,
    header: journal_entries::ActiveModel,
    resolved: &[ResolvedItem],
) -> Result<EntryWithItems, DbErr> {
    let entry = header.insert(txn).await?;
    let items = insert_items(txn, entry.id, resolved).await?;
    Ok(EntryWithItems { entry, items })
}

/// Inserts a reversal as draft, flips it to posted so the balance
/// trigger runs, and marks the original as reversed.
async fn insert_posted_reversal(
    txn: &DatabaseTransaction,
    original: &journal_entries::Model,
    reversal: &CreateEntryInput,
    resolved: &[ResolvedItem],
    entry_number: &str,
    total: Decimal,
    posted_by: Option<String>,
) -> Result<EntryWithItems, DbErr> {
    let now = Utc::now().into();

    let mut header = new_entry_header(reversal, entry_number, total);
    header.reverses_entry_id = Set(Some(original.id));
    let entry = header.insert(txn).await?;
    let items = insert_items(txn, entry.id, resolved).await?;

    let mut posting: journal_entries::ActiveModel = entry.into();
    posting.status = Set(ledgera_core::journal::JournalStatus::Posted.into());
    posting.posted_at = Set(Some(now));
    posting.posted_by = Set(posted_by);
    posting.updated_at = Set(now);
    let entry = posting.update(txn).await?;

    let mut flip: journal_entries::ActiveModel = original.clone().into();
    flip.status = Set(ledgera_core::journal::JournalStatus::Reversed.into());
    flip.reversed_by_entry_id = Set(Some(entry.id));
    flip.updated_at = Set(now);
    flip.update(txn).await?;

    Ok(EntryWithItems { entry, items })
}

/// Inserts resolved line items numbered from 1.
async fn insert_items(
    txn: &DatabaseTransaction,
    entry_id: Uuid,
    resolved: &[ResolvedItem],
) -> Result<Vec<journal_items::Model>, DbErr> {
    let now = Utc::now().into();
    let mut items = Vec::with_capacity(resolved.len());

    for (index, item) in resolved.iter().enumerate() {
        let line_no = i32::try_from(index).unwrap_or(i32::MAX).saturating_add(1);
        let row = journal_items::ActiveModel {
            id: Set(JournalItemId::new().into_inner()),
            journal_entry_id: Set(entry_id),
            line_no: Set(line_no),
            coa_code: Set(item.coa_code.clone()),
            description: Set(item.description.clone()),
            debit_amount: Set(item.amount.debit()),
            credit_amount: Set(item.amount.credit()),
            created_at: Set(now),
        };
        items.push(row.insert(txn).await?);
    }

    Ok(items)
}

/// Maps stored item rows back to domain line inputs.
///
/// The check constraint guarantees exactly one side is positive, so a
/// zero debit means the row is a credit line.
fn item_inputs(items: &[journal_items::Model]) -> Vec<JournalItemInput> {
    items
        .iter()
        .map(|item| JournalItemInput {
            coa_code: item.coa_code.clone(),
            description: item.description.clone(),
            amount: if item.debit_amount > Decimal::ZERO {
                LineAmount::Debit(item.debit_amount)
            } else {
                LineAmount::Credit(item.credit_amount)
            },
        })
        .collect()
}

/// Matches entry `id` only while it is still a live draft, for guarded
/// status updates.
fn live_draft_filter(id: Uuid) -> Condition {
    Condition::all()
        .add(journal_entries::Column::Id.eq(id))
        .add(
            journal_entries::Column::Status
                .eq(crate::entities::sea_orm_active_enums::JournalStatus::Draft),
        )
        .add(journal_entries::Column::DeletedAt.is_null())
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// A reversed entry was posted once, so posting it again reports
// AlreadyPosted rather than AlreadyReversed.
const fn ensure_can_post(id: Uuid, status: JournalStatus) -> Result<(), JournalEntryError> {
    match status {
        JournalStatus::Draft => Ok(()),
        JournalStatus::Posted | JournalStatus::Reversed => {
            Err(JournalEntryError::AlreadyPosted(id))
        }
    }
}

const fn ensure_can_reverse(id: Uuid, status: JournalStatus) -> Result<(), JournalEntryError> {
    match status {
        JournalStatus::Posted => Ok(()),
        JournalStatus::Draft => Err(JournalEntryError::NotPosted(id)),
        JournalStatus::Reversed => Err(JournalEntryError::AlreadyReversed(id)),
    }
}

const fn ensure_can_delete(id: Uuid, status: JournalStatus) -> Result<(), JournalEntryError> {
    match status {
        JournalStatus::Draft => Ok(()),
        JournalStatus::Posted | JournalStatus::Reversed => {
            Err(JournalEntryError::CanOnlyDeleteDraft(id))
        }
    }
}
