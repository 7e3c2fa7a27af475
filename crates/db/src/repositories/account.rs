//! Account repository for chart of accounts maintenance.
//!
//! The chart of accounts is maintained here and read-only everywhere
//! else: the journal repository resolves codes against it, the ledger
//! and report repositories classify postings with it.

use chrono::Utc;
use ledgera_core::coa::{self, CoaError};
use ledgera_shared::types::AccountId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::chart_of_accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Account code or type failed validation.
    #[error(transparent)]
    Invalid(#[from] CoaError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (unique; leading digit must match the type).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: coa::AccountType,
}

/// Repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account after validating its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code does not match the declared type,
    /// the code is already taken, or the database operation fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        coa::validate_account_code(&input.code, input.account_type)?;

        let existing = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let now = Utc::now().into();
        let account = chart_of_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(input.account_type.into()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = account.insert(&self.db).await?;
        info!(code = %created.code, account_type = %input.account_type, "account created");
        Ok(created)
    }

    /// Renames an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has the given code.
    pub async fn rename_account(
        &self,
        code: &str,
        name: String,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        let account = self.find_by_code(code).await?;

        let mut active: chart_of_accounts::ActiveModel = account.into();
        active.name = Set(name);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deactivates an account.
    ///
    /// The row and its posting history remain; new journal lines
    /// against the code are rejected from here on.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has the given code.
    pub async fn deactivate_account(
        &self,
        code: &str,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        let account = self.find_by_code(code).await?;

        let mut active: chart_of_accounts::ActiveModel = account.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        info!(code = %updated.code, "account deactivated");
        Ok(updated)
    }

    /// Reactivates a previously deactivated account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has the given code.
    pub async fn reactivate_account(
        &self,
        code: &str,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        let account = self.find_by_code(code).await?;

        let mut active: chart_of_accounts::ActiveModel = account.into();
        active.is_active = Set(true);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Lists accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        active_only: bool,
    ) -> Result<Vec<chart_of_accounts::Model>, AccountError> {
        let mut query = chart_of_accounts::Entity::find();

        if active_only {
            query = query.filter(chart_of_accounts::Column::IsActive.eq(true));
        }

        Ok(query
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// Finds an account by its code.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has the given code.
    pub async fn find_by_code(&self, code: &str) -> Result<chart_of_accounts::Model, AccountError> {
        chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::NotFound(code.to_string()))
    }
}

/// Maps a stored account row to the domain type.
#[must_use]
pub fn domain_account(model: &chart_of_accounts::Model) -> coa::Account {
    coa::Account {
        id: AccountId::from_uuid(model.id),
        code: model.code.clone(),
        name: model.name.clone(),
        account_type: model.account_type.clone().into(),
        is_active: model.is_active,
    }
}
