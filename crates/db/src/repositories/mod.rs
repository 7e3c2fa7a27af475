//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Business rules stay in `ledgera_core`; repositories
//! resolve accounts, manage transactions, and map rows to domain
//! shapes.

pub mod account;
pub mod journal;
pub mod ledger;
pub mod report;

pub use account::{AccountError, AccountRepository, CreateAccountInput, domain_account};
pub use journal::{
    EntryFilter, EntryWithItems, JournalEntryError, JournalRepository,
};
pub use ledger::{LedgerError, LedgerRepository, LedgerScope};
pub use report::{ReportError, ReportRepository};
