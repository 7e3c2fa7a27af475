//! General ledger aggregation.
//!
//! Replays posted journal items into per-account views: an opening
//! balance carried from before the reporting window, chronological
//! lines each with a running balance, and a closing balance. The sign
//! convention is a property of the account type: debit-normal accounts
//! (asset, expense) grow with debits, credit-normal accounts
//! (liability, equity, revenue) grow with credits.

pub mod balance;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use balance::{RunningBalance, balance_change};
pub use service::LedgerService;
pub use types::{LedgerAccountView, LedgerEntryRow, LedgerLine};
