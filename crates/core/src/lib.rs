//! Core business logic for Ledgera.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `coa` - Chart of accounts classification
//! - `journal` - Journal entry validation, numbering, and reversal
//! - `ledger` - Running balances and per-account ledger views
//! - `reports` - Financial report compilation

pub mod coa;
pub mod journal;
pub mod ledger;
pub mod reports;
