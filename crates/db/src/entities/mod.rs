//! `SeaORM` entity definitions.

pub mod chart_of_accounts;
pub mod journal_entries;
pub mod journal_items;
pub mod sea_orm_active_enums;
