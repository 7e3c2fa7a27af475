//! Financial report compilation.
//!
//! Pure business logic for the read-only reports:
//! - Profit & Loss
//! - Cash Flow
//! - Receivables Aging
//! - Sales Analysis
//! - Trial Balance

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::{ReportService, is_cash_code, is_cogs_code};
pub use types::{
    AccountActivity, AgingBuckets, AgingReport, CashAccountFlow, CashFlowReport, CustomerAging,
    ProfitLossReport, ProfitLossSection, ReceivableDocument, SalesAnalysisReport, SalesLine,
    SalesRankRow, TrialBalanceReport, TrialBalanceTotals,
};
