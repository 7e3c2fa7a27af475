//! Report data types.

use chrono::NaiveDate;
use ledgera_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coa::AccountType;

/// Per-account activity over a reporting period.
///
/// The shared input shape for the ledger-derived reports: the report
/// repository sums posted debits and credits per account and computes
/// the typed balance via the account's normal side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActivity {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Sum of posted debits in the period.
    pub total_debit: Decimal,
    /// Sum of posted credits in the period.
    pub total_credit: Decimal,
    /// Net balance per the account's normal side.
    pub balance: Decimal,
}

/// One section of the profit and loss report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfitLossSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts contributing to this section.
    pub accounts: Vec<AccountActivity>,
}

/// Profit and loss report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitLossReport {
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Revenue section (4xxx accounts).
    pub revenue: ProfitLossSection,
    /// Cost of goods sold section (51xx accounts).
    pub cost_of_goods_sold: ProfitLossSection,
    /// Revenue minus cost of goods sold.
    pub gross_profit: Decimal,
    /// Operating expense section (remaining 5xxx accounts).
    pub operating_expenses: ProfitLossSection,
    /// Gross profit minus operating expenses.
    pub net_profit: Decimal,
    /// Net profit as a percentage of revenue (zero when revenue is zero).
    pub margin_pct: Decimal,
}

/// Period inflows and outflows of one cash or bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashAccountFlow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Sum of posted debits in the period (money in).
    pub inflows: Decimal,
    /// Sum of posted credits in the period (money out).
    pub outflows: Decimal,
}

/// Cash flow report over the cash and bank accounts (11xx).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowReport {
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Cash balance carried from before the period.
    pub opening_cash: Decimal,
    /// Total money in during the period.
    pub inflows: Decimal,
    /// Total money out during the period.
    pub outflows: Decimal,
    /// Inflows minus outflows.
    pub net_change: Decimal,
    /// Opening cash plus net change.
    pub closing_cash: Decimal,
    /// Per-account breakdown.
    pub accounts: Vec<CashAccountFlow>,
}

/// An unpaid or partially paid receivable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivableDocument {
    /// Customer name.
    pub customer: String,
    /// Document reference (invoice number).
    pub reference: String,
    /// Date the amount fell due.
    pub due_date: NaiveDate,
    /// Outstanding amount still owed.
    pub outstanding: Decimal,
}

/// Amounts bucketed by days past due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBuckets {
    /// Due within the last 30 days (or not yet due).
    pub days_0_30: Decimal,
    /// 31 to 60 days past due.
    pub days_31_60: Decimal,
    /// 61 to 90 days past due.
    pub days_61_90: Decimal,
    /// More than 90 days past due.
    pub over_90: Decimal,
}

impl AgingBuckets {
    /// Adds an amount to the bucket for the given days past due.
    pub fn add(&mut self, days_past_due: i64, amount: Decimal) {
        match days_past_due {
            ..=30 => self.days_0_30 += amount,
            31..=60 => self.days_31_60 += amount,
            61..=90 => self.days_61_90 += amount,
            _ => self.over_90 += amount,
        }
    }

    /// Sum of all four buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.days_0_30 + self.days_31_60 + self.days_61_90 + self.over_90
    }
}

/// Aged outstanding amounts for one customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAging {
    /// Customer name.
    pub customer: String,
    /// Outstanding amounts per bucket.
    pub buckets: AgingBuckets,
    /// Total outstanding across buckets.
    pub total_outstanding: Decimal,
}

/// Receivables aging report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingReport {
    /// Date the aging is computed against.
    pub as_of: NaiveDate,
    /// Per-customer rows, ordered by total outstanding descending.
    pub customers: Vec<CustomerAging>,
    /// Grand totals per bucket.
    pub totals: AgingBuckets,
    /// Total outstanding across all buckets.
    pub total_outstanding: Decimal,
    /// Each bucket's share of the total, in percent.
    pub bucket_percentages: AgingBuckets,
}

/// A sales line item from the sales module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesLine {
    /// Product or service name.
    pub product: String,
    /// Customer name.
    pub customer: String,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Revenue amount for the line.
    pub amount: Decimal,
}

/// One row in a sales ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRankRow {
    /// Product or customer name.
    pub name: String,
    /// Total quantity across lines.
    pub quantity: Decimal,
    /// Total revenue across lines.
    pub revenue: Decimal,
    /// Share of total revenue, in percent.
    pub share_pct: Decimal,
}

/// Sales analysis report: products and customers ranked by revenue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesAnalysisReport {
    /// Total revenue across all lines.
    pub total_revenue: Decimal,
    /// Products ranked by revenue, descending.
    pub products: Vec<SalesRankRow>,
    /// Customers ranked by revenue, descending.
    pub customers: Vec<SalesRankRow>,
}

/// Trial balance totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit across all accounts.
    pub total_debit: Decimal,
    /// Total credit across all accounts.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Per-account activity, ordered by code.
    pub accounts: Vec<AccountActivity>,
    /// Totals and the balanced self-check.
    pub totals: TrialBalanceTotals,
}
