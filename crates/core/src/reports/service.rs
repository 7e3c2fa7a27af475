//! Report compilation service.
//!
//! Pure folds over already-fetched rows: the report repository supplies
//! per-account period activity, the source-document modules supply
//! receivable and sales shapes. Nothing here touches storage.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::coa::AccountType;

use super::error::ReportError;
use super::types::{
    AccountActivity, AgingBuckets, AgingReport, CashAccountFlow, CashFlowReport, CustomerAging,
    ProfitLossReport, ProfitLossSection, ReceivableDocument, SalesAnalysisReport, SalesLine,
    SalesRankRow, TrialBalanceReport, TrialBalanceTotals,
};

/// Code prefix of cost-of-goods-sold expense accounts.
const COGS_CODE_PREFIX: &str = "51";

/// Code prefix of cash and bank asset accounts.
const CASH_CODE_PREFIX: &str = "11";

/// Returns true for cost-of-goods-sold expense codes (51xx).
#[must_use]
pub fn is_cogs_code(code: &str) -> bool {
    code.starts_with(COGS_CODE_PREFIX)
}

/// Returns true for cash and bank account codes (11xx).
#[must_use]
pub fn is_cash_code(code: &str) -> bool {
    code.starts_with(CASH_CODE_PREFIX)
}

fn percentage_of(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        part / total * Decimal::ONE_HUNDRED
    }
}

fn check_period(start: NaiveDate, end: NaiveDate) -> Result<(), ReportError> {
    if start > end {
        return Err(ReportError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Stateless service compiling financial reports.
pub struct ReportService;

impl ReportService {
    /// Compiles the profit and loss report from period activity.
    ///
    /// Revenue accounts (4xxx) minus cost of goods sold (51xx) gives
    /// gross profit; minus the remaining expense accounts (5xxx) gives
    /// net profit. The margin is net profit over revenue, in percent.
    /// Accounts of other types are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when the period is inverted.
    pub fn compile_profit_loss(
        period_start: NaiveDate,
        period_end: NaiveDate,
        activity: Vec<AccountActivity>,
    ) -> Result<ProfitLossReport, ReportError> {
        check_period(period_start, period_end)?;

        let mut revenue = ProfitLossSection::default();
        let mut cogs = ProfitLossSection::default();
        let mut operating_expenses = ProfitLossSection::default();

        for account in activity {
            match account.account_type {
                AccountType::Revenue => add_to_section(&mut revenue, account),
                AccountType::Expense if is_cogs_code(&account.code) => {
                    add_to_section(&mut cogs, account);
                }
                AccountType::Expense => add_to_section(&mut operating_expenses, account),
                _ => {}
            }
        }

        let gross_profit = revenue.total - cogs.total;
        let net_profit = gross_profit - operating_expenses.total;
        let margin_pct = percentage_of(net_profit, revenue.total);

        Ok(ProfitLossReport {
            period_start,
            period_end,
            revenue,
            cost_of_goods_sold: cogs,
            gross_profit,
            operating_expenses,
            net_profit,
            margin_pct,
        })
    }

    /// Compiles the cash flow report over the cash and bank accounts.
    ///
    /// `opening_cash` is the replayed pre-period balance of the 11xx
    /// accounts; `flows` carries each account's period debits (in) and
    /// credits (out).
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when the period is inverted.
    pub fn compile_cash_flow(
        period_start: NaiveDate,
        period_end: NaiveDate,
        opening_cash: Decimal,
        flows: Vec<CashAccountFlow>,
    ) -> Result<CashFlowReport, ReportError> {
        check_period(period_start, period_end)?;

        let inflows: Decimal = flows.iter().map(|flow| flow.inflows).sum();
        let outflows: Decimal = flows.iter().map(|flow| flow.outflows).sum();
        let net_change = inflows - outflows;

        Ok(CashFlowReport {
            period_start,
            period_end,
            opening_cash,
            inflows,
            outflows,
            net_change,
            closing_cash: opening_cash + net_change,
            accounts: flows,
        })
    }

    /// Compiles the receivables aging report.
    ///
    /// Days past due is `as_of - due_date`, clamped at zero so
    /// not-yet-due documents land in the first bucket. Documents with
    /// no outstanding amount (paid or overpaid) are skipped. Customers
    /// are ordered by total outstanding, descending, ties by name.
    #[must_use]
    pub fn compile_aging(as_of: NaiveDate, receivables: &[ReceivableDocument]) -> AgingReport {
        let mut per_customer: BTreeMap<String, AgingBuckets> = BTreeMap::new();
        let mut totals = AgingBuckets::default();

        for document in receivables {
            if document.outstanding <= Decimal::ZERO {
                continue;
            }

            let days_past_due = (as_of - document.due_date).num_days().max(0);
            totals.add(days_past_due, document.outstanding);
            per_customer
                .entry(document.customer.clone())
                .or_default()
                .add(days_past_due, document.outstanding);
        }

        let mut customers: Vec<CustomerAging> = per_customer
            .into_iter()
            .map(|(customer, buckets)| CustomerAging {
                customer,
                total_outstanding: buckets.total(),
                buckets,
            })
            .collect();
        customers.sort_by(|a, b| {
            b.total_outstanding
                .cmp(&a.total_outstanding)
                .then_with(|| a.customer.cmp(&b.customer))
        });

        let total_outstanding = totals.total();
        let bucket_percentages = AgingBuckets {
            days_0_30: percentage_of(totals.days_0_30, total_outstanding),
            days_31_60: percentage_of(totals.days_31_60, total_outstanding),
            days_61_90: percentage_of(totals.days_61_90, total_outstanding),
            over_90: percentage_of(totals.over_90, total_outstanding),
        };

        AgingReport {
            as_of,
            customers,
            totals,
            total_outstanding,
            bucket_percentages,
        }
    }

    /// Compiles the sales analysis report.
    ///
    /// Products and customers are ranked by summed revenue, descending,
    /// ties broken by name so the ranking is deterministic.
    #[must_use]
    pub fn compile_sales_analysis(lines: &[SalesLine]) -> SalesAnalysisReport {
        let total_revenue: Decimal = lines.iter().map(|line| line.amount).sum();

        let products = rank_by(lines, total_revenue, |line| &line.product);
        let customers = rank_by(lines, total_revenue, |line| &line.customer);

        SalesAnalysisReport {
            total_revenue,
            products,
            customers,
        }
    }

    /// Compiles the trial balance report from period activity.
    ///
    /// The bookkeeping self-check: summed debits must equal summed
    /// credits across all accounts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when the period is inverted.
    pub fn compile_trial_balance(
        period_start: NaiveDate,
        period_end: NaiveDate,
        accounts: Vec<AccountActivity>,
    ) -> Result<TrialBalanceReport, ReportError> {
        check_period(period_start, period_end)?;

        let total_debit: Decimal = accounts.iter().map(|account| account.total_debit).sum();
        let total_credit: Decimal = accounts.iter().map(|account| account.total_credit).sum();

        Ok(TrialBalanceReport {
            period_start,
            period_end,
            accounts,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        })
    }
}

fn add_to_section(section: &mut ProfitLossSection, account: AccountActivity) {
    section.total += account.balance;
    section.accounts.push(account);
}

fn rank_by<'a, F>(lines: &'a [SalesLine], total_revenue: Decimal, key: F) -> Vec<SalesRankRow>
where
    F: Fn(&'a SalesLine) -> &'a str,
{
    let mut grouped: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
    for line in lines {
        let entry = grouped.entry(key(line)).or_default();
        entry.0 += line.quantity;
        entry.1 += line.amount;
    }

    let mut rows: Vec<SalesRankRow> = grouped
        .into_iter()
        .map(|(name, (quantity, revenue))| SalesRankRow {
            name: name.to_string(),
            quantity,
            revenue,
            share_pct: percentage_of(revenue, total_revenue),
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
    rows
}
