//! Database seeder for Ledgera development and testing.
//!
//! Seeds a default chart of accounts for a small trading business and,
//! outside production mode, a couple of sample journal entries. Safe to
//! run repeatedly; existing rows are left alone.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Utc};
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgera_core::coa::AccountType;
use ledgera_core::journal::{CreateEntryInput, JournalItemInput, LineAmount};
use ledgera_db::repositories::{
    AccountError, AccountRepository, CreateAccountInput, EntryFilter, JournalRepository,
};
use ledgera_shared::AppConfig;

/// Reference type marking seeded sample entries, so reruns can detect
/// them.
const SEED_REFERENCE_TYPE: &str = "seed";

/// Default chart of accounts for a small trading business.
const DEFAULT_ACCOUNTS: &[(&str, &str, AccountType)] = &[
    ("1100", "Cash on Hand", AccountType::Asset),
    ("1110", "Bank Account", AccountType::Asset),
    ("1200", "Accounts Receivable", AccountType::Asset),
    ("1300", "Inventory", AccountType::Asset),
    ("1500", "Equipment", AccountType::Asset),
    ("2100", "Accounts Payable", AccountType::Liability),
    ("2200", "Tax Payable", AccountType::Liability),
    ("3000", "Owner's Equity", AccountType::Equity),
    ("3100", "Retained Earnings", AccountType::Equity),
    ("4000", "Sales Revenue", AccountType::Revenue),
    ("4100", "Other Income", AccountType::Revenue),
    ("5100", "Cost of Goods Sold", AccountType::Expense),
    ("5200", "Salaries Expense", AccountType::Expense),
    ("5300", "Rent Expense", AccountType::Expense),
    ("5400", "Utilities Expense", AccountType::Expense),
    ("5500", "Marketing Expense", AccountType::Expense),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgera=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().expect("Failed to load configuration");
    let db = ledgera_db::connect(&config.database.url).await?;
    info!("Connected to database");

    seed_chart_of_accounts(&db).await?;

    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
    if run_mode == "production" {
        info!("Production mode, skipping sample entries");
    } else {
        seed_sample_entries(&db).await?;
    }

    info!("Seeding complete");
    Ok(())
}

/// Seeds the default chart of accounts, skipping codes that exist.
async fn seed_chart_of_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    let accounts = AccountRepository::new(db.clone());

    for &(code, name, account_type) in DEFAULT_ACCOUNTS {
        match accounts
            .create_account(CreateAccountInput {
                code: code.to_string(),
                name: name.to_string(),
                account_type,
            })
            .await
        {
            Ok(_) => info!(code, name, "account seeded"),
            Err(AccountError::DuplicateCode(_)) => {
                info!(code, "account already exists, skipping");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Seeds a posted cash sale and a draft expense accrual.
async fn seed_sample_entries(db: &DatabaseConnection) -> anyhow::Result<()> {
    let journal = JournalRepository::new(db.clone());

    let filter = EntryFilter {
        reference_type: Some(SEED_REFERENCE_TYPE.to_string()),
        ..Default::default()
    };
    if !journal.list_entries(&filter).await?.is_empty() {
        info!("Sample entries already exist, skipping");
        return Ok(());
    }

    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    // Posted cash sale.
    let sale = journal
        .create_entry(CreateEntryInput {
            entry_date: month_start,
            description: "Cash sale".to_string(),
            reference_type: Some(SEED_REFERENCE_TYPE.to_string()),
            reference_id: None,
            items: vec![
                JournalItemInput {
                    coa_code: "1100".to_string(),
                    description: Some("Cash received".to_string()),
                    amount: LineAmount::Debit(dec!(15000000)),
                },
                JournalItemInput {
                    coa_code: "4000".to_string(),
                    description: None,
                    amount: LineAmount::Credit(dec!(15000000)),
                },
            ],
        })
        .await?;
    journal
        .post_entry(sale.entry.id, Some("seeder".to_string()))
        .await?;
    info!(entry_number = %sale.entry.entry_number, "sample cash sale posted");

    // Draft rent accrual, left unposted on purpose.
    let accrual = journal
        .create_entry(CreateEntryInput {
            entry_date: today,
            description: "Office rent accrual".to_string(),
            reference_type: Some(SEED_REFERENCE_TYPE.to_string()),
            reference_id: None,
            items: vec![
                JournalItemInput {
                    coa_code: "5300".to_string(),
                    description: None,
                    amount: LineAmount::Debit(dec!(2500000)),
                },
                JournalItemInput {
                    coa_code: "2100".to_string(),
                    description: Some("Rent payable".to_string()),
                    amount: LineAmount::Credit(dec!(2500000)),
                },
            ],
        })
        .await?;
    info!(entry_number = %accrual.entry.entry_number, "sample rent accrual drafted");

    Ok(())
}
