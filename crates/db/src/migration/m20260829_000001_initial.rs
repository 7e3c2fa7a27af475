//! Initial database migration.
//!
//! Creates the enums, tables, indexes, and triggers for the chart of
//! accounts and the journal.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_ITEMS_SQL).await?;

        // ============================================================
        // PART 4: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account types (leading code digit: 1=asset .. 5=expense)
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'revenue',
    'expense'
);

-- Journal entry lifecycle: draft -> posted -> reversed
CREATE TYPE journal_status AS ENUM ('draft', 'posted', 'reversed');
";

const CHART_OF_ACCOUNTS_SQL: &str = r"
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (code)
);

CREATE INDEX idx_coa_active ON chart_of_accounts(code) WHERE is_active = true;
CREATE INDEX idx_coa_type ON chart_of_accounts(account_type);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    entry_number VARCHAR(20) NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    reference_type VARCHAR(50),
    reference_id UUID,
    total_debit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_credit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    status journal_status NOT NULL DEFAULT 'draft',
    posted_at TIMESTAMPTZ,
    posted_by VARCHAR(255),
    reverses_entry_id UUID REFERENCES journal_entries(id),
    reversed_by_entry_id UUID REFERENCES journal_entries(id),
    deleted_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (entry_number),
    CONSTRAINT chk_totals_non_negative CHECK (
        total_debit >= 0 AND total_credit >= 0
    )
);

CREATE INDEX idx_je_status_date ON journal_entries(status, entry_date);
CREATE INDEX idx_je_reference ON journal_entries(reference_type, reference_id)
    WHERE reference_id IS NOT NULL;
CREATE INDEX idx_je_live ON journal_entries(entry_date) WHERE deleted_at IS NULL;
";

const JOURNAL_ITEMS_SQL: &str = r"
CREATE TABLE journal_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    line_no INTEGER NOT NULL,
    coa_code VARCHAR(20) NOT NULL REFERENCES chart_of_accounts(code),
    description VARCHAR(500),
    debit_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (journal_entry_id, line_no),
    CONSTRAINT chk_debit_or_credit CHECK (
        (debit_amount > 0 AND credit_amount = 0) OR
        (debit_amount = 0 AND credit_amount > 0)
    )
);

CREATE INDEX idx_ji_entry ON journal_items(journal_entry_id);
CREATE INDEX idx_ji_account ON journal_items(coa_code);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: set_updated_at
-- Stamps updated_at on every row update
-- ============================================================
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_coa_updated_at
BEFORE UPDATE ON chart_of_accounts
FOR EACH ROW
EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_je_updated_at
BEFORE UPDATE ON journal_entries
FOR EACH ROW
EXECUTE FUNCTION set_updated_at();

-- ============================================================
-- FUNCTION: check_entry_balance
-- Ensures double-entry balance (debit = credit, non-zero) at the
-- moment an entry transitions to posted
-- ============================================================
CREATE OR REPLACE FUNCTION check_entry_balance()
RETURNS TRIGGER AS $$
DECLARE
    item_debit NUMERIC(19, 4);
    item_credit NUMERIC(19, 4);
BEGIN
    SELECT
        COALESCE(SUM(debit_amount), 0),
        COALESCE(SUM(credit_amount), 0)
    INTO item_debit, item_credit
    FROM journal_items
    WHERE journal_entry_id = NEW.id;

    IF item_debit <> item_credit THEN
        RAISE EXCEPTION 'Journal entry is not balanced. Debit: %, Credit: %',
            item_debit, item_credit;
    END IF;

    IF item_debit = 0 THEN
        RAISE EXCEPTION 'Journal entry has no amounts to post';
    END IF;

    IF NEW.total_debit <> item_debit OR NEW.total_credit <> item_credit THEN
        RAISE EXCEPTION 'Journal entry totals do not match its items';
    END IF;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_check_entry_balance
BEFORE UPDATE ON journal_entries
FOR EACH ROW
WHEN (NEW.status = 'posted' AND OLD.status <> 'posted')
EXECUTE FUNCTION check_entry_balance();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS journal_items CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS chart_of_accounts CASCADE;

DROP FUNCTION IF EXISTS check_entry_balance CASCADE;
DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS journal_status;
DROP TYPE IF EXISTS account_type;
";
