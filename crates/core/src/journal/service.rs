//! Journal entry validation and account resolution.
//!
//! This module provides the core business logic for validating journal
//! entries before they are persisted. Storage access is injected as a
//! lookup closure so the rules stay testable without a database.

use crate::coa::Account;

use super::error::JournalError;
use super::types::{CreateEntryInput, EntryTotals, ResolvedItem};
use super::validation::validate_items;

/// Stateless service validating entries before persistence.
pub struct JournalService;

impl JournalService {
    /// Validates an entry and resolves its account codes.
    ///
    /// Steps, in order:
    /// 1. shape and balance rules (`validate_items`), recomputing the
    ///    totals from the items;
    /// 2. chart of accounts resolution for every line, rejecting codes
    ///    that are missing or belong to deactivated accounts.
    ///
    /// # Arguments
    ///
    /// * `input` - The entry to validate
    /// * `lookup_account` - Function resolving a `coa_code` to an account
    ///
    /// # Returns
    ///
    /// A tuple of (resolved items, recomputed totals) on success.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` if any rule fails; nothing is persisted in
    /// that case.
    pub fn validate_and_resolve<F>(
        input: &CreateEntryInput,
        lookup_account: F,
    ) -> Result<(Vec<ResolvedItem>, EntryTotals), JournalError>
    where
        F: Fn(&str) -> Option<Account>,
    {
        let totals = validate_items(&input.items)?;

        let mut resolved = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let account = lookup_account(&item.coa_code)
                .ok_or_else(|| JournalError::UnknownAccount(item.coa_code.clone()))?;

            if !account.is_active {
                return Err(JournalError::InactiveAccount(item.coa_code.clone()));
            }

            resolved.push(ResolvedItem {
                account_id: account.id,
                coa_code: item.coa_code.clone(),
                description: item.description.clone(),
                amount: item.amount,
            });
        }

        Ok((resolved, totals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coa::{Account, AccountType};
    use crate::journal::types::{JournalItemInput, LineAmount};
    use chrono::NaiveDate;
    use ledgera_shared::types::AccountId;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn make_account(code: &str, is_active: bool) -> Account {
        Account {
            id: AccountId::new(),
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type: AccountType::from_code(code).unwrap(),
            is_active,
        }
    }

    fn registry(accounts: Vec<Account>) -> HashMap<String, Account> {
        accounts
            .into_iter()
            .map(|account| (account.code.clone(), account))
            .collect()
    }

    fn make_item(coa_code: &str, amount: LineAmount) -> JournalItemInput {
        JournalItemInput {
            coa_code: coa_code.to_string(),
            description: None,
            amount,
        }
    }

    fn make_input(items: Vec<JournalItemInput>) -> CreateEntryInput {
        CreateEntryInput {
            entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            description: "Test entry".to_string(),
            reference_type: None,
            reference_id: None,
            items,
        }
    }

    #[test]
    fn test_valid_entry_resolves_all_lines() {
        let accounts = registry(vec![make_account("1100", true), make_account("4000", true)]);
        let input = make_input(vec![
            make_item("1100", LineAmount::Debit(dec!(100))),
            make_item("4000", LineAmount::Credit(dec!(100))),
        ]);

        let (resolved, totals) =
            JournalService::validate_and_resolve(&input, |code| accounts.get(code).cloned())
                .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].coa_code, "1100");
        assert_eq!(resolved[0].account_id, accounts["1100"].id);
        assert_eq!(resolved[1].account_id, accounts["4000"].id);
        assert!(totals.is_balanced);
        assert_eq!(totals.total_debit, dec!(100));
    }

    #[test]
    fn test_unknown_account_rejected() {
        let accounts = registry(vec![make_account("1100", true)]);
        let input = make_input(vec![
            make_item("1100", LineAmount::Debit(dec!(100))),
            make_item("4000", LineAmount::Credit(dec!(100))),
        ]);

        let err = JournalService::validate_and_resolve(&input, |code| accounts.get(code).cloned())
            .unwrap_err();

        assert_eq!(err, JournalError::UnknownAccount("4000".to_string()));
    }

    #[test]
    fn test_inactive_account_rejected() {
        let accounts = registry(vec![make_account("1100", true), make_account("4000", false)]);
        let input = make_input(vec![
            make_item("1100", LineAmount::Debit(dec!(100))),
            make_item("4000", LineAmount::Credit(dec!(100))),
        ]);

        let err = JournalService::validate_and_resolve(&input, |code| accounts.get(code).cloned())
            .unwrap_err();

        assert_eq!(err, JournalError::InactiveAccount("4000".to_string()));
    }

    #[test]
    fn test_shape_rules_run_before_resolution() {
        // Unbalanced entry fails validation even though the codes would
        // not resolve either; the balance error wins.
        let input = make_input(vec![
            make_item("1100", LineAmount::Debit(dec!(100))),
            make_item("4000", LineAmount::Credit(dec!(50))),
        ]);

        let err = JournalService::validate_and_resolve(&input, |_| None).unwrap_err();

        assert_eq!(
            err,
            JournalError::Unbalanced {
                total_debit: dec!(100),
                total_credit: dec!(50),
            }
        );
    }

    #[test]
    fn test_resolution_preserves_line_order_and_amounts() {
        let accounts = registry(vec![
            make_account("5200", true),
            make_account("5300", true),
            make_account("1100", true),
        ]);
        let input = make_input(vec![
            make_item("5200", LineAmount::Debit(dec!(500))),
            make_item("5300", LineAmount::Debit(dec!(300))),
            make_item("1100", LineAmount::Credit(dec!(800))),
        ]);

        let (resolved, totals) =
            JournalService::validate_and_resolve(&input, |code| accounts.get(code).cloned())
                .unwrap();

        assert_eq!(resolved[0].amount, LineAmount::Debit(dec!(500)));
        assert_eq!(resolved[1].amount, LineAmount::Debit(dec!(300)));
        assert_eq!(resolved[2].amount, LineAmount::Credit(dec!(800)));
        assert_eq!(totals.total_debit, dec!(800));
        assert_eq!(totals.total_credit, dec!(800));
    }
}
