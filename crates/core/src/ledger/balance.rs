//! Account balance arithmetic.
//!
//! The balance delta of a posted line depends on the account's normal
//! balance side, not on a uniform debit-minus-credit rule: a credit to
//! a revenue account increases its balance, a credit to a cash account
//! decreases it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coa::BalanceSide;

/// Calculates the balance change a debit/credit pair causes on an
/// account with the given normal balance side.
///
/// Debit-normal: `debit - credit`. Credit-normal: `credit - debit`.
#[must_use]
pub fn balance_change(side: BalanceSide, debit: Decimal, credit: Decimal) -> Decimal {
    match side {
        BalanceSide::DebitNormal => debit - credit,
        BalanceSide::CreditNormal => credit - debit,
    }
}

/// Running balance carried across a chronological sequence of postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Balance before the current posting.
    pub previous_balance: Decimal,
    /// Balance after the current posting.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Starts a balance chain at the opening balance.
    #[must_use]
    pub const fn opening(balance: Decimal) -> Self {
        Self {
            previous_balance: balance,
            current_balance: balance,
        }
    }

    /// Folds the next balance change into the chain.
    #[must_use]
    pub fn apply(self, balance_change: Decimal) -> Self {
        Self {
            previous_balance: self.current_balance,
            current_balance: self.current_balance + balance_change,
        }
    }
}
