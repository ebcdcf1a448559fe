//! Per-account totals and date range, computed from the parsed transaction list.

use chrono::NaiveDate;
use ofxview_ingest::{Transaction, TransactionType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub total_transactions: usize,
    /// Sum of |amount| over credits
    pub total_credits: f64,
    /// Sum of |amount| over debits
    pub total_debits: f64,
    /// credits - debits
    pub net_amount: f64,
    pub oldest: Option<NaiveDate>,
    pub newest: Option<NaiveDate>,
}

impl AccountSummary {
    pub fn from_transactions(txns: &[Transaction]) -> Self {
        let mut summary = AccountSummary {
            total_transactions: txns.len(),
            ..Default::default()
        };

        for txn in txns {
            match txn.kind {
                TransactionType::Credit => summary.total_credits += txn.amount.abs(),
                TransactionType::Debit => summary.total_debits += txn.amount.abs(),
            }
        }
        summary.net_amount = summary.total_credits - summary.total_debits;
        summary.oldest = txns.iter().map(|t| t.date).min();
        summary.newest = txns.iter().map(|t| t.date).max();
        summary
    }

    pub fn is_positive(&self) -> bool {
        self.net_amount >= 0.0
    }
}
