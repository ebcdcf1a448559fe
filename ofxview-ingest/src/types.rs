use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Description used until a NAME or MEMO tag supplies a better one.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown transaction";

/// Account type used when the statement carries no ACCTTYPE tag.
pub const UNKNOWN_ACCOUNT_TYPE: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Credit,
    #[default]
    Debit,
}

impl TransactionType {
    /// Zero counts as a credit.
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            TransactionType::Credit
        } else {
            TransactionType::Debit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
        }
    }
}

/// One STMTTRN record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// FITID, or a synthesized `txn-` token when the bank omitted one
    pub id: String,
    pub date: NaiveDate,
    /// Positive means money in, negative means money out.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub account_type: String,
    pub bank_id: Option<String>,
    /// Most recent first.
    pub transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(account_id: impl Into<String>, account_type: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            account_type: account_type.into(),
            bank_id: None,
            transactions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub name: Option<String>,
    pub id: Option<String>,
}

/// Contents of the `<SONRS>` sign-on response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignOnInfo {
    pub dt_server: Option<String>,
    pub language: Option<String>,
    pub institution: Option<Institution>,
}

/// Normalized output of the OFX parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub sign_on: Option<SignOnInfo>,
    /// Empty when the file has no ACCTID; otherwise exactly one entry.
    pub accounts: Vec<Account>,
}

impl ParsedStatement {
    pub fn transaction_count(&self) -> usize {
        self.accounts.iter().map(|a| a.transactions.len()).sum()
    }
}
