use std::str::FromStr;

use ofxview_ingest::{Transaction, TransactionType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl TypeFilter {
    pub fn accepts(&self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Credit => kind == TransactionType::Credit,
            TypeFilter::Debit => kind == TransactionType::Debit,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "credit" | "credits" => Ok(TypeFilter::Credit),
            "debit" | "debits" => Ok(TypeFilter::Debit),
            other => Err(format!("unknown transaction type filter: {other}")),
        }
    }
}

/// Type plus free-text search over description and memo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: TypeFilter,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn new(kind: TypeFilter, search: Option<String>) -> Self {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self { kind, search }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.kind.accepts(txn.kind) {
            return false;
        }
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        txn.description.to_lowercase().contains(term)
            || txn
                .memo
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains(term))
    }

    /// Matching transactions in their original order.
    pub fn apply<'a>(&self, txns: &'a [Transaction]) -> Vec<&'a Transaction> {
        txns.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(desc: &str, memo: Option<&str>, amount: f64) -> Transaction {
        Transaction {
            id: desc.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            amount,
            kind: TransactionType::from_amount(amount),
            description: desc.to_string(),
            memo: memo.map(str::to_string),
        }
    }

    #[test]
    fn test_type_filter_from_str() {
        assert_eq!("ALL".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert_eq!("Credit".parse::<TypeFilter>(), Ok(TypeFilter::Credit));
        assert_eq!("debits".parse::<TypeFilter>(), Ok(TypeFilter::Debit));
        assert!("refund".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_search_hits_description_or_memo() {
        let txns = vec![
            txn("Coffee Shop", None, -4.0),
            txn("Transfer", Some("rent for MARCH"), -900.0),
            txn("Salary", Some("ACME"), 3000.0),
        ];
        let f = TransactionFilter::new(TypeFilter::All, Some("  march ".to_string()));
        let hits = f.apply(&txns);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "Transfer");

        let f = TransactionFilter::new(TypeFilter::All, Some("coffee".to_string()));
        assert_eq!(f.apply(&txns).len(), 1);
    }

    #[test]
    fn test_type_and_search_combine() {
        let txns = vec![
            txn("PIX sent", None, -10.0),
            txn("PIX received", None, 25.0),
        ];
        let f = TransactionFilter::new(TypeFilter::Credit, Some("pix".to_string()));
        let hits = f.apply(&txns);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "PIX received");
    }

    #[test]
    fn test_blank_search_matches_all() {
        let txns = vec![txn("a", None, 1.0), txn("b", None, -1.0)];
        let f = TransactionFilter::new(TypeFilter::All, Some("   ".to_string()));
        assert_eq!(f.search, None);
        assert_eq!(f.apply(&txns).len(), 2);
        assert!(TransactionFilter::default().matches(&txns[1]));
    }
}
