//! JSON payloads for the single-file upload boundary.
//!
//! Shapes mirror what the web viewer consumes: camelCase keys, ISO-8601 timestamps,
//! `bankId` and `memo` never null.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use ofxview_ingest::{Account, IngestError, ParsedStatement, Transaction, TransactionType};
use serde::{Deserialize, Serialize};

pub const MISSING_BANK_ID: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub id: String,
    pub date: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    pub account_id: String,
    pub account_type: String,
    pub bank_id: String,
    pub transactions: Vec<TransactionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub processing_timestamp: String,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResponse {
    pub accounts: Vec<AccountPayload>,
    pub locale: String,
    pub meta: Meta,
}

/// Calendar date as a UTC-midnight timestamp, e.g. `2024-01-15T00:00:00.000Z`.
pub fn iso_date(date: NaiveDate) -> String {
    iso_timestamp(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&Transaction> for TransactionPayload {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: iso_date(t.date),
            amount: t.amount,
            kind: t.kind,
            description: t.description.clone(),
            memo: t.memo.clone().unwrap_or_default(),
        }
    }
}

impl From<&Account> for AccountPayload {
    fn from(a: &Account) -> Self {
        Self {
            account_id: a.account_id.clone(),
            account_type: a.account_type.clone(),
            bank_id: a
                .bank_id
                .clone()
                .unwrap_or_else(|| MISSING_BANK_ID.to_string()),
            transactions: a.transactions.iter().map(Into::into).collect(),
        }
    }
}

impl StatementResponse {
    pub fn from_statement(
        stmt: &ParsedStatement,
        locale: &str,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            accounts: stmt.accounts.iter().map(Into::into).collect(),
            locale: locale.to_string(),
            meta: Meta {
                processing_timestamp: iso_timestamp(processed_at),
                total_transactions: stmt.transaction_count(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoFile,
    TooLarge,
    InvalidFormat,
    Internal,
}

impl ErrorKind {
    /// HTTP status the boundary answers with.
    pub fn status(&self) -> u16 {
        match self {
            ErrorKind::NoFile | ErrorKind::InvalidFormat => 400,
            ErrorKind::TooLarge => 413,
            ErrorKind::Internal => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NoFile => "No file uploaded",
            ErrorKind::TooLarge => "File too large",
            ErrorKind::InvalidFormat => "Invalid OFX file format",
            ErrorKind::Internal => "Error processing OFX file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(kind: ErrorKind, details: impl Into<String>) -> Self {
        Self {
            error: kind.message().to_string(),
            details: details.into(),
        }
    }

    /// Internal failures only carry the short generic message.
    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal, "Unexpected internal error")
    }
}

impl From<&IngestError> for ErrorResponse {
    fn from(err: &IngestError) -> Self {
        match err {
            IngestError::Format(_) => ErrorResponse::new(ErrorKind::InvalidFormat, err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok(version: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_is_utc_midnight_millis() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(iso_date(d), "2024-01-15T00:00:00.000Z");
    }

    #[test]
    fn test_error_kinds_map_to_status() {
        assert_eq!(ErrorKind::NoFile.status(), 400);
        assert_eq!(ErrorKind::InvalidFormat.status(), 400);
        assert_eq!(ErrorKind::TooLarge.status(), 413);
        assert!(ErrorKind::TooLarge.is_client_error());
        assert_eq!(ErrorKind::Internal.status(), 500);
        assert!(ErrorKind::InvalidFormat.is_client_error());
        assert!(!ErrorKind::Internal.is_client_error());
    }

    #[test]
    fn test_format_error_payload() {
        let err = IngestError::Format("missing <OFX> root tag".to_string());
        let resp = ErrorResponse::from(&err);
        assert_eq!(resp.error, "Invalid OFX file format");
        assert!(resp.details.contains("missing <OFX> root tag"));
    }

    #[test]
    fn test_health_payload() {
        let json = serde_json::to_value(HealthResponse::ok("0.1.0")).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], "0.1.0");
    }
}
