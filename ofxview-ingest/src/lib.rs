//! ofxview-ingest: OFX 1.x statement parsing into typed accounts and transactions.

pub mod error;
pub mod fields;
pub mod parsers;
pub mod scan;
pub mod types;

pub use error::{IngestError, Result};
pub use parsers::ofx::{ParseEnv, is_ofx, parse_ofx, parse_ofx_with};
pub use types::{
    Account, Institution, ParsedStatement, SignOnInfo, Transaction, TransactionType,
    UNKNOWN_ACCOUNT_TYPE, UNKNOWN_DESCRIPTION,
};
