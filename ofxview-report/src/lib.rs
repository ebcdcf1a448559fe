//! ofxview-report: summaries, filtering, formatting and boundary payloads built
//! on top of parsed OFX statements.

pub mod api;
pub mod filter;
pub mod format;
pub mod summary;

pub use api::{ErrorKind, ErrorResponse, HealthResponse, StatementResponse};
pub use filter::{TransactionFilter, TypeFilter};
pub use format::{DEFAULT_LOCALE, default_locale, format_currency, format_date, language_of};
pub use summary::AccountSummary;
