use thiserror::Error;

/// Fatal parse failures. Missing or malformed fields are defaulted instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Not a valid OFX file: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
