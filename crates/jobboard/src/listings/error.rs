use std::time::Duration;
use thiserror::Error;

/// The single failure the listing layer knows about: the data source could not
/// answer. Callers map it to a fallback value.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{op} timed out after {after:?}")]
    Timeout { op: &'static str, after: Duration },
}

pub type ListingResult<T> = Result<T, ListingError>;
