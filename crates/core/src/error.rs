//! Input-validation errors shared across the adapter crates.

use thiserror::Error;

/// Composite task/process id did not match `<instanceId>@<containerId>`.
///
/// Terminal input error: missing separator or a non-numeric instance part is
/// never retryable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid composite id {raw:?}: expected <instanceId>@<containerId>")]
pub struct InvalidIdError {
    pub raw: String,
}

/// Requested page number below the 1-based minimum.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("page numbers start at 1, got {page}")]
pub struct InvalidPageError {
    pub page: u32,
}
