//! Caller-facing error taxonomy.
//!
//! The engine reports "not found" as 404 on most endpoints but as 500 on a
//! few. Folding happens through an explicit per-call allow-list of
//! not-found-equivalent codes so a genuine 500 is never masked on endpoints
//! that report it correctly.

use pda_kie_client::ClientError;
use pda_kie_core::{InvalidIdError, InvalidPageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Composite id did not parse; terminal input error.
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),

    /// Page number below the 1-based minimum; rejected before any network
    /// call.
    #[error(transparent)]
    InvalidPage(#[from] InvalidPageError),

    /// Target task or comment does not exist upstream.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Any other non-success status from the engine, with the original code
    /// and message kept for diagnostics.
    #[error("engine returned status {status}: {message}")]
    EngineResponse { status: u16, message: String },

    /// Transport or decode failure before a status could be interpreted.
    #[error("engine client: {0}")]
    Client(ClientError),

    /// Custom-query rows did not have the expected column layout.
    #[error("unexpected query result: {0}")]
    QueryResult(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Folds a client error for a single-entity endpoint: codes on the
    /// allow-list become [`ServiceError::NotFound`], any other status becomes
    /// [`ServiceError::EngineResponse`].
    pub(crate) fn for_entity(
        err: ClientError,
        not_found_codes: &[u16],
        entity: &'static str,
        id: &str,
    ) -> Self {
        match err {
            ClientError::Status { code, .. } if not_found_codes.contains(&code) => {
                Self::NotFound { entity, id: id.to_owned() }
            },
            other => Self::from_status(other),
        }
    }

    /// Folds a client error where no not-found translation applies.
    pub(crate) fn from_status(err: ClientError) -> Self {
        match err {
            ClientError::Status { code, message } => Self::EngineResponse { status: code, message },
            other => Self::Client(other),
        }
    }
}
