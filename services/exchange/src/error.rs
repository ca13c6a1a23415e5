//! Error types for the exchange service

use crate::session::SessionError;
use thiserror::Error;
use types::AmmError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Session rejected: {0}")]
    Session(#[from] SessionError),

    #[error(transparent)]
    Pool(#[from] AmmError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scenario: {message}")]
    Scenario { message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ServiceError {
    /// True when showing the user a fresh quote and retrying can succeed
    pub fn is_requotable(&self) -> bool {
        matches!(self, ServiceError::Pool(err) if err.is_requotable())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
