use thiserror::Error;

use crate::history::HistoryError;
use crate::providers::ProviderError;

#[derive(Debug, Error)]
pub enum TripError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("external lookup failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("trip history error: {0}")]
    History(#[from] HistoryError),
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

impl TripError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
