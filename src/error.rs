//! Crate-wide error type.

use thiserror::Error;

use crate::types::CentreId;

/// Errors surfaced by the map core or its providers.
#[derive(Error, Debug)]
pub enum Error {
    /// The dataset backend failed to return rows.
    #[error("dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// A centre id was referenced that is not in the geocoded dataset.
    #[error("unknown centre id {0}")]
    UnknownCentre(CentreId),

    /// An opaque failure from a host-side provider.
    #[error("provider error: {0}")]
    Provider(#[from] Box<dyn std::error::Error + Send + Sync>),
}
