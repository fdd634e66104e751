use crate::types::ClaimId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed detection_date {value:?} on claim {claim_id}")]
    MalformedDate { claim_id: ClaimId, value: String },

    #[error("Claim {claim_id} has a non-finite claim_amount {value}")]
    InvalidAmount { claim_id: ClaimId, value: f64 },

    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
