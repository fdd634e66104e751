//! Input records and the in-memory dataset snapshot.
//!
//! RULE: The engine only ever borrows a Dataset immutably.
//! Loaders build one, the pipeline reads it, nothing writes it back.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    types::{ClaimId, CustomerId, PolicyId},
};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::path::Path;

pub const CUSTOMERS_FILE: &str = "customers_sample.csv";
pub const POLICIES_FILE: &str = "policies_sample.csv";
pub const CLAIMS_FILE: &str = "claims_sample.csv";
pub const FRAUD_DETECTIONS_FILE: &str = "fraud_detection_sample.csv";

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub policy_id: PolicyId,
    pub customer_id: CustomerId,
    pub policy_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: ClaimId,
    pub policy_id: PolicyId,
    pub claim_amount: f64,
    /// Raw date text as loaded. Not used by the fraud report.
    pub claim_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudDetection {
    pub claim_id: ClaimId,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_fraudulent: bool,
    /// Empty CSV cells and SQL NULL both arrive as None.
    #[serde(default)]
    pub detected_by: Option<String>,
    /// Raw date text; parsed by the claim joiner.
    pub detection_date: String,
}

// ── Dataset ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub policies: Vec<Policy>,
    pub claims: Vec<Claim>,
    pub fraud_detections: Vec<FraudDetection>,
}

impl Dataset {
    /// Read the four sample tables from `dir`.
    pub fn load_csv_dir(dir: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let dir = dir.as_ref();
        let dataset = Self {
            customers: read_csv(&dir.join(CUSTOMERS_FILE))?,
            policies: read_csv(&dir.join(POLICIES_FILE))?,
            claims: read_csv(&dir.join(CLAIMS_FILE))?,
            fraud_detections: read_csv(&dir.join(FRAUD_DETECTIONS_FILE))?,
        };
        log::info!(
            "dataset: loaded {} customers, {} policies, {} claims, {} fraud detections from {}",
            dataset.customers.len(),
            dataset.policies.len(),
            dataset.claims.len(),
            dataset.fraud_detections.len(),
            dir.display(),
        );
        Ok(dataset)
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
            && self.policies.is_empty()
            && self.claims.is_empty()
            && self.fraud_detections.is_empty()
    }
}

fn read_csv<T: de::DeserializeOwned>(path: &Path) -> AnalyticsResult<Vec<T>> {
    let file = File::open(path).map_err(|source| AnalyticsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;
    log::debug!("dataset: read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Accepts the boolean spellings pandas and SQL exports produce.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(i) => Ok(i != 0),
        Flag::Float(f) => Ok(f != 0.0),
        Flag::Text(s) => parse_flag(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid boolean flag {s:?}"))),
    }
}

pub(crate) fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}
