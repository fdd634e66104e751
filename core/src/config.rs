//! Analytics configuration.
//!
//! Loaded from a JSON file by the runner; every field has a default so a
//! partial file (or none at all) is valid.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    types::Year,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_YEAR: Year = 2024;
pub const DEFAULT_HIGH_RISK_MIN_INCIDENTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Year the monthly fraud trend is built for.
    pub target_year: Year,
    /// Fraud incidents a customer needs to be listed as high risk.
    pub high_risk_min_incidents: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            target_year: DEFAULT_TARGET_YEAR,
            high_risk_min_incidents: DEFAULT_HIGH_RISK_MIN_INCIDENTS,
        }
    }
}

impl AnalyticsConfig {
    /// Load from a JSON config file.
    /// In tests, use AnalyticsConfig::default() or for_year().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: AnalyticsConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn for_year(target_year: Year) -> Self {
        Self {
            target_year,
            ..Self::default()
        }
    }

    /// Month keys are rendered as four-digit years, so the target year
    /// must fit in 1..=9999.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(1..=9999).contains(&self.target_year) {
            return Err(AnalyticsError::InvalidConfig {
                details: format!(
                    "target_year must be between 1 and 9999, got {}",
                    self.target_year
                ),
            });
        }
        if self.high_risk_min_incidents == 0 {
            return Err(AnalyticsError::InvalidConfig {
                details: "high_risk_min_incidents must be at least 1".into(),
            });
        }
        Ok(())
    }
}
