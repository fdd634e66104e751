//! Claim joiner, stage 1 of the fraud report.
//!
//! Resolves every fraudulent detection record through
//! FraudDetection → Claim → Policy and yields one ResolvedFraudRecord each.
//!
//! Join semantics are INNER: a detection whose claim is missing, or a claim
//! whose policy is missing, is dropped without an error. The drop counts are
//! reported in JoinStats and logged, never raised.
//!
//! The detected_by → detection_method normalisation happens here and only
//! here. Every later stage may assume a non-empty method.
//!
//! Claim amounts leave this stage as exact decimals; the f64 read from the
//! loaders is taken at its shortest round-trip value (1.01 stays 1.01).

use crate::{
    dataset::{Claim, Dataset, Policy},
    error::{AnalyticsError, AnalyticsResult},
    types::{ClaimId, CustomerId, PolicyId, AUTOMATED_SYSTEM},
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFraudRecord {
    pub claim_id: ClaimId,
    pub policy_type: String,
    pub customer_id: CustomerId,
    pub claim_amount: Decimal,
    pub detection_date: NaiveDate,
    pub detection_method: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStats {
    /// Detection records looked at.
    pub examined: usize,
    pub non_fraudulent: usize,
    /// Fraudulent detections whose claim_id matched no claim.
    pub missing_claim: usize,
    /// Fraudulent detections whose claim matched no policy.
    pub missing_policy: usize,
    pub resolved: usize,
}

impl JoinStats {
    pub fn dropped(&self) -> usize {
        self.missing_claim + self.missing_policy
    }
}

// ── Stage ────────────────────────────────────────────────────────────────────

/// Resolve the fraudulent detections of `dataset`, preserving their order.
pub fn resolve_fraud_records(
    dataset: &Dataset,
) -> AnalyticsResult<(Vec<ResolvedFraudRecord>, JoinStats)> {
    let claims: HashMap<ClaimId, &Claim> =
        dataset.claims.iter().map(|c| (c.claim_id, c)).collect();
    let policies: HashMap<PolicyId, &Policy> =
        dataset.policies.iter().map(|p| (p.policy_id, p)).collect();

    let mut stats = JoinStats::default();
    let mut resolved = Vec::new();

    for detection in &dataset.fraud_detections {
        stats.examined += 1;

        if !detection.is_fraudulent {
            stats.non_fraudulent += 1;
            continue;
        }

        let Some(claim) = claims.get(&detection.claim_id) else {
            stats.missing_claim += 1;
            continue;
        };
        let Some(policy) = policies.get(&claim.policy_id) else {
            stats.missing_policy += 1;
            continue;
        };

        let detection_date = parse_detection_date(&detection.detection_date).ok_or_else(|| {
            AnalyticsError::MalformedDate {
                claim_id: detection.claim_id,
                value: detection.detection_date.clone(),
            }
        })?;
        let claim_amount = exact_amount(claim.claim_amount).ok_or(AnalyticsError::InvalidAmount {
            claim_id: claim.claim_id,
            value: claim.claim_amount,
        })?;

        resolved.push(ResolvedFraudRecord {
            claim_id: claim.claim_id,
            policy_type: policy.policy_type.clone(),
            customer_id: policy.customer_id,
            claim_amount,
            detection_date,
            detection_method: normalize_detection_method(detection.detected_by.as_deref()),
        });
    }

    stats.resolved = resolved.len();

    if stats.dropped() > 0 {
        log::warn!(
            "join: dropped {} fraudulent detections with dangling references \
             ({} missing claim, {} missing policy)",
            stats.dropped(),
            stats.missing_claim,
            stats.missing_policy,
        );
    }
    log::debug!(
        "join: examined={} non_fraudulent={} resolved={}",
        stats.examined,
        stats.non_fraudulent,
        stats.resolved,
    );

    Ok((resolved, stats))
}

/// NULL and empty detectors are attributed to the automated system.
pub fn normalize_detection_method(detected_by: Option<&str>) -> String {
    match detected_by {
        Some(method) if !method.is_empty() => method.to_string(),
        _ => AUTOMATED_SYSTEM.to_string(),
    }
}

/// The decimal an f64 amount was written as. None for NaN and infinities.
pub fn exact_amount(amount: f64) -> Option<Decimal> {
    // f64 Display prints the shortest string that reads back to the same bits.
    amount.to_string().parse().ok()
}

/// Parse a date or timestamp, keeping only the calendar date.
pub fn parse_detection_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| ts.date())
}
