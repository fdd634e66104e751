//! Policy-risk ranker, stage 3.
//!
//! Counts fraud incidents per policy type and picks the most fraud-prone
//! one. Equal counts resolve to the lexically smallest policy type, so the
//! answer never depends on input order.

use crate::claim_joiner::ResolvedFraudRecord;
use std::collections::BTreeMap;

/// Fraud incident count per policy type, keyed in lexical order.
pub fn incidents_by_policy_type(records: &[ResolvedFraudRecord]) -> BTreeMap<&str, u64> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(record.policy_type.as_str()).or_insert(0) += 1;
    }
    counts
}

/// None when there are no fraud records.
pub fn most_fraud_prone_policy_type(records: &[ResolvedFraudRecord]) -> Option<String> {
    let counts = incidents_by_policy_type(records);

    // BTreeMap iterates ascending; keep the first key that reaches the max.
    let mut best: Option<(&str, u64)> = None;
    for (policy_type, count) in counts {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((policy_type, count)),
        }
    }

    if let Some((policy_type, count)) = best {
        log::debug!("policy_risk: {policy_type} leads with {count} incidents");
    }
    best.map(|(policy_type, _)| policy_type.to_string())
}
