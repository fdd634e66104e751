//! Customer-risk finder, stage 4.
//!
//! A customer is high risk once they reach the configured number of fraud
//! incidents (2 by default).

use crate::{claim_joiner::ResolvedFraudRecord, types::CustomerId};
use std::collections::BTreeMap;

/// Qualifying customer ids, ascending.
pub fn high_risk_customers(
    records: &[ResolvedFraudRecord],
    min_incidents: usize,
) -> Vec<CustomerId> {
    let mut counts: BTreeMap<CustomerId, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.customer_id).or_insert(0) += 1;
    }

    let flagged: Vec<CustomerId> = counts
        .into_iter()
        .filter(|&(_, count)| count >= min_incidents)
        .map(|(customer_id, _)| customer_id)
        .collect();

    log::debug!(
        "customer_risk: {} customers with >= {min_incidents} fraud incidents",
        flagged.len()
    );
    flagged
}

/// Comma-joined ids, empty string for none.
pub fn render_customer_list(customers: &[CustomerId]) -> String {
    customers
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
