//! Method aggregator, stage 2.
//!
//! Groups resolved fraud records by detection method and computes each
//! method's count, share of all fraud (catch rate, percent) and mean claim
//! amount. Groups come out in first-appearance order.
//!
//! All arithmetic is decimal; rates and averages round half away from zero
//! to 2 places.

use crate::claim_joiner::ResolvedFraudRecord;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodStats {
    pub detection_method: String,
    pub total_frauds_detected: u64,
    /// Percent of all fraud records, 2 decimal places.
    pub fraud_catch_rate: Decimal,
    /// Mean claim amount of this method's records, 2 decimal places.
    pub avg_fraud_amount: Decimal,
}

pub fn aggregate_by_method(records: &[ResolvedFraudRecord]) -> Vec<MethodStats> {
    // (method, count, amount sum), indexed by method for lookup.
    let mut groups: Vec<(&str, u64, Decimal)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let method = record.detection_method.as_str();
        let slot = *index.entry(method).or_insert_with(|| {
            groups.push((method, 0, Decimal::ZERO));
            groups.len() - 1
        });
        groups[slot].1 += 1;
        groups[slot].2 += record.claim_amount;
    }

    let total = records.len() as u64;
    let stats: Vec<MethodStats> = groups
        .into_iter()
        .map(|(method, count, amount_sum)| MethodStats {
            detection_method: method.to_string(),
            total_frauds_detected: count,
            fraud_catch_rate: catch_rate(count, total),
            avg_fraud_amount: round2(amount_sum / Decimal::from(count)),
        })
        .collect();

    for s in &stats {
        log::debug!(
            "methods: {} detected {} ({:.2}%) avg ${:.2}",
            s.detection_method,
            s.total_frauds_detected,
            s.fraud_catch_rate,
            s.avg_fraud_amount,
        );
    }

    stats
}

/// Share of `total` in percent, 2 decimal places. Zero when there is no fraud.
pub fn catch_rate(count: u64, total: u64) -> Decimal {
    if total == 0 {
        Decimal::ZERO
    } else {
        round2(Decimal::ONE_HUNDRED * Decimal::from(count) / Decimal::from(total))
    }
}

/// Round half away from zero to 2 decimal places.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
