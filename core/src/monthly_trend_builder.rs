//! Monthly trend builder, stage 5.
//!
//! Produces a gap-filled series of fraud counts for the twelve months of the
//! target year. The skeleton always has all twelve months; months without
//! fraud carry a zero. Records outside the target year are ignored.

use crate::{claim_joiner::ResolvedFraudRecord, types::Year};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTHS_PER_YEAR: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    /// "YYYY-MM".
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub year: Year,
    /// Exactly twelve entries, January first.
    pub months: Vec<MonthCount>,
}

impl MonthlyTrend {
    pub fn total(&self) -> u64 {
        self.months.iter().map(|m| m.count).sum()
    }
}

/// Renders as "YYYY-01:n;YYYY-02:n;...;YYYY-12:n".
impl fmt::Display for MonthlyTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.months.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", m.month, m.count)?;
        }
        Ok(())
    }
}

/// The twelve month keys of `year` in chronological order.
pub fn month_keys(year: Year) -> Vec<String> {
    (1..=MONTHS_PER_YEAR)
        .map(|month| format!("{year:04}-{month:02}"))
        .collect()
}

pub fn build_monthly_trend(records: &[ResolvedFraudRecord], year: Year) -> MonthlyTrend {
    let mut counts = [0u64; MONTHS_PER_YEAR];
    for record in records {
        let date = record.detection_date;
        if date.year() == year {
            counts[date.month0() as usize] += 1;
        }
    }

    let months: Vec<MonthCount> = month_keys(year)
        .into_iter()
        .zip(counts)
        .map(|(month, count)| MonthCount { month, count })
        .collect();

    let trend = MonthlyTrend { year, months };
    log::debug!(
        "trend: {} of {} fraud records fall in {year}",
        trend.total(),
        records.len()
    );
    trend
}
