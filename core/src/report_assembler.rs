//! Report assembler, stage 6.
//!
//! Picks the detection method(s) with the highest catch rate and stamps the
//! global facets (policy type, high-risk customers, monthly trend) onto
//! each of their rows.
//!
//! Every method tied at the top rate gets its own row. Rows are ordered by
//! catch rate desc, then frauds detected desc, then method name asc.

use crate::{
    claim_joiner::JoinStats,
    customer_risk_finder::render_customer_list,
    method_aggregator::MethodStats,
    monthly_trend_builder::MonthlyTrend,
    types::{CustomerId, Year},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub detection_method: String,
    pub total_frauds_detected: u64,
    pub fraud_catch_rate: Decimal,
    pub most_fraud_prone_policy_type: String,
    pub avg_fraud_amount: Decimal,
    pub high_risk_customers: String,
    pub monthly_fraud_trend: String,
}

/// Global facets shared by every row of one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFacets {
    pub most_fraud_prone_policy_type: Option<String>,
    pub high_risk_customers: Vec<CustomerId>,
    pub monthly_trend: MonthlyTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudReport {
    pub target_year: Year,
    pub total_fraud_count: u64,
    pub most_fraud_prone_policy_type: Option<String>,
    pub high_risk_customers: String,
    pub monthly_fraud_trend: String,
    pub join_stats: JoinStats,
    /// Empty when there is no fraud at all.
    pub rows: Vec<ReportRow>,
}

// ── Assembly ─────────────────────────────────────────────────────────────────

/// Methods sharing the maximum catch rate, in report order.
pub fn select_top_methods(stats: &[MethodStats]) -> Vec<&MethodStats> {
    let Some(max_rate) = stats.iter().map(|s| s.fraud_catch_rate).max() else {
        return Vec::new();
    };

    let mut top: Vec<&MethodStats> = stats
        .iter()
        .filter(|s| s.fraud_catch_rate == max_rate)
        .collect();
    top.sort_by(|a, b| {
        b.fraud_catch_rate
            .cmp(&a.fraud_catch_rate)
            .then_with(|| b.total_frauds_detected.cmp(&a.total_frauds_detected))
            .then_with(|| a.detection_method.cmp(&b.detection_method))
    });
    top
}

pub fn assemble_report(
    method_stats: &[MethodStats],
    facets: ReportFacets,
    join_stats: JoinStats,
) -> FraudReport {
    let policy_type = facets
        .most_fraud_prone_policy_type
        .clone()
        .unwrap_or_default();
    let high_risk_customers = render_customer_list(&facets.high_risk_customers);
    let monthly_fraud_trend = facets.monthly_trend.to_string();

    let rows: Vec<ReportRow> = select_top_methods(method_stats)
        .into_iter()
        .map(|s| ReportRow {
            detection_method: s.detection_method.clone(),
            total_frauds_detected: s.total_frauds_detected,
            fraud_catch_rate: s.fraud_catch_rate,
            most_fraud_prone_policy_type: policy_type.clone(),
            avg_fraud_amount: s.avg_fraud_amount,
            high_risk_customers: high_risk_customers.clone(),
            monthly_fraud_trend: monthly_fraud_trend.clone(),
        })
        .collect();

    if rows.len() > 1 {
        log::info!(
            "report: {} detection methods tie at {:.2}%",
            rows.len(),
            rows[0].fraud_catch_rate
        );
    }

    FraudReport {
        target_year: facets.monthly_trend.year,
        total_fraud_count: method_stats.iter().map(|s| s.total_frauds_detected).sum(),
        most_fraud_prone_policy_type: facets.most_fraud_prone_policy_type,
        high_risk_customers,
        monthly_fraud_trend,
        join_stats,
        rows,
    }
}

// ── Rendering ────────────────────────────────────────────────────────────────

/// Fixed-width text table, decimals printed with two fraction digits.
impl fmt::Display for FraudReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== FRAUD DETECTION REPORT ({}) ===", self.target_year)?;
        writeln!(f, "  fraud records:       {}", self.total_fraud_count)?;
        writeln!(
            f,
            "  most prone policy:   {}",
            self.most_fraud_prone_policy_type.as_deref().unwrap_or("-")
        )?;
        writeln!(
            f,
            "  high-risk customers: {}",
            if self.high_risk_customers.is_empty() {
                "-"
            } else {
                self.high_risk_customers.as_str()
            }
        )?;
        if self.join_stats.dropped() > 0 {
            writeln!(f, "  dropped (orphaned):  {}", self.join_stats.dropped())?;
        }
        writeln!(f)?;

        if self.rows.is_empty() {
            writeln!(f, "  (No fraudulent claims found)")?;
        } else {
            writeln!(
                f,
                "  {:<24} {:>8} {:>9} {:>12}",
                "detection_method", "frauds", "rate %", "avg amount"
            )?;
            for row in &self.rows {
                writeln!(
                    f,
                    "  {:<24} {:>8} {:>9.2} {:>12.2}",
                    row.detection_method,
                    row.total_frauds_detected,
                    row.fraud_catch_rate,
                    row.avg_fraud_amount
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "  monthly trend:")?;
        for entry in self.monthly_fraud_trend.split(';') {
            writeln!(f, "    {entry}")?;
        }
        Ok(())
    }
}
