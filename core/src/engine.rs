//! The fraud analytics engine: runs the report pipeline.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Claim joiner           resolve fraud → claim → policy
//!   2. Method aggregator      counts, catch rates, average amounts
//!   3. Policy-risk ranker     most fraud-prone policy type
//!   4. Customer-risk finder   repeat-fraud customers
//!   5. Monthly trend builder  gap-filled 12-month series
//!   6. Report assembler       top method rows + global facets
//!
//! RULES:
//!   - Stages 2–5 read ONLY the joiner's resolved records.
//!   - No stage mutates its input; each returns a fresh value.
//!   - A run either returns a whole report or an error, never a partial one.

use crate::{
    claim_joiner::resolve_fraud_records,
    config::AnalyticsConfig,
    customer_risk_finder::high_risk_customers,
    dataset::Dataset,
    error::AnalyticsResult,
    method_aggregator::aggregate_by_method,
    monthly_trend_builder::build_monthly_trend,
    policy_risk_ranker::most_fraud_prone_policy_type,
    report_assembler::{assemble_report, FraudReport, ReportFacets},
};

#[derive(Debug, Clone)]
pub struct FraudAnalyticsEngine {
    config: AnalyticsConfig,
}

impl FraudAnalyticsEngine {
    /// Validate `config` and build an engine around it.
    pub fn new(config: AnalyticsConfig) -> AnalyticsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Compute the fraud report for one immutable dataset snapshot.
    pub fn run(&self, dataset: &Dataset) -> AnalyticsResult<FraudReport> {
        if dataset.is_empty() {
            log::warn!("engine: dataset is empty, report will have no rows");
        }

        // 1. Join
        let (records, join_stats) = resolve_fraud_records(dataset)?;

        // 2–5. Facets over the resolved set
        let method_stats = aggregate_by_method(&records);
        let facets = ReportFacets {
            most_fraud_prone_policy_type: most_fraud_prone_policy_type(&records),
            high_risk_customers: high_risk_customers(
                &records,
                self.config.high_risk_min_incidents,
            ),
            monthly_trend: build_monthly_trend(&records, self.config.target_year),
        };

        // 6. Assemble
        let report = assemble_report(&method_stats, facets, join_stats);

        log::info!(
            "engine: {} fraud records, {} methods, {} report rows for {}",
            report.total_fraud_count,
            method_stats.len(),
            report.rows.len(),
            report.target_year,
        );
        Ok(report)
    }
}
