//! Fraud analytics over an insurance dataset.
//!
//! Load a [`dataset::Dataset`] (CSV directory or SQLite), hand it to
//! [`engine::FraudAnalyticsEngine::run`], get a [`report_assembler::FraudReport`].

pub mod claim_joiner;
pub mod config;
pub mod customer_risk_finder;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod method_aggregator;
pub mod monthly_trend_builder;
pub mod policy_risk_ranker;
pub mod report_assembler;
pub mod store;
pub mod types;
