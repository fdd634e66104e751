//! Shared primitive types used across the analytics pipeline.

/// Primary key of a customer row.
pub type CustomerId = i64;

/// Primary key of a policy row.
pub type PolicyId = i64;

/// Primary key of a claim row. Fraud-detection rows reference it.
pub type ClaimId = i64;

/// A calendar year, e.g. the target year of the monthly trend.
pub type Year = i32;

/// Detection method assigned when a fraud record names no detector.
pub const AUTOMATED_SYSTEM: &str = "AUTOMATED_SYSTEM";
