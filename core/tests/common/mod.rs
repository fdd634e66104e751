//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use claimwatch_core::dataset::{Claim, Customer, Dataset, FraudDetection, Policy};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

// ── Record builders ──────────────────────────────────────────────────────────

pub fn customer(customer_id: i64) -> Customer {
    Customer {
        customer_id,
        name: format!("Customer {customer_id}"),
        age: Some(30 + (customer_id % 40) as u32),
    }
}

pub fn policy(policy_id: i64, customer_id: i64, policy_type: &str) -> Policy {
    Policy {
        policy_id,
        customer_id,
        policy_type: policy_type.into(),
    }
}

pub fn claim(claim_id: i64, policy_id: i64, claim_amount: f64) -> Claim {
    Claim {
        claim_id,
        policy_id,
        claim_amount,
        claim_date: "2024-01-01".into(),
    }
}

pub fn fraud(claim_id: i64, detected_by: Option<&str>, detection_date: &str) -> FraudDetection {
    FraudDetection {
        claim_id,
        is_fraudulent: true,
        detected_by: detected_by.map(str::to_string),
        detection_date: detection_date.into(),
    }
}

pub fn cleared(claim_id: i64, detection_date: &str) -> FraudDetection {
    FraudDetection {
        claim_id,
        is_fraudulent: false,
        detected_by: Some("RULE_ENGINE".into()),
        detection_date: detection_date.into(),
    }
}

// ── Datasets ─────────────────────────────────────────────────────────────────

/// Small hand-checked dataset.
///
/// Fraud records (all resolvable):
///   claim 101  customer 1  AUTO    ML_MODEL     1000.00  2024-01-15
///   claim 102  customer 1  AUTO    ML_MODEL     3000.00  2024-03-02
///   claim 103  customer 2  HOME    RULE_ENGINE   500.00  2024-03-20
///   claim 104  customer 3  HEALTH  <empty>      2500.50  2023-12-31
///   claim 105  customer 2  HOME    ML_MODEL     1200.00  2024-11-05
/// Plus one cleared detection (106) and one orphan detection (999).
pub fn sample_dataset() -> Dataset {
    Dataset {
        customers: vec![customer(1), customer(2), customer(3)],
        policies: vec![
            policy(10, 1, "AUTO"),
            policy(20, 2, "HOME"),
            policy(30, 3, "HEALTH"),
        ],
        claims: vec![
            claim(101, 10, 1000.0),
            claim(102, 10, 3000.0),
            claim(103, 20, 500.0),
            claim(104, 30, 2500.5),
            claim(105, 20, 1200.0),
            claim(106, 30, 80.0),
        ],
        fraud_detections: vec![
            fraud(101, Some("ML_MODEL"), "2024-01-15"),
            fraud(102, Some("ML_MODEL"), "2024-03-02"),
            fraud(103, Some("RULE_ENGINE"), "2024-03-20"),
            fraud(104, Some(""), "2023-12-31"),
            fraud(105, Some("ML_MODEL"), "2024-11-05 09:30:00"),
            cleared(106, "2024-02-01"),
            fraud(999, Some("ML_MODEL"), "2024-05-05"),
        ],
    }
}

const POLICY_TYPES: [&str; 4] = ["AUTO", "HOME", "HEALTH", "LIFE"];
const DETECTORS: [Option<&str>; 5] = [
    Some("ML_MODEL"),
    Some("RULE_ENGINE"),
    Some("MANUAL_REVIEW"),
    Some(""),
    None,
];

/// Deterministic random dataset for property checks.
/// Includes cleared detections and dangling claim / policy references.
pub fn random_dataset(seed: u64) -> Dataset {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);

    let n_customers = rng.gen_range(1..=30i64);
    let customers: Vec<Customer> = (1..=n_customers).map(customer).collect();

    let n_policies = rng.gen_range(1..=40i64);
    let policies: Vec<Policy> = (1..=n_policies)
        .map(|id| {
            let owner = rng.gen_range(1..=n_customers);
            let kind = POLICY_TYPES[rng.gen_range(0..POLICY_TYPES.len())];
            policy(id, owner, kind)
        })
        .collect();

    let n_claims = rng.gen_range(0..=120i64);
    let claims: Vec<Claim> = (1..=n_claims)
        .map(|id| {
            // ~5% of claims point at a policy that does not exist.
            let policy_id = if rng.gen_bool(0.05) {
                n_policies + 1000
            } else {
                rng.gen_range(1..=n_policies)
            };
            let cents = rng.gen_range(0..=1_000_000i64);
            claim(id, policy_id, cents as f64 / 100.0)
        })
        .collect();

    let mut fraud_detections = Vec::new();
    for id in 1..=n_claims {
        if !rng.gen_bool(0.7) {
            continue;
        }
        let year = if rng.gen_bool(0.8) { 2024 } else { 2023 };
        let month = rng.gen_range(1..=12u32);
        let day = rng.gen_range(1..=28u32);
        let date = format!("{year}-{month:02}-{day:02}");
        let detector = DETECTORS[rng.gen_range(0..DETECTORS.len())];
        let mut record = fraud(id, detector, &date);
        record.is_fraudulent = rng.gen_bool(0.6);
        fraud_detections.push(record);
    }
    // A few detections for claims that were never filed.
    for k in 0..rng.gen_range(0..3i64) {
        fraud_detections.push(fraud(n_claims + 500 + k, Some("ML_MODEL"), "2024-06-01"));
    }

    Dataset {
        customers,
        policies,
        claims,
        fraud_detections,
    }
}
