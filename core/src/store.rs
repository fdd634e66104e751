//! SQLite dataset reader.
//!
//! RULE: Only store.rs talks to the database.
//! The engine never sees a connection; it gets a Dataset.
//! Foreign keys are left unenforced so orphaned rows load as-is.
//! Text columns are trimmed and empty optional text reads as NULL, the same
//! way the CSV loader treats its cells.

use crate::{
    dataset::{parse_flag, Claim, Customer, Dataset, FraudDetection, Policy},
    error::AnalyticsResult,
};
use rusqlite::{params, types::ValueRef, Connection};

pub struct DatasetStore {
    conn: Connection,
}

impl DatasetStore {
    /// Open an existing database at `path`.
    pub fn open(path: &str) -> AnalyticsResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys=OFF;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> AnalyticsResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=OFF;")?;
        Ok(Self { conn })
    }

    /// Create the four sample tables if they are missing.
    pub fn migrate(&self) -> AnalyticsResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_insurance.sql"))?;
        Ok(())
    }

    // ── Fixture seeding ────────────────────────────────────────

    pub fn insert_customer(&self, c: &Customer) -> AnalyticsResult<()> {
        insert_customer(&self.conn, c)
    }

    pub fn insert_policy(&self, p: &Policy) -> AnalyticsResult<()> {
        insert_policy(&self.conn, p)
    }

    pub fn insert_claim(&self, c: &Claim) -> AnalyticsResult<()> {
        insert_claim(&self.conn, c)
    }

    pub fn insert_fraud_detection(&self, f: &FraudDetection) -> AnalyticsResult<()> {
        insert_fraud_detection(&self.conn, f)
    }

    /// Seed every table from `dataset` inside one transaction.
    pub fn insert_dataset(&mut self, dataset: &Dataset) -> AnalyticsResult<()> {
        let tx = self.conn.transaction()?;
        for c in &dataset.customers {
            insert_customer(&tx, c)?;
        }
        for p in &dataset.policies {
            insert_policy(&tx, p)?;
        }
        for c in &dataset.claims {
            insert_claim(&tx, c)?;
        }
        for f in &dataset.fraud_detections {
            insert_fraud_detection(&tx, f)?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Loading ────────────────────────────────────────────────

    /// Read all four tables, each in primary-key order.
    pub fn load_dataset(&self) -> AnalyticsResult<Dataset> {
        let dataset = Dataset {
            customers: self.customers()?,
            policies: self.policies()?,
            claims: self.claims()?,
            fraud_detections: self.fraud_detections()?,
        };
        log::info!(
            "store: loaded {} customers, {} policies, {} claims, {} fraud detections",
            dataset.customers.len(),
            dataset.policies.len(),
            dataset.claims.len(),
            dataset.fraud_detections.len(),
        );
        Ok(dataset)
    }

    fn customers(&self) -> AnalyticsResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare("SELECT customer_id, name, age FROM customers ORDER BY customer_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Customer {
                customer_id: row.get(0)?,
                name: trimmed(row.get(1)?),
                age: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn policies(&self) -> AnalyticsResult<Vec<Policy>> {
        let mut stmt = self.conn.prepare(
            "SELECT policy_id, customer_id, policy_type FROM policies ORDER BY policy_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Policy {
                policy_id: row.get(0)?,
                customer_id: row.get(1)?,
                policy_type: trimmed(row.get(2)?),
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn claims(&self) -> AnalyticsResult<Vec<Claim>> {
        let mut stmt = self.conn.prepare(
            "SELECT claim_id, policy_id, claim_amount, claim_date FROM claims ORDER BY claim_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Claim {
                claim_id: row.get(0)?,
                policy_id: row.get(1)?,
                claim_amount: row.get(2)?,
                claim_date: trimmed(row.get(3)?),
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn fraud_detections(&self) -> AnalyticsResult<Vec<FraudDetection>> {
        let mut stmt = self.conn.prepare(
            "SELECT claim_id, is_fraudulent, detected_by, detection_date
             FROM fraud_detection ORDER BY claim_id",
        )?;
        let rows = stmt.query_map([], |row| {
            // NULL or unrecognised flags compare false, as `= TRUE` would.
            let is_fraudulent = match row.get_ref(1)? {
                ValueRef::Integer(i) => i != 0,
                ValueRef::Real(r) => r != 0.0,
                ValueRef::Text(t) => std::str::from_utf8(t)
                    .ok()
                    .and_then(parse_flag)
                    .unwrap_or(false),
                ValueRef::Null | ValueRef::Blob(_) => false,
            };
            Ok(FraudDetection {
                claim_id: row.get(0)?,
                is_fraudulent,
                detected_by: row
                    .get::<_, Option<String>>(2)?
                    .map(trimmed)
                    .filter(|s| !s.is_empty()),
                detection_date: trimmed(row.get(3)?),
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn trimmed(text: String) -> String {
    text.trim().to_string()
}

fn insert_customer(conn: &Connection, c: &Customer) -> AnalyticsResult<()> {
    conn.execute(
        "INSERT INTO customers (customer_id, name, age) VALUES (?1, ?2, ?3)",
        params![c.customer_id, c.name, c.age],
    )?;
    Ok(())
}

fn insert_policy(conn: &Connection, p: &Policy) -> AnalyticsResult<()> {
    conn.execute(
        "INSERT INTO policies (policy_id, customer_id, policy_type) VALUES (?1, ?2, ?3)",
        params![p.policy_id, p.customer_id, p.policy_type],
    )?;
    Ok(())
}

fn insert_claim(conn: &Connection, c: &Claim) -> AnalyticsResult<()> {
    conn.execute(
        "INSERT INTO claims (claim_id, policy_id, claim_amount, claim_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![c.claim_id, c.policy_id, c.claim_amount, c.claim_date],
    )?;
    Ok(())
}

fn insert_fraud_detection(conn: &Connection, f: &FraudDetection) -> AnalyticsResult<()> {
    conn.execute(
        "INSERT INTO fraud_detection (claim_id, is_fraudulent, detected_by, detection_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            f.claim_id,
            if f.is_fraudulent { 1 } else { 0 },
            f.detected_by,
            f.detection_date
        ],
    )?;
    Ok(())
}
