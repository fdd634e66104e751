//! report-runner: headless fraud report runner.
//!
//! Usage:
//!   report-runner --csv-dir ./data
//!   report-runner --db insurance.db --year 2023 --json
//!   report-runner --csv-dir ./data --config analytics.json

use anyhow::{bail, Context, Result};
use claimwatch_core::{
    config::AnalyticsConfig, dataset::Dataset, engine::FraudAnalyticsEngine,
    report_assembler::FraudReport, store::DatasetStore, types::Year,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let csv_dir = flag_value(&args, "--csv-dir")?;
    let db = flag_value(&args, "--db")?;
    let config_path = flag_value(&args, "--config")?;
    let json = args.iter().any(|a| a == "--json");

    let mut config = match config_path {
        Some(path) => AnalyticsConfig::load(path)?,
        None => AnalyticsConfig::default(),
    };
    if let Some(year) = parse_flag::<Year>(&args, "--year")? {
        config.target_year = year;
    }

    let dataset = match (csv_dir, db) {
        (Some(dir), None) => Dataset::load_csv_dir(dir)
            .with_context(|| format!("loading CSV tables from {dir}"))?,
        (None, Some(path)) => DatasetStore::open(path)
            .and_then(|store| store.load_dataset())
            .with_context(|| format!("loading tables from {path}"))?,
        (Some(_), Some(_)) => bail!("pass either --csv-dir or --db, not both"),
        (None, None) => bail!("usage: report-runner (--csv-dir DIR | --db PATH) [--year N] [--config FILE] [--json]"),
    };

    let engine = FraudAnalyticsEngine::new(config)?;
    let report = engine.run(&dataset)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &FraudReport) {
    print!("{report}");
    let stats = &report.join_stats;
    log::debug!(
        "join: examined={} non_fraudulent={} missing_claim={} missing_policy={}",
        stats.examined,
        stats.non_fraudulent,
        stats.missing_claim,
        stats.missing_policy,
    );
}

/// The argument following `flag`. A flag with nothing after it is an error.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => bail!("{flag} expects a value"),
    }
}

fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag_value(args, flag)?
        .map(|raw| {
            raw.parse()
                .with_context(|| format!("invalid value {raw:?} for {flag}"))
        })
        .transpose()
}
