use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::error;

use bet_smart::batch::{self, BatchOptions};
use bet_smart::config::{self, Settings};
use bet_smart::request::parse_match_records_json;

fn main() -> Result<()> {
    let settings = Settings::load();
    config::init_logging(&settings);

    let raw = read_input(std::env::args().nth(1))?;
    let mut records = parse_match_records_json(&raw).context("failed to parse match records")?;

    let results = batch::analyze_batch(&records, BatchOptions::from(&settings));
    let now = Utc::now();
    let mut failed = 0usize;
    for (record, result) in records.iter_mut().zip(results) {
        match result {
            Ok(prediction) => record.apply_prediction(&prediction, now),
            Err(err) => {
                failed += 1;
                error!(record = %record.label(), "{err}");
            }
        }
    }

    let analyzed: Vec<_> = records
        .into_iter()
        .filter(|r| r.created_at.is_some())
        .collect();
    let json = serde_json::to_string_pretty(&analyzed).context("serialize predictions")?;
    println!("{json}");

    if failed > 0 {
        bail!("{failed} match record(s) could not be analyzed");
    }
    Ok(())
}

fn read_input(arg: Option<String>) -> Result<String> {
    match arg.as_deref() {
        None | Some("-") => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed reading stdin")?;
            Ok(raw)
        }
        Some(path) => {
            let path = PathBuf::from(path);
            fs::read_to_string(&path).with_context(|| format!("failed reading {}", path.display()))
        }
    }
}
