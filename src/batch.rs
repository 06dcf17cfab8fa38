use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::Settings;
use crate::engine;
use crate::error::EngineResult;
use crate::request::{MatchRecord, MatchRequest, PredictionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub parallelism: usize,
    pub strict: bool,
}

impl From<&Settings> for BatchOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            parallelism: settings.parallelism,
            strict: settings.strict,
        }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

pub fn analyze_one(record: &MatchRecord, strict: bool) -> EngineResult<PredictionResult> {
    let request = MatchRequest::from_record(record)?;
    if strict {
        request.check_history_lengths()?;
    }
    Ok(engine::run_full_analysis(&request))
}

/// One result per record, in input order.
pub fn analyze_batch(
    records: &[MatchRecord],
    opts: BatchOptions,
) -> Vec<EngineResult<PredictionResult>> {
    let results = with_pool(opts.parallelism, || {
        records
            .par_iter()
            .map(|record| analyze_one(record, opts.strict))
            .collect::<Vec<_>>()
    });

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        warn!(failed, total = records.len(), "some match records were rejected");
    }
    info!(
        total = records.len(),
        ok = records.len() - failed,
        "batch analysis finished"
    );
    results
}

fn with_pool<T>(threads: usize, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match rayon::ThreadPoolBuilder::new().num_threads(threads.max(1)).build() {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}
