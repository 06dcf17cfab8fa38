use serde::Serialize;
use tracing::debug;

use crate::league_params::{self, DEFAULT_BASELINE, EventType};
use crate::request::{HISTORY_LEN, MatchRequest, PredictionResult};

// Index 0 (most recent match) carries the largest weight.
const RECENCY_WEIGHTS: [f64; HISTORY_LEN] = [5.0, 4.0, 3.0, 2.0, 1.0];
const SAFETY_STDDEV_PENALTY: f64 = 0.5;
const MIN_LAMBDA: f64 = 0.01;

// Any length other than five (including empty) yields 0, never an error.
pub fn weighted_mean(series: &[f64]) -> f64 {
    if series.len() != HISTORY_LEN {
        return 0.0;
    }
    let weighted: f64 = series
        .iter()
        .zip(RECENCY_WEIGHTS.iter())
        .map(|(v, w)| v * w)
        .sum();
    let weight_sum: f64 = RECENCY_WEIGHTS.iter().sum();
    weighted / weight_sum
}

/// Weighted mean minus half the sample standard deviation, never below zero.
///
/// The dispersion is taken over the raw values (Bessel-corrected) while the centre is the
/// recency-weighted mean. A series with at least two values but not exactly five therefore
/// has a 0 centre and clamps to 0.
pub fn safety_line(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let mean_w = weighted_mean(series);
    let line = mean_w - SAFETY_STDDEV_PENALTY * sample_std_dev(series);
    line.max(0.0)
}

fn sample_std_dev(series: &[f64]) -> f64 {
    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let ss: f64 = series.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (n - 1.0)).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventEstimate {
    pub mean_fav: f64,
    pub mean_dog: f64,
    pub league_avg: f64,
    pub away_factor: f64,
    pub lambda: f64,
}

fn estimate(
    fav_history: &[f64],
    dog_history: &[f64],
    league_avg: f64,
    away_factor: f64,
) -> EventEstimate {
    let mean_fav = weighted_mean(fav_history);
    let mean_dog = weighted_mean(dog_history);

    // Product of the two rates over the league rate: amplifies when both sides
    // exceed the league norm.
    let expectation = (mean_fav * mean_dog) / league_avg * away_factor;

    EventEstimate {
        mean_fav,
        mean_dog,
        league_avg,
        away_factor,
        lambda: expectation.max(MIN_LAMBDA),
    }
}

pub fn estimate_event(
    fav_history: &[f64],
    dog_history: &[f64],
    league: &str,
    event: EventType,
    is_away: bool,
) -> EventEstimate {
    let league_avg = league_params::league_average(league, event);
    let away_factor = if is_away {
        league_params::away_multiplier(event)
    } else {
        1.0
    };
    let out = estimate(fav_history, dog_history, league_avg, away_factor);
    debug!(
        league,
        event = %event,
        is_away,
        mean_fav = out.mean_fav,
        mean_dog = out.mean_dog,
        league_avg = out.league_avg,
        lambda = out.lambda,
        "lambda estimated"
    );
    out
}

pub fn calculate_lambda(
    fav_history: &[f64],
    dog_history: &[f64],
    league: &str,
    event: EventType,
    is_away: bool,
) -> f64 {
    estimate_event(fav_history, dog_history, league, event, is_away).lambda
}

// Unknown keys get a 1.0 league baseline and no away adjustment.
pub fn calculate_lambda_by_key(
    fav_history: &[f64],
    dog_history: &[f64],
    league: &str,
    event_key: &str,
    is_away: bool,
) -> f64 {
    match EventType::from_key(event_key) {
        Some(event) => calculate_lambda(fav_history, dog_history, league, event, is_away),
        None => estimate(fav_history, dog_history, DEFAULT_BASELINE, DEFAULT_BASELINE).lambda,
    }
}

pub fn poisson_probability(lambda: f64, k: u32) -> f64 {
    let mut p = (-lambda).exp();
    for i in 1..=k {
        if p == 0.0 {
            break;
        }
        p *= lambda / i as f64;
    }
    p
}

// Upper bound on explicit PMF buckets.
const PMF_K_LIMIT: u32 = 100;

/// Buckets k = 0..max_k, then a final "max_k or more" bucket holding the remaining mass.
/// `max_k` is capped at 100.
pub fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k.min(PMF_K_LIMIT);
    let lambda = lambda.max(0.0);

    let mut out: Vec<f64> = (0..max_k).map(|k| poisson_probability(lambda, k)).collect();
    let head: f64 = out.iter().sum();
    out.push((1.0 - head).max(0.0));
    out
}

// Two decimals, ties to even on the exact binary value: 0.125 -> 0.12, 2.675 -> 2.67.
fn round2(v: f64) -> f64 {
    let scaled = v * 100.0;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round() / 100.0;
    }
    format!("{v:.2}")
        .parse::<f64>()
        .unwrap_or_else(|_| scaled.round_ties_even() / 100.0)
}

pub fn run_full_analysis(request: &MatchRequest) -> PredictionResult {
    let predict = |event: EventType| {
        let (fav, dog) = request.series(event);
        round2(calculate_lambda(
            fav,
            dog,
            &request.league,
            event,
            request.is_away,
        ))
    };

    PredictionResult {
        goals: predict(EventType::Goals),
        shots_h1: predict(EventType::ShotsH1),
        corners_h1: predict(EventType::CornersH1),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub weighted_mean: f64,
    pub safety_line: f64,
}

pub fn summarize_series(series: &[f64]) -> SeriesSummary {
    SeriesSummary {
        weighted_mean: weighted_mean(series),
        safety_line: safety_line(series),
    }
}
