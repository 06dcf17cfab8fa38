use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use bet_smart::config::{self, Settings};
use bet_smart::engine;
use bet_smart::league_params::{self, EventType};
use bet_smart::request::MatchRequest;

const PMF_MAX_K: u32 = 6;

fn main() -> Result<()> {
    let settings = Settings::load();
    config::init_logging(&settings);

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/brasileirao_home.json"));

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    let request = MatchRequest::from_json(&raw).context("invalid match record")?;

    // Quick look at one record: no persistence, no network.
    if league_params::league_profile(&request.league).is_none() {
        println!("League {:?} not in table, using 1.0 baselines", request.league);
    }

    println!("{:<40} {:>8} {:>8}", "series", "w_mean", "safety");
    for (name, series) in request.named_series() {
        let s = engine::summarize_series(series);
        println!("{:<40} {:>8.2} {:>8.2}", name, s.weighted_mean, s.safety_line);
    }

    println!();
    for event in EventType::ALL {
        let (fav, dog) = request.series(event);
        let est = engine::estimate_event(fav, dog, &request.league, event, request.is_away);
        println!(
            "{:<11} fav {:.2} x dog {:.2} / league {:.2} x away {:.2} = lambda {:.2}",
            event.key(),
            est.mean_fav,
            est.mean_dog,
            est.league_avg,
            est.away_factor,
            est.lambda
        );
        let pmf = engine::poisson_pmf(est.lambda, PMF_MAX_K);
        let cells: Vec<String> = pmf
            .iter()
            .enumerate()
            .map(|(k, p)| {
                let plus = if k as u32 == PMF_MAX_K { "+" } else { "" };
                format!("{k}{plus}:{:.1}%", p * 100.0)
            })
            .collect();
        println!("            P(k) {}", cells.join(" "));
    }

    Ok(())
}
