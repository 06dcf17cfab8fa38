use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use bet_smart::batch::{BatchOptions, analyze_batch};
use bet_smart::engine::{poisson_pmf, run_full_analysis, safety_line};
use bet_smart::request::{MatchRecord, MatchRequest};

fn sample_record(seed: usize) -> MatchRecord {
    let s = (seed % 4) as f64;
    MatchRecord {
        home_team: format!("Home {seed}"),
        away_team: format!("Away {seed}"),
        favorite_team: format!("Home {seed}"),
        league: Some("Bundesliga".to_string()),
        is_away: Some(seed % 2 == 0),
        fav_goals_history: Some(vec![2.0 + s, 1.0, 3.0, 0.0, 1.0]),
        fav_shots_h1_history: Some(vec![6.0, 5.0 + s, 7.0, 4.0, 5.0]),
        fav_corners_h1_history: Some(vec![3.0, 2.0, 4.0 + s, 3.0, 2.0]),
        underdog_goals_conceded_history: Some(vec![1.0, 2.0, 1.0, 1.0 + s, 0.0]),
        underdog_shots_conceded_h1_history: Some(vec![5.0, 4.0, 6.0, 5.0, 4.0 + s]),
        underdog_corners_conceded_h1_history: Some(vec![2.0, 3.0, 2.0, 3.0, 2.0]),
        ..MatchRecord::default()
    }
}

fn bench_full_analysis(c: &mut Criterion) {
    let request = MatchRequest::from_record(&sample_record(1)).expect("valid sample");
    c.bench_function("full_analysis", |b| {
        b.iter(|| {
            let p = run_full_analysis(black_box(&request));
            black_box(p.goals);
        })
    });
}

fn bench_safety_line(c: &mut Criterion) {
    let series = [4.0, 1.0, 6.0, 2.0, 3.0];
    c.bench_function("safety_line", |b| {
        b.iter(|| black_box(safety_line(black_box(&series))))
    });
}

fn bench_poisson_pmf(c: &mut Criterion) {
    c.bench_function("poisson_pmf_10", |b| {
        b.iter(|| black_box(poisson_pmf(black_box(2.7), 10)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let records: Vec<MatchRecord> = (0..1_000).map(sample_record).collect();
    let opts = BatchOptions {
        parallelism: 4,
        strict: false,
    };
    c.bench_function("batch_1000", |b| {
        b.iter(|| {
            let out = analyze_batch(black_box(&records), opts);
            black_box(out.len());
        })
    });
}

criterion_group!(
    benches,
    bench_full_analysis,
    bench_safety_line,
    bench_poisson_pmf,
    bench_batch
);
criterion_main!(benches);
