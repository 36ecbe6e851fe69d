use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use popularity_core::{ChartLayout, HdiLevel, Interval, LineChart, OuterHdi, PollRecord, Point, PredictionRecord, ScatterChart};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 5, 1).unwrap()
}

fn gen_predictions(n: u64) -> Vec<PredictionRecord> {
    (0..n)
        .map(|i| {
            let mean = 40.0 + (i as f64 * 0.05).sin() * 8.0;
            PredictionRecord {
                date: start() + Days::new(i),
                mean_pct: mean,
                hdi50: Interval::new(mean - 2.0, mean + 2.0),
                outer: OuterHdi { level: HdiLevel::P95, interval: Interval::new(mean - 6.0, mean + 6.0) },
            }
        })
        .collect()
}

fn gen_polls(n: u64) -> Vec<PollRecord> {
    let pollsters = ["IFOP", "Elabe", "Kantar", "Harris Interactive", "BVA"];
    (0..n)
        .map(|i| PollRecord {
            // scrambled order, as the feed delivers it
            field_date: start() + Days::new((i * 7919) % 1800),
            pollster_id: pollsters[(i % 5) as usize].to_string(),
            method: "internet".to_string(),
            approve_pct: 30.0 + (i % 25) as f64,
            disapprove_pct: 60.0,
            sample_size: 1000,
        })
        .collect()
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_px");
    for &n in &[365u64, 1_800] {
        let chart = LineChart::new(gen_predictions(n), ChartLayout::default()).unwrap();
        let width = chart.layout().plot_width();
        group.bench_with_input(BenchmarkId::from_parameter(n), &chart, |b, chart| {
            b.iter(|| {
                let mut px = 0.0f32;
                while px < width {
                    black_box(chart.index().lookup_px(chart.x_scale(), px));
                    px += 1.0;
                }
            });
        });
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for &n in &[500u64, 5_000] {
        let chart = ScatterChart::new(gen_polls(n), ChartLayout::default());
        group.bench_with_input(BenchmarkId::from_parameter(n), &chart, |b, chart| {
            b.iter(|| {
                for x in (0..700).step_by(7) {
                    black_box(chart.hit_test(Point::new(x as f32, 230.0), std::time::Duration::ZERO));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup, bench_hit_test);
criterion_main!(benches);
