use carbon_market::{generate_series, select_window, SeriesConfig, TimeRange};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_generate(c: &mut Criterion) {
    let cfg = SeriesConfig::dashboard(NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(), 42);
    c.bench_function("generate 4y weekday series", |b| {
        b.iter(|| black_box(generate_series(&cfg)).len())
    });

    let series = generate_series(&cfg);
    c.bench_function("select 1-year window", |b| {
        b.iter(|| black_box(select_window(&series, TimeRange::OneYear)).len())
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
