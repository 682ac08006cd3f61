//! Benchmark for face rendering and indicator compositing.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gaugeviz::config::GaugeConfig;
use gaugeviz::gauge::Gauge;
use gaugeviz::ticks::{TickOverrun, TickSet};
use std::hint::black_box;

fn gauge_construction_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gauge_construction");

    for (box_length, supersampling) in [(250, 1), (250, 2), (500, 2), (500, 4)] {
        let config = GaugeConfig::radial()
            .range(-24.0, 24.0)
            .major_tick_step(4.0)
            .box_length(box_length)
            .supersampling(supersampling);

        group.bench_with_input(
            BenchmarkId::new("radial", format!("{box_length}px_x{supersampling}")),
            &config,
            |b, config| {
                b.iter(|| Gauge::new(black_box(config.clone())).unwrap());
            },
        );
    }

    let linear = GaugeConfig::linear().height(500);
    group.bench_function("linear_500px", |b| {
        b.iter(|| Gauge::new(black_box(linear.clone())).unwrap());
    });

    group.finish();
}

fn indicator_update_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_update");

    for supersampling in [1, 2, 4] {
        let mut gauge = Gauge::new(GaugeConfig::radial().supersampling(supersampling)).unwrap();
        let mut value = 0.0;

        group.bench_with_input(BenchmarkId::new("radial_250px", supersampling), &supersampling, |b, _| {
            b.iter(|| {
                value = if value >= 100.0 { 0.0 } else { value + 1.0 };
                gauge.on_value_changed(black_box(value)).unwrap();
            });
        });
    }

    let mut gauge = Gauge::new(GaugeConfig::linear().height(500)).unwrap();
    let mut value = -20.0;
    group.bench_function("linear_500px", |b| {
        b.iter(|| {
            value = if value >= 20.0 { -20.0 } else { value + 0.5 };
            gauge.on_value_changed(black_box(value)).unwrap();
        });
    });

    group.finish();
}

fn tick_planning_benchmark(c: &mut Criterion) {
    c.bench_function("tick_plan_1000", |b| {
        b.iter(|| TickSet::plan(black_box(0.0), black_box(1000.0), 1.0, 5, TickOverrun::Discard));
    });
}

criterion_group!(benches, gauge_construction_benchmark, indicator_update_benchmark, tick_planning_benchmark);
criterion_main!(benches);
