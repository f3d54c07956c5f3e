//! Dispatch Operations Benchmarks
//!
//! Benchmarks for step resolution and end-to-end scenario dispatch.
//!
//! Run with: `cargo bench --bench dispatch_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use todo_bdd::prelude::*;
use todo_bdd::steps;

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let registry = steps::registry().unwrap();

    let texts = vec![
        ("regex_step", "James opens the Todo Application"),
        ("string_step", "she adds 'buy milk'"),
        ("alternation", "he completes 'walk dog'"),
        ("last_registered", "he should see the credits in the footer"),
        ("unmatched", "she dances the tango"),
    ];

    for (name, text) in texts {
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |bench, text| {
            bench.iter(|| black_box(registry.resolve(black_box(text)).is_ok()));
        });
    }

    group.finish();
}

fn bench_registry_build(c: &mut Criterion) {
    c.bench_function("registry_build", |bench| {
        bench.iter(|| black_box(steps::registry().unwrap()));
    });
}

fn bench_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario");

    for count in [1usize, 5, 20] {
        let mut steps_list = vec![Step::given("Alice opens the Todo Application")];
        steps_list.extend((0..count).map(|i| Step::when(format!("she adds 'item {i}'"))));
        steps_list.push(Step::then("she completes 'item 0'"));
        let scenario = Scenario::new("bench", steps_list);

        group.bench_with_input(BenchmarkId::from_parameter(count), &scenario, |bench, scenario| {
            let mut runner =
                ScenarioRunner::new(steps::dispatcher().unwrap(), SimulatorFactory::default());
            bench.iter(|| black_box(runner.run_scenario(&[], black_box(scenario))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_registry_build, bench_scenario);
criterion_main!(benches);
