/*!
 * Counter Benchmarks
 *
 * Compare consistency strategies and execution modes
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sync_counter::{ConsistencyStrategy, Counter, Driver, DriverConfig, ExecutionMode};

fn bench_uncontended_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended_increment");

    for strategy in ConsistencyStrategy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy),
            &strategy,
            |b, &strategy| {
                let counter = Counter::new(0, strategy);
                b.iter(|| {
                    counter.increment();
                    black_box(counter.read());
                });
            },
        );
    }

    group.finish();
}

fn bench_contended_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_run");
    group.sample_size(20);

    for strategy in ConsistencyStrategy::ALL {
        let config = DriverConfig::new(8, 10_000, strategy);

        group.bench_with_input(
            BenchmarkId::new("threads", strategy),
            &config,
            |b, config| {
                let driver = Driver::new(*config);
                b.iter(|| black_box(driver.execute().ok()));
            },
        );

        let pooled = config.with_mode(ExecutionMode::Pool { size: 4 });
        group.bench_with_input(BenchmarkId::new("pool", strategy), &pooled, |b, config| {
            let driver = Driver::new(*config);
            b.iter(|| black_box(driver.execute().ok()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_uncontended_increment, bench_contended_run);
criterion_main!(benches);
