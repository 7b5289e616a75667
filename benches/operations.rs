use criterion::{criterion_group, BenchmarkId, Criterion};
use probe_table::{demo, Strategy, Table};
use rand::{rngs::StdRng, Rng, SeedableRng};

const STRATEGIES: [Strategy; 2] = [Strategy::LinearProbing, Strategy::DoubleHashing];

fn keys(n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..n).map(|_| rng.gen_range(0..(n as u64) * 10)).collect()
}

pub fn scenarios(c: &mut Criterion) {
    for scenario in demo::SCENARIOS {
        c.bench_function(scenario.name, |b| {
            b.iter(|| demo::run_scenario(scenario).is_ok())
        });
    }
}

pub fn fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");
    // 1021 is prime, so double hashing reaches every slot
    for capacity in [64, 1021] {
        let keys = keys(capacity);
        for strategy in STRATEGIES {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), capacity),
                &capacity,
                |b, &capacity| {
                    b.iter(|| {
                        let mut table = Table::new(capacity, strategy).unwrap();
                        for &k in &keys {
                            let _ = table.insert(k);
                        }
                        table
                    })
                },
            );
        }
    }
    group.finish()
}

pub fn search_with_tombstones(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_with_tombstones");
    let capacity = 1021;
    let keys = keys(capacity * 3 / 4);
    for strategy in STRATEGIES {
        let mut table = Table::new(capacity, strategy).unwrap();
        for &k in &keys {
            table.insert(k).unwrap();
        }
        for &k in keys.iter().step_by(3) {
            table.remove(k);
        }
        group.bench_function(strategy.to_string(), |b| {
            b.iter(|| keys.iter().filter(|&&k| table.contains(k)).count())
        });
    }
    group.finish()
}

criterion_group!(inserts, scenarios, fill);
criterion_group!(lookups, search_with_tombstones);
