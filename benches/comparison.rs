//! Policy comparison benchmarks over synthetic access patterns.
//!
//! Run with: `cargo bench --bench comparison`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use memokit::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 512;
const OPS: usize = 20_000;
const SEED: u64 = 42;

/// Access patterns shared by every policy.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Uniform keys over four times the capacity.
    Uniform,
    /// 80% of lookups on a hot fifth of the key space.
    Hotset,
    /// Cyclic scan one larger than the capacity.
    Loop,
    /// Hot set interrupted by one long one-shot scan.
    ScanBurst,
}

impl Pattern {
    const ALL: [Pattern; 4] = [
        Pattern::Uniform,
        Pattern::Hotset,
        Pattern::Loop,
        Pattern::ScanBurst,
    ];

    fn name(self) -> &'static str {
        match self {
            Pattern::Uniform => "uniform",
            Pattern::Hotset => "hotset",
            Pattern::Loop => "loop",
            Pattern::ScanBurst => "scan_burst",
        }
    }

    fn keys(self) -> Vec<u64> {
        let universe = CAPACITY as u64 * 4;
        let hot = universe / 5;
        let mut rng = SmallRng::seed_from_u64(SEED);
        match self {
            Pattern::Uniform => (0..OPS).map(|_| rng.random_range(0..universe)).collect(),
            Pattern::Hotset => (0..OPS)
                .map(|_| {
                    if rng.random::<f64>() < 0.8 {
                        rng.random_range(0..hot)
                    } else {
                        rng.random_range(hot..universe)
                    }
                })
                .collect(),
            Pattern::Loop => (0..OPS as u64).map(|i| i % (CAPACITY as u64 + 1)).collect(),
            Pattern::ScanBurst => {
                let third = OPS / 3;
                let mut keys: Vec<u64> = (0..third).map(|_| rng.random_range(0..hot)).collect();
                keys.extend((0..third as u64).map(|i| universe + i));
                keys.extend((0..OPS - 2 * third).map(|_| rng.random_range(0..hot)));
                keys
            },
        }
    }
}

fn run(policy: CachePolicy, keys: &[u64]) -> Stat {
    let cache = CacheBuilder::new(CAPACITY)
        .source(|k: &u64| Ok::<_, ()>(k.wrapping_mul(31)))
        .build(policy)
        .unwrap();
    for key in keys {
        black_box(cache.get(key).unwrap());
    }
    cache.stat()
}

fn bench_patterns(c: &mut Criterion) {
    for pattern in Pattern::ALL {
        let keys = pattern.keys();
        let mut group = c.benchmark_group(format!("pattern_{}", pattern.name()));
        group.throughput(Throughput::Elements(keys.len() as u64));

        for policy in CachePolicy::ALL {
            group.bench_with_input(BenchmarkId::from_parameter(policy), &keys, |b, keys| {
                b.iter(|| run(policy, keys))
            });
        }

        group.finish();
    }
}

/// Prints one hit-ratio table next to the timing results.
fn report_hit_ratios(_c: &mut Criterion) {
    println!();
    print!("{:<12}", "pattern");
    for policy in CachePolicy::ALL {
        print!("{:>12}", policy.name());
    }
    println!();

    for pattern in Pattern::ALL {
        let keys = pattern.keys();
        print!("{:<12}", pattern.name());
        for policy in CachePolicy::ALL {
            let stat = run(policy, &keys);
            print!("{:>11.2}%", stat.hit_ratio() * 100.0);
        }
        println!();
    }
    println!();
}

criterion_group!(benches, report_hit_ratios, bench_patterns);
criterion_main!(benches);
