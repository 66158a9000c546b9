//! Benchmarks for clustering and surrogate generation.
//!
//! Run with: `cargo bench --bench privacy`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use geoguard::{cluster_samples, LocationSample, PrivacyConfig, PrivacyEngine};

/// Generate a history of `visits` repeated fixes at each of `places`
/// locations, with metropolitan-scale spread between places.
fn synthetic_history(places: usize, visits: usize, seed: u64) -> Vec<LocationSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(places * visits);

    for _ in 0..places {
        let lat = 37.7 + rng.gen_range(-0.1..0.1);
        let lng = -122.4 + rng.gen_range(-0.1..0.1);
        for _ in 0..visits {
            // Repeat fixes with receiver-scale jitter (~1 m)
            let jlat = lat + rng.gen_range(-1e-5..1e-5);
            let jlng = lng + rng.gen_range(-1e-5..1e-5);
            samples.push(LocationSample::new(jlat, jlng, String::new()));
        }
    }

    samples
}

fn bench_clustering(c: &mut Criterion) {
    let config = PrivacyConfig::default();
    let mut group = c.benchmark_group("clustering");

    for places in [5, 20, 50] {
        let history = synthetic_history(places, 20, 42);
        group.bench_with_input(
            BenchmarkId::new("cluster_samples", format!("{places}x20")),
            &history,
            |b, samples| {
                b.iter(|| cluster_samples(samples, &config));
            },
        );
    }

    group.finish();
}

fn bench_protect(c: &mut Criterion) {
    let mut engine = PrivacyEngine::new(PrivacyConfig::default());
    engine.replace_history(synthetic_history(20, 20, 42));

    let mut group = c.benchmark_group("protect");

    for level in [2u8, 5, 9] {
        group.bench_with_input(BenchmarkId::new("protect", level), &level, |b, &level| {
            b.iter(|| engine.protect(37.75, -122.42, Some(level)));
        });
    }

    group.bench_function("is_sensitive", |b| {
        b.iter(|| engine.is_sensitive(37.75, -122.42));
    });

    group.finish();
}

criterion_group!(benches, bench_clustering, bench_protect);
criterion_main!(benches);
