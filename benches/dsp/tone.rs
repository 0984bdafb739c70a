//! Benchmarks for the bus tone shaper.

use std::hint::black_box;

use airstrum::{dsp::ToneShaper, EngineConfig};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/tone");
    let config = EngineConfig::default();

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp stands in for a summed string bus
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut tone = ToneShaper::new(
            config.lp_tone_alpha,
            config.presence_mix,
            config.body_alpha,
            config.body_mix,
        );
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("shape", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                tone.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
