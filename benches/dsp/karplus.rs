//! Benchmarks for the Karplus-Strong loop and the six-string bank.

use std::hint::black_box;

use airstrum::{
    dsp::{KarplusStrong, Noise},
    synth::StringBank,
    EngineConfig,
};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_karplus(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/karplus");
    let config = EngineConfig::default();
    let sample_rate = config.sample_rate as f32;
    let mut noise = Noise::new(config.noise_seed);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Single string, low E
        let mut string = KarplusStrong::new(config.max_delay);
        string.pluck(sample_rate, 82.41, 0.996, 0.2, &mut noise);
        group.bench_with_input(BenchmarkId::new("single_string", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = string.next_sample();
                }
                black_box(&buffer);
            })
        });

        // Full bank, every string ringing an E major shape
        let mut bank = StringBank::new(&config);
        for (string, note) in [40u8, 47, 52, 56, 59, 64].into_iter().enumerate() {
            bank.pluck(string, note, 100, 0, &mut noise);
        }
        group.bench_with_input(BenchmarkId::new("bank_six_strings", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = bank.next_sample();
                }
                black_box(&buffer);
            })
        });
    }

    // Pluck cost is dominated by filling the delay line with shaped noise
    let mut string = KarplusStrong::new(config.max_delay);
    group.bench_function("pluck_low_e", |b| {
        b.iter(|| string.pluck(black_box(sample_rate), black_box(82.41), 0.996, 0.2, &mut noise))
    });

    group.finish();
}
