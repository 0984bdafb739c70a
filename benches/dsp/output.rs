//! Benchmarks for the choke transient and output mixer.

use std::hint::black_box;

use airstrum::{
    dsp::{ChokeHandler, Noise, OutputMixer},
    EngineConfig,
};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/output");
    let config = EngineConfig::default();
    let mut noise = Noise::new(config.noise_seed);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Choke overlay while a transient is running (retriggered per block)
        let mut choke = ChokeHandler::new(size, config.choke_amplitude, config.choke_decay);
        let mixer = OutputMixer::new(config.output_gain);
        group.bench_with_input(BenchmarkId::new("choke_mix", size), &size, |b, _| {
            b.iter(|| {
                choke.trigger();
                for s in buffer.iter_mut() {
                    *s = mixer.mix(0.1, choke.next_sample(&mut noise), black_box(0.8));
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
