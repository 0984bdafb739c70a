//! Benchmarks for complete strum gestures through the engine.

use std::hint::black_box;

use airstrum::{engine_pair, Command, EngineConfig, Gesture};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_strum(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/strum");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === RINGING CHORD ===
        // One hard strum, then steady-state rendering of six strings
        let Ok((mut handle, mut engine)) = engine_pair(EngineConfig::default()) else {
            return;
        };
        let _ = handle.submit(&Command::new("G", Gesture::StrumDown, 120));
        engine.render_block(&mut vec![0.0; 4096]);
        group.bench_with_input(BenchmarkId::new("ringing_chord", size), &size, |b, _| {
            b.iter(|| engine.render_block(black_box(&mut buffer)))
        });

        // === STRUM EVERY BLOCK ===
        // Alternating down/up strums: intake, scheduling and plucks per block
        let Ok((mut handle, mut engine)) = engine_pair(EngineConfig::default()) else {
            return;
        };
        let mut down = true;
        group.bench_with_input(BenchmarkId::new("strum_per_block", size), &size, |b, _| {
            b.iter(|| {
                let gesture = if down { Gesture::StrumDown } else { Gesture::StrumUp };
                down = !down;
                let _ = handle.submit(&Command::new("AUTOKEY", gesture, 100));
                engine.render_block(black_box(&mut buffer));
            })
        });

        // === STRUM THEN MUTE ===
        // Worst case for a block: pluck burst plus choke and filter reset
        let Ok((mut handle, mut engine)) = engine_pair(EngineConfig::default()) else {
            return;
        };
        group.bench_with_input(BenchmarkId::new("strum_mute", size), &size, |b, _| {
            b.iter(|| {
                let _ = handle.submit(&Command::new("Em", Gesture::StrumDown, 127));
                let _ = handle.submit(&Command::new("Em", Gesture::Mute, 0));
                engine.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
