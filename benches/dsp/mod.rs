//! Benchmarks for the per-sample DSP stages.

mod karplus;
mod output;
mod tone;

pub use karplus::bench_karplus;
pub use output::bench_output;
pub use tone::bench_tone;
