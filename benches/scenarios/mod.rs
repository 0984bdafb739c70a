//! Real-world scenario benchmarks.
//!
//! These drive the whole engine the way a player does: strums arriving
//! through the intake ring while blocks are rendered.

mod strum;

pub use strum::bench_strum;
