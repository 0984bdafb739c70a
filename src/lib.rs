pub mod config; // Tunable engine constants
pub mod controller; // Motion/keypad gesture decoding
pub mod dsp;
pub mod engine; // Render step, pluck scheduling, intake handle
pub mod io;
pub mod sequencing; // Chord table and AutoKey progression
pub mod synth; // String bank and voice state

pub use config::{ConfigError, EngineConfig};
#[cfg(feature = "rtrb")]
pub use engine::{engine_pair, EngineHandle, SubmitError};
pub use engine::{EngineStats, GuitarEngine, MasterVolume};
pub use io::command::{Command, Gesture};

/// Number of strings on the instrument. Chord definitions, detune tables and
/// the string bank are all sized by this.
pub const NUM_STRINGS: usize = 6;

/// Largest block `GuitarEngine::render_block` is expected to be driven with.
pub const MAX_BLOCK_SIZE: usize = 2048;
