//! Low-level DSP primitives used by the string bank and engine.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so they can be driven directly from the audio callback.

/// Choke (palm-mute) noise transient.
pub mod choke;
/// Karplus-Strong delay loop for a single string.
pub mod karplus;
/// Output gain, master volume and clipping.
pub mod mix;
/// Seeded noise for excitation and transients.
pub mod noise;
/// Bounded circular buffer backing the string delay lines.
pub mod ring;
/// Bus colouring: brightness, presence and body.
pub mod tone;

pub use choke::{ChokeHandler, ChokeTransient};
pub use karplus::KarplusStrong;
pub use mix::OutputMixer;
pub use noise::Noise;
pub use ring::RingBuffer;
pub use tone::ToneShaper;
