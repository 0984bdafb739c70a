//! State shared between the intake side and the render step.
//!
//! Both types are plain atomics so the render step can read and update them
//! without locking.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::dsp::mix::volume_to_gain;

/// Master volume as an `f32` gain in 0.0..=1.0, stored as its bit pattern.
#[derive(Debug)]
pub struct MasterVolume(AtomicU32);

impl MasterVolume {
    pub fn new(gain: f32) -> Self {
        Self(AtomicU32::new(gain.clamp(0.0, 1.0).to_bits()))
    }

    /// Set from a 0-100 controller percentage.
    pub fn set_percent(&self, percent: u8) {
        self.set(volume_to_gain(percent));
    }

    pub fn set(&self, gain: f32) {
        self.0.store(gain.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

impl Default for MasterVolume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Running counters. The render step only ever increments.
#[derive(Debug, Default)]
pub struct EngineStats {
    plucks: AtomicU64,
    dropped_triggers: AtomicU64,
    cancelled_triggers: AtomicU64,
    chokes: AtomicU64,
    dropped_messages: AtomicU64,
}

/// Point-in-time copy of [`EngineStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Triggers that fired and plucked a string
    pub plucks: u64,
    /// Triggers rejected by a full pluck queue
    pub dropped_triggers: u64,
    /// Pending triggers discarded by a mute
    pub cancelled_triggers: u64,
    pub chokes: u64,
    /// Messages rejected by a full intake ring
    pub dropped_messages: u64,
}

impl EngineStats {
    pub fn record_plucks(&self, n: usize) {
        self.plucks.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub fn record_dropped_triggers(&self, n: usize) {
        self.dropped_triggers.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub fn record_choke(&self, cancelled: usize) {
        self.chokes.fetch_add(1, Ordering::Relaxed);
        self.cancelled_triggers
            .fetch_add(cancelled as u64, Ordering::Relaxed);
    }

    pub fn record_dropped_message(&self) {
        self.dropped_messages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            plucks: self.plucks.load(Ordering::Relaxed),
            dropped_triggers: self.dropped_triggers.load(Ordering::Relaxed),
            cancelled_triggers: self.cancelled_triggers.load(Ordering::Relaxed),
            chokes: self.chokes.load(Ordering::Relaxed),
            dropped_messages: self.dropped_messages.load(Ordering::Relaxed),
        }
    }
}
