//! Pluck scheduling - one strum gesture becomes six staggered string hits.
//!
//! A real strum does not hit all strings at once: the pick crosses them one
//! after another. The gap between strings shrinks as the strike gets harder.
//!
//! ```text
//! velocity   0 ──────────────────────────── 127
//! gap        slow (20 ms) ──────────────── fast (4 ms)
//!
//! down strum:  s0 ── s1 ── s2 ── s3 ── s4 ── s5
//! up strum:    s5 ── s4 ── s3 ── s2 ── s1 ── s0
//!              t0   t0+g  t0+2g ...
//! ```

use crate::{
    config::EngineConfig,
    dsp::karplus::lerp,
    io::converter::velocity_norm,
    synth::message::StrumDirection,
    NUM_STRINGS,
};

/// A pending string hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluckTrigger {
    pub string: usize,
    pub note: u8,
    pub velocity: u8,
    /// Sample tick at which the pluck fires
    pub fire_at: u64,
}

/// Returned when a trigger is pushed onto a full queue; the trigger is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub PluckTrigger);

/// Bounded FIFO of pending triggers. Storage is reserved up front and never
/// grows, so pushes and drains are safe on the render thread.
pub struct TriggerQueue {
    triggers: Vec<PluckTrigger>,
    capacity: usize,
}

impl TriggerQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            triggers: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue a trigger. When full, the new trigger is rejected and the queue
    /// is left untouched.
    pub fn push(&mut self, trigger: PluckTrigger) -> Result<(), QueueFull> {
        if self.triggers.len() >= self.capacity {
            return Err(QueueFull(trigger));
        }
        self.triggers.push(trigger);
        Ok(())
    }

    /// Hand every trigger due at or before `now` to `fire`, in queue order,
    /// and remove it. Returns the number fired.
    pub fn fire_due(&mut self, now: u64, mut fire: impl FnMut(PluckTrigger)) -> usize {
        let mut kept = 0;
        for i in 0..self.triggers.len() {
            let trigger = self.triggers[i];
            if trigger.fire_at <= now {
                fire(trigger);
            } else {
                self.triggers[kept] = trigger;
                kept += 1;
            }
        }
        let fired = self.triggers.len() - kept;
        self.triggers.truncate(kept);
        fired
    }

    /// Drop every pending trigger. Returns how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let cancelled = self.triggers.len();
        self.triggers.clear();
        cancelled
    }

    /// Earliest pending fire time.
    pub fn next_due(&self) -> Option<u64> {
        self.triggers.iter().map(|t| t.fire_at).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluckTrigger> {
        self.triggers.iter()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.triggers.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Result of expanding one strum into the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scheduled {
    pub queued: usize,
    pub dropped: usize,
}

/// Turns strum gestures into per-string triggers.
#[derive(Debug, Clone)]
pub struct PluckScheduler {
    slow_ms: f32,
    fast_ms: f32,
    samples_per_ms: f32,
}

impl PluckScheduler {
    pub fn new(slow_ms: f32, fast_ms: f32, sample_rate: f32) -> Self {
        Self {
            slow_ms,
            fast_ms,
            samples_per_ms: sample_rate / 1000.0,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.inter_delay_ms_slow,
            config.inter_delay_ms_fast,
            config.sample_rate as f32,
        )
    }

    /// Gap between consecutive strings: `slow` at velocity 0, `fast` at 127.
    pub fn inter_delay_ms(&self, velocity: u8) -> f32 {
        lerp(self.slow_ms, self.fast_ms, velocity_norm(velocity))
    }

    pub fn inter_delay_samples(&self, velocity: u8) -> f32 {
        self.inter_delay_ms(velocity) * self.samples_per_ms
    }

    /// Fire tick offsets (relative to the gesture) for each position in the
    /// strum order.
    pub fn offsets(&self, velocity: u8) -> [u64; NUM_STRINGS] {
        let step = self.inter_delay_samples(velocity);
        std::array::from_fn(|order| (order as f32 * step).round() as u64)
    }

    /// Queue one trigger per string, first string at `now`.
    pub fn schedule(
        &self,
        direction: StrumDirection,
        notes: &[u8; NUM_STRINGS],
        velocity: u8,
        now: u64,
        queue: &mut TriggerQueue,
    ) -> Scheduled {
        let mut result = Scheduled::default();
        for (order, offset) in self.offsets(velocity).into_iter().enumerate() {
            let string = direction.string_at(order);
            let trigger = PluckTrigger {
                string,
                note: notes[string],
                velocity,
                fire_at: now + offset,
            };
            match queue.push(trigger) {
                Ok(()) => result.queued += 1,
                Err(QueueFull(_)) => result.dropped += 1,
            }
        }
        result
    }
}
