use super::{noise::Noise, ring::RingBuffer};

/*
Karplus-Strong Plucked String
=============================

A plucked string is modelled as a loop: a delay line one period long whose
output is fed back through a gentle low-pass and a loss factor.

    ┌────────────── delay line (L samples) ──────────────┐
    │                                                    │
    └──→ oldest ──┬──→ output                            │
                  │                                      │
                  └──→ avg(oldest, next) × decay ────────┘

Pitch: one trip around the loop takes L samples, so

    L = round(sample_rate / frequency)

e.g. 82.4 Hz (low E) at 16 kHz → L = 194 samples.

Timbre: the line starts full of noise (the "pluck"). Every trip through the
two-point average removes a little more high-frequency content, so the tone
goes from bright attack to mellow ring, exactly like a real string.

Sustain: `decay` multiplies the loop gain. 0.992 dies quickly, 0.9985 rings
for several seconds.
*/

/// Delay length for a frequency, clamped to `2..=max_len`.
pub fn delay_length(sample_rate: f32, frequency: f32, max_len: usize) -> usize {
    let ideal = (sample_rate / frequency.max(f32::EPSILON)).round();
    (ideal as usize).clamp(2, max_len.max(2))
}

/// Linear interpolation between `min` and `max` by `t` in 0..=1.
#[inline]
pub fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t.clamp(0.0, 1.0)
}

/// Delay line + averaging feedback loop for one string.
pub struct KarplusStrong {
    line: RingBuffer,
    decay: f32,
    cycle_peak: f32,
    finished_cycle: Option<f32>,
}

impl KarplusStrong {
    /// `max_len` is the longest period (in samples) this string can hold.
    pub fn new(max_len: usize) -> Self {
        let mut line = RingBuffer::new(max_len.max(2));
        line.set_len(2);
        Self {
            line,
            decay: 0.0,
            cycle_peak: 0.0,
            finished_cycle: None,
        }
    }

    /// Excite the string: retune the loop to `frequency` and fill it with
    /// noise at `target_rms`.
    pub fn pluck(
        &mut self,
        sample_rate: f32,
        frequency: f32,
        decay: f32,
        target_rms: f32,
        noise: &mut Noise,
    ) {
        let len = delay_length(sample_rate, frequency, self.line.capacity());
        self.line.set_len(len);
        noise.fill_band_limited(self.line.as_mut_slice(), target_rms);
        self.decay = decay;
        self.cycle_peak = 0.0;
        self.finished_cycle = None;
    }

    /// Read the oldest sample and feed the filtered value back in.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let oldest = self.line.front();
        let next = self.line.get(1);
        self.cycle_peak = self.cycle_peak.max(oldest.abs());

        if self.line.rotate(self.decay * 0.5 * (oldest + next)) {
            self.finished_cycle = Some(self.cycle_peak);
            self.cycle_peak = 0.0;
        }

        oldest
    }

    /// Peak magnitude of the last full trip around the loop, if one has
    /// completed since the previous call.
    pub fn take_cycle_peak(&mut self) -> Option<f32> {
        self.finished_cycle.take()
    }

    pub fn clear(&mut self) {
        self.line.clear();
        self.cycle_peak = 0.0;
        self.finished_cycle = None;
    }

    pub fn delay_len(&self) -> usize {
        self.line.len()
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Excitation currently stored in the loop.
    pub fn contents(&self) -> &[f32] {
        self.line.as_slice()
    }
}
