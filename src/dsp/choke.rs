use super::noise::Noise;

/// Short decaying noise burst played when the strings are choked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChokeTransient {
    pub remaining: usize,
    pub amplitude: f32,
}

/// Holds at most one transient; a new choke replaces the running one.
pub struct ChokeHandler {
    length: usize,
    start_amplitude: f32,
    envelope_decay: f32,
    transient: Option<ChokeTransient>,
}

impl ChokeHandler {
    pub fn new(length: usize, start_amplitude: f32, envelope_decay: f32) -> Self {
        Self {
            length,
            start_amplitude,
            envelope_decay,
            transient: None,
        }
    }

    /// Start (or restart) the transient at full length and amplitude.
    pub fn trigger(&mut self) {
        self.transient = (self.length > 0).then_some(ChokeTransient {
            remaining: self.length,
            amplitude: self.start_amplitude,
        });
    }

    /// One sample of the transient, or 0.0 when idle.
    #[inline]
    pub fn next_sample(&mut self, noise: &mut Noise) -> f32 {
        let Some(transient) = self.transient.as_mut() else {
            return 0.0;
        };

        let out = transient.amplitude * noise.next_sample();
        transient.amplitude *= self.envelope_decay;
        transient.remaining -= 1;
        if transient.remaining == 0 {
            self.transient = None;
        }
        out
    }

    pub fn is_active(&self) -> bool {
        self.transient.is_some()
    }

    pub fn transient(&self) -> Option<ChokeTransient> {
        self.transient
    }

    pub fn length(&self) -> usize {
        self.length
    }
}
