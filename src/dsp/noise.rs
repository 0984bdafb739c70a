use fastrand::Rng;

/// White noise source for string excitation and choke transients.
///
/// Seeded, so a given config renders the same audio every run.
pub struct Noise {
    rng: Rng,
}

impl Noise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// Uniform sample in [-1, 1).
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.rng.f32() * 2.0 - 1.0
    }

    /// Fill `out` with band-limited noise scaled to `target_rms`.
    ///
    /// White noise goes through a two-tap average (first-order low-pass),
    /// DC is removed, then the block is normalised to the requested RMS.
    pub fn fill_band_limited(&mut self, out: &mut [f32], target_rms: f32) {
        let mut prev = self.next_sample();
        for sample in out.iter_mut() {
            let white = self.next_sample();
            *sample = 0.5 * (white + prev);
            prev = white;
        }

        if out.is_empty() {
            return;
        }
        let mean = out.iter().sum::<f32>() / out.len() as f32;
        out.iter_mut().for_each(|s| *s -= mean);

        let current = rms(out);
        if current > f32::EPSILON {
            let gain = target_rms / current;
            out.iter_mut().for_each(|s| *s *= gain);
        }
    }
}

/// Root-mean-square level of a block.
pub fn rms(block: &[f32]) -> f32 {
    if block.is_empty() {
        return 0.0;
    }
    (block.iter().map(|s| s * s).sum::<f32>() / block.len() as f32).sqrt()
}
