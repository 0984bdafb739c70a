use crate::{
    config::EngineConfig,
    dsp::Noise,
    synth::voice::{PluckResponse, StringVoice, VoiceState},
    NUM_STRINGS,
};

/// The six strings, each owning its own delay line.
///
/// Voices are only touched from the render step: plucks fire from the
/// trigger queue, chokes stop everything, and `next_sample` sums all strings
/// whether or not they are ringing.
pub struct StringBank {
    voices: Vec<StringVoice>,
    response: PluckResponse,
    sample_rate: f32,
}

impl StringBank {
    pub fn new(config: &EngineConfig) -> Self {
        let voices = config
            .detune_cents
            .iter()
            .map(|&cents| StringVoice::new(config.max_delay, cents, config.silence_threshold))
            .collect();

        Self {
            voices,
            response: PluckResponse {
                decay_min: config.decay_min,
                decay_max: config.decay_max,
                base_rms: config.base_noise_rms,
                rms_scale_min: config.rms_scale_min,
                rms_scale_max: config.rms_scale_max,
            },
            sample_rate: config.sample_rate as f32,
        }
    }

    /// Excite one string. Out-of-range string indices are ignored.
    pub fn pluck(&mut self, string: usize, note: u8, velocity: u8, age: u64, noise: &mut Noise) {
        if let Some(voice) = self.voices.get_mut(string) {
            voice.pluck(note, velocity, age, &self.response, self.sample_rate, noise);
        }
    }

    /// Render one sample from every string and sum.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.voices.iter_mut().map(StringVoice::next_sample).sum()
    }

    /// Stop every string immediately.
    pub fn choke_all(&mut self) {
        for voice in &mut self.voices {
            voice.free();
        }
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn states(&self) -> [VoiceState; NUM_STRINGS] {
        std::array::from_fn(|i| self.voices[i].state())
    }

    pub fn voice(&self, string: usize) -> Option<&StringVoice> {
        self.voices.get(string)
    }

    pub fn response(&self) -> &PluckResponse {
        &self.response
    }
}
