use crate::{
    dsp::{karplus::lerp, KarplusStrong, Noise},
    io::converter::{cents_to_ratio, midi_note_to_freq, velocity_norm},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,    // Silent, available
    Ringing, // Plucked and decaying
}

/// Velocity → excitation mapping shared by all strings.
#[derive(Debug, Clone, Copy)]
pub struct PluckResponse {
    pub decay_min: f32,
    pub decay_max: f32,
    pub base_rms: f32,
    pub rms_scale_min: f32,
    pub rms_scale_max: f32,
}

impl PluckResponse {
    /// Feedback decay: soft plucks die faster, hard plucks ring longer.
    pub fn decay(&self, velocity: u8) -> f32 {
        lerp(self.decay_min, self.decay_max, velocity_norm(velocity))
    }

    /// Excitation level: `base_rms` scaled between the min/max multipliers.
    pub fn target_rms(&self, velocity: u8) -> f32 {
        self.base_rms * lerp(self.rms_scale_min, self.rms_scale_max, velocity_norm(velocity))
    }
}

/// One string of the instrument.
pub struct StringVoice {
    ks: KarplusStrong,
    state: VoiceState,
    note: u8,
    velocity: u8,
    age: u64,
    detune_cents: f32,
    silence_threshold: f32,
}

impl StringVoice {
    pub fn new(max_delay: usize, detune_cents: f32, silence_threshold: f32) -> Self {
        Self {
            ks: KarplusStrong::new(max_delay),
            state: VoiceState::Idle,
            note: 0,
            velocity: 0,
            age: 0,
            detune_cents,
            silence_threshold,
        }
    }

    /// Frequency this string sounds for `note`, including its detune.
    pub fn frequency(&self, note: u8) -> f32 {
        midi_note_to_freq(note) * cents_to_ratio(self.detune_cents)
    }

    pub fn pluck(
        &mut self,
        note: u8,
        velocity: u8,
        age: u64,
        response: &PluckResponse,
        sample_rate: f32,
        noise: &mut Noise,
    ) {
        self.note = note;
        self.velocity = velocity;
        self.age = age;
        self.state = VoiceState::Ringing;

        let frequency = self.frequency(note);
        self.ks.pluck(
            sample_rate,
            frequency,
            response.decay(velocity),
            response.target_rms(velocity),
            noise,
        );
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.state == VoiceState::Idle {
            return 0.0;
        }

        let sample = self.ks.next_sample();

        // Release once a full lap stayed under the silence threshold
        if let Some(peak) = self.ks.take_cycle_peak() {
            if self.silence_threshold > 0.0 && peak < self.silence_threshold {
                self.free();
            }
        }

        sample
    }

    /// Hard stop regardless of remaining energy.
    pub fn free(&mut self) {
        self.state = VoiceState::Idle;
        self.ks.clear();
    }

    pub fn is_active(&self) -> bool {
        self.state == VoiceState::Ringing
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    /// Sample tick of the last pluck.
    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn decay(&self) -> f32 {
        self.ks.decay()
    }

    pub fn delay_len(&self) -> usize {
        self.ks.delay_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> PluckResponse {
        PluckResponse {
            decay_min: 0.992,
            decay_max: 0.9985,
            base_rms: 0.2,
            rms_scale_min: 0.5,
            rms_scale_max: 1.4,
        }
    }

    #[test]
    fn test_decay_is_monotonic_and_bounded() {
        let response = response();
        assert_eq!(response.decay(0), 0.992);
        assert!((response.decay(127) - 0.9985).abs() < 1e-7);

        let mut prev = response.decay(0);
        for v in 1..=127u8 {
            let d = response.decay(v);
            assert!(d >= prev, "decay dropped at velocity {}", v);
            assert!((0.992..=0.9985 + 1e-7).contains(&d));
            prev = d;
        }
    }

    #[test]
    fn test_target_rms_scales_with_velocity() {
        let response = response();
        assert!((response.target_rms(0) - 0.1).abs() < 1e-6);
        assert!((response.target_rms(127) - 0.28).abs() < 1e-6);
    }

    #[test]
    fn test_detune_shifts_frequency() {
        let flat = StringVoice::new(512, -6.0, 0.0);
        let sharp = StringVoice::new(512, 4.0, 0.0);
        assert!(flat.frequency(64) < midi_note_to_freq(64));
        assert!(sharp.frequency(64) > midi_note_to_freq(64));
    }

    #[test]
    fn test_pluck_then_free() {
        let mut voice = StringVoice::new(512, 0.0, 0.0);
        let mut noise = Noise::new(8);
        assert_eq!(voice.state(), VoiceState::Idle);
        assert_eq!(voice.next_sample(), 0.0);

        voice.pluck(45, 100, 12, &response(), 16_000.0, &mut noise);
        assert_eq!(voice.state(), VoiceState::Ringing);
        assert_eq!(voice.age(), 12);
        assert_eq!(voice.delay_len(), 145);
        assert!((0..500).any(|_| voice.next_sample() != 0.0));

        voice.free();
        assert!(!voice.is_active());
        assert!((0..500).all(|_| voice.next_sample() == 0.0));
    }

    #[test]
    fn test_silent_voice_releases_itself() {
        let mut voice = StringVoice::new(512, 0.0, 1.0e-4);
        let mut noise = Noise::new(21);
        let fast_decay = PluckResponse {
            decay_min: 0.5,
            decay_max: 0.5,
            ..response()
        };
        voice.pluck(64, 64, 0, &fast_decay, 16_000.0, &mut noise);

        for _ in 0..10_000 {
            voice.next_sample();
        }
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[test]
    fn test_zero_threshold_keeps_ringing() {
        let mut voice = StringVoice::new(512, 0.0, 0.0);
        let mut noise = Noise::new(21);
        let fast_decay = PluckResponse {
            decay_min: 0.5,
            decay_max: 0.5,
            ..response()
        };
        voice.pluck(64, 64, 0, &fast_decay, 16_000.0, &mut noise);

        for _ in 0..10_000 {
            voice.next_sample();
        }
        assert_eq!(voice.state(), VoiceState::Ringing);
    }
}
