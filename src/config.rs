//! Engine constants.
//!
//! Everything the engine needs to know at startup lives in [`EngineConfig`].
//! The defaults are the instrument's shipped tuning; a TOML file can override
//! any subset of fields (missing fields keep their default).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::karplus::delay_length,
    io::converter::{cents_to_ratio, midi_note_to_freq},
    sequencing::autokey,
    sequencing::ChordTable,
    NUM_STRINGS,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Audio sample rate (Hz)
    pub sample_rate: u32,
    /// Number of strings in the bank; must equal `NUM_STRINGS`
    pub num_strings: usize,
    /// Karplus-Strong delay line capacity (samples)
    pub max_delay: usize,
    /// Pluck trigger queue depth
    pub max_queued_plucks: usize,
    /// Intake -> render ring capacity (messages)
    pub command_queue_capacity: usize,

    /// Inter-string delay for the softest strike (ms)
    pub inter_delay_ms_slow: f32,
    /// Inter-string delay for the hardest strike (ms)
    pub inter_delay_ms_fast: f32,

    /// Feedback decay for the softest pluck
    pub decay_min: f32,
    /// Feedback decay for the hardest pluck
    pub decay_max: f32,

    /// Excitation RMS before velocity scaling
    pub base_noise_rms: f32,
    pub rms_scale_min: f32,
    pub rms_scale_max: f32,

    /// Per-string pitch offset in cents, low string first
    pub detune_cents: [f32; NUM_STRINGS],

    /// Brightness low-pass coefficient (higher = brighter)
    pub lp_tone_alpha: f32,
    /// How much of the above-lowpass content is added back
    pub presence_mix: f32,
    /// Body resonance low-pass coefficient
    pub body_alpha: f32,
    pub body_mix: f32,

    /// Gain applied after master volume
    pub output_gain: f32,

    /// Choke transient length (ms)
    pub choke_ms: f32,
    pub choke_amplitude: f32,
    /// Per-sample envelope multiplier for the choke transient
    pub choke_decay: f32,

    /// Peak level below which a ringing string is released. 0 disables.
    pub silence_threshold: f32,
    /// Seed for the excitation/transient noise generator
    pub noise_seed: u64,

    /// Fully expanded AutoKey chord sequence
    pub autokey_sequence: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            num_strings: NUM_STRINGS,
            max_delay: 512,
            max_queued_plucks: NUM_STRINGS * 4,
            command_queue_capacity: 64,
            inter_delay_ms_slow: 20.0,
            inter_delay_ms_fast: 4.0,
            decay_min: 0.992,
            decay_max: 0.9985,
            base_noise_rms: 0.20,
            rms_scale_min: 0.5,
            rms_scale_max: 1.4,
            detune_cents: [-6.0, -3.0, -1.5, 0.0, 2.0, 4.0],
            lp_tone_alpha: 0.24,
            presence_mix: 0.25,
            body_alpha: 0.02,
            body_mix: 0.25,
            output_gain: 3.5,
            choke_ms: 20.0,
            choke_amplitude: 0.9,
            choke_decay: 0.90,
            silence_threshold: 1.0e-4,
            noise_seed: 0x5EED_F00D,
            autokey_sequence: autokey::default_progression(),
        }
    }
}

impl EngineConfig {
    /// Same tuning at a different sample rate (e.g. the output device's).
    /// `max_delay` is scaled with the rate so low strings keep their pitch.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        if self.sample_rate > 0 && sample_rate != self.sample_rate {
            let scale = sample_rate as f64 / self.sample_rate as f64;
            self.max_delay = (self.max_delay as f64 * scale).ceil() as usize;
        }
        self.sample_rate = sample_rate;
        self
    }

    /// Longest delay line any chord in `chords` needs at this sample rate,
    /// per-string detune included.
    pub fn required_delay(&self, chords: &ChordTable) -> usize {
        let sample_rate = self.sample_rate as f32;
        chords
            .iter()
            .flat_map(|chord| chord.notes().into_iter().zip(self.detune_cents))
            .map(|(note, cents)| {
                let frequency = midi_note_to_freq(note) * cents_to_ratio(cents);
                delay_length(sample_rate, frequency, usize::MAX)
            })
            .max()
            .unwrap_or(2)
    }

    /// Choke transient length in samples.
    pub fn choke_length_samples(&self) -> usize {
        self.ms_to_samples(self.choke_ms).round() as usize
    }

    /// Convert a duration in milliseconds to (fractional) samples.
    pub fn ms_to_samples(&self, ms: f32) -> f32 {
        ms * self.sample_rate as f32 / 1000.0
    }

    /// Check every constant against its documented range, and the AutoKey
    /// sequence against `chords`.
    pub fn validate(&self, chords: &ChordTable) -> Result<(), ConfigError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason })
            }
        }
        let unit = |x: f32| (0.0..=1.0).contains(&x);

        check(self.sample_rate > 0, "sample_rate", "must be positive")?;
        check(
            self.num_strings == NUM_STRINGS,
            "num_strings",
            "the string bank has exactly six strings",
        )?;
        check(self.max_delay >= 2, "max_delay", "must hold at least two samples")?;
        check(
            self.max_delay >= self.required_delay(chords),
            "max_delay",
            "too short for the lowest chord note at this sample rate",
        )?;
        check(self.max_queued_plucks > 0, "max_queued_plucks", "must be positive")?;
        check(
            self.command_queue_capacity > 0,
            "command_queue_capacity",
            "must be positive",
        )?;
        check(
            self.inter_delay_ms_fast >= 0.0 && self.inter_delay_ms_fast <= self.inter_delay_ms_slow,
            "inter_delay_ms_fast",
            "must be within 0..=inter_delay_ms_slow",
        )?;
        check(
            self.decay_min >= 0.0 && self.decay_min <= self.decay_max,
            "decay_min",
            "must be within 0..=decay_max",
        )?;
        check(self.decay_max < 1.0, "decay_max", "must be below 1.0")?;
        check(self.base_noise_rms > 0.0, "base_noise_rms", "must be positive")?;
        check(
            self.rms_scale_min >= 0.0 && self.rms_scale_min <= self.rms_scale_max,
            "rms_scale_min",
            "must be within 0..=rms_scale_max",
        )?;
        check(unit(self.lp_tone_alpha), "lp_tone_alpha", "must be within 0..=1")?;
        check(unit(self.body_alpha), "body_alpha", "must be within 0..=1")?;
        check(unit(self.body_mix), "body_mix", "must be within 0..=1")?;
        check(self.presence_mix >= 0.0, "presence_mix", "must not be negative")?;
        check(self.output_gain >= 0.0, "output_gain", "must not be negative")?;
        check(self.choke_ms >= 0.0, "choke_ms", "must not be negative")?;
        check(unit(self.choke_decay), "choke_decay", "must be within 0..=1")?;
        check(
            self.silence_threshold >= 0.0,
            "silence_threshold",
            "must not be negative",
        )?;

        if self.autokey_sequence.is_empty() {
            return Err(ConfigError::EmptyAutoKey);
        }
        if let Some(unknown) = self
            .autokey_sequence
            .iter()
            .find(|chord| !chords.contains(chord))
        {
            return Err(ConfigError::UnknownAutoKeyChord(unknown.clone()));
        }

        Ok(())
    }

    /// Parse a TOML document; fields not present keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Load a TOML config file.
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {}", path.display(), err)))?;
        Self::from_toml_str(&text)
    }
}

/// Errors that can occur when loading or validating a config
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A constant is outside its documented range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    /// AutoKey sequence names a chord the chord table does not have
    UnknownAutoKeyChord(String),
    /// AutoKey sequence has no entries
    EmptyAutoKey,
    /// Config file could not be read
    Io(String),
    /// Config file is not valid TOML for this schema
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid { field, reason } => write!(f, "invalid {}: {}", field, reason),
            ConfigError::UnknownAutoKeyChord(chord) => {
                write!(f, "AutoKey sequence uses unknown chord {:?}", chord)
            }
            ConfigError::EmptyAutoKey => write!(f, "AutoKey sequence is empty"),
            ConfigError::Io(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
