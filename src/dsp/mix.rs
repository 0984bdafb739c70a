//! Final output stage.

/*
Output Mixing
=============

    sample = clamp(output_gain × master_volume × (shaped_strings + choke), −1, +1)

The choke transient is added after tone shaping so the "click" keeps its
bite. Master volume is the controller's 0-100 volume mapped to 0.0-1.0; the
fixed output gain makes up for the quiet Karplus-Strong level (six strings at
~0.2 RMS each rarely reach full scale).

The hard clamp is the last line of defence before the DAC: a hard strum at
full volume can briefly exceed ±1.0, and wrapping would be far worse than
clipping.
*/

/// Map a 0-100 volume percentage to a 0.0-1.0 gain.
#[inline]
pub fn volume_to_gain(percent: u8) -> f32 {
    percent.min(100) as f32 / 100.0
}

#[derive(Debug, Clone, Copy)]
pub struct OutputMixer {
    output_gain: f32,
}

impl OutputMixer {
    pub fn new(output_gain: f32) -> Self {
        Self { output_gain }
    }

    #[inline]
    pub fn mix(&self, shaped: f32, choke: f32, master_volume: f32) -> f32 {
        (self.output_gain * master_volume * (shaped + choke)).clamp(-1.0, 1.0)
    }

    pub fn output_gain(&self) -> f32 {
        self.output_gain
    }
}
