/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// Frequency ratio for an offset in cents (100 cents = 1 semitone).
pub fn cents_to_ratio(cents: f32) -> f32 {
    2.0_f32.powf(cents / 1200.0)
}

/// Normalise a 0-127 velocity to 0.0-1.0.
#[inline]
pub fn velocity_norm(velocity: u8) -> f32 {
    velocity.min(127) as f32 / 127.0
}
