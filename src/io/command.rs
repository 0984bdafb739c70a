//! Decoded controller commands.
//!
//! A `Command` is what the intake side receives once per decoded line. Its
//! numeric fields are taken as-is from the decoder and are only trusted after
//! going through [`Command::velocity`] and [`Command::volume`], which clamp to
//! the documented ranges.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chord identifier meaning "use the AutoKey sequence's next chord".
pub const AUTOKEY_CHORD: &str = "AUTOKEY";

/// Highest accepted strike velocity (MIDI-style).
pub const MAX_VELOCITY: u8 = 127;

/// Highest accepted volume percentage.
pub const MAX_VOLUME: u8 = 100;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    StrumDown,
    StrumUp,
    Mute,
}

impl Gesture {
    /// Parse the wire vocabulary (`STRUM_DOWN`, `STRUM_UP`, `MUTE`).
    pub fn from_wire(token: &str) -> Option<Self> {
        match token {
            "STRUM_DOWN" => Some(Gesture::StrumDown),
            "STRUM_UP" => Some(Gesture::StrumUp),
            "MUTE" => Some(Gesture::Mute),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Gesture::StrumDown => "STRUM_DOWN",
            Gesture::StrumUp => "STRUM_UP",
            Gesture::Mute => "MUTE",
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub chord: String,
    pub gesture: Gesture,
    /// Raw strike velocity, expected 0-127.
    pub velocity: i32,
    /// Raw volume percentage, expected 0-100. `None` for legacy records.
    pub volume: Option<i32>,
}

impl Command {
    pub fn new(chord: impl Into<String>, gesture: Gesture, velocity: i32) -> Self {
        Self {
            chord: chord.into(),
            gesture,
            velocity,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: i32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn is_autokey(&self) -> bool {
        self.chord == AUTOKEY_CHORD
    }

    /// Strike velocity clamped to 0-127.
    pub fn velocity(&self) -> u8 {
        self.velocity.clamp(0, MAX_VELOCITY as i32) as u8
    }

    /// Volume percentage clamped to 0-100; absent volume means full volume.
    pub fn volume(&self) -> u8 {
        self.volume
            .map_or(MAX_VOLUME as i32, |v| v.clamp(0, MAX_VOLUME as i32)) as u8
    }
}
