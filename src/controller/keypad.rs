//! Chord selection keypad and mode buttons.
//!
//! ```text
//!   ┌───┬───┬───┐      group 1            group 2
//!   │ 1 │ 2 │ 3 │      C   G   D          Am    Em    Dm
//!   │ 4 │ 5 │ 6 │      A   E   F          Bm    F#m   Gm
//!   │ 7 │ 8 │ 9 │      C7  G7  D7         Dsus4 Gsus4 Asus4
//!   │ * │ 0 │ # │      A7  E7  B7         Esus4 Bdim  F#dim
//!   └───┴───┴───┘
//!   [group 1] [group 2] [auto] [palm mute]
//! ```

use tracing::debug;

pub const CHORD_GROUPS: [[&str; 12]; 2] = [
    ["C", "G", "D", "A", "E", "F", "C7", "G7", "D7", "A7", "E7", "B7"],
    [
        "Am", "Em", "Dm", "Bm", "F#m", "Gm", "Dsus4", "Gsus4", "Asus4", "Esus4", "Bdim", "F#dim",
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Group1,
    Group2,
    /// Turns autoplay on. Pressing it while on does nothing.
    AutoMode,
    /// Toggles palm mute
    PalmMute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadEvent {
    Key(char),
    Button(Button),
}

/// Keypad position (`1`..`9`, `*`, `0`, `#`) to chord slot 0..11.
pub fn key_slot(key: char) -> Option<usize> {
    match key {
        '1'..='9' => key.to_digit(10).map(|d| d as usize - 1),
        '*' => Some(9),
        '0' => Some(10),
        '#' => Some(11),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct ChordKeypad {
    group: usize,
    chord: &'static str,
    auto_mode: bool,
    palm_mute: bool,
}

impl ChordKeypad {
    pub fn new() -> Self {
        Self {
            group: 0,
            chord: CHORD_GROUPS[0][0],
            auto_mode: false,
            palm_mute: false,
        }
    }

    pub fn handle(&mut self, event: KeypadEvent) {
        match event {
            KeypadEvent::Key(key) => {
                self.press_key(key);
            }
            KeypadEvent::Button(button) => self.press_button(button),
        }
    }

    /// Any key press leaves AutoMode. Returns the newly selected chord, or
    /// `None` for a key outside the map.
    pub fn press_key(&mut self, key: char) -> Option<&'static str> {
        if self.auto_mode {
            self.auto_mode = false;
            debug!("auto mode off");
        }
        let slot = key_slot(key)?;
        self.chord = CHORD_GROUPS[self.group][slot];
        debug!(key = %key, chord = self.chord, group = self.group + 1, "chord selected");
        Some(self.chord)
    }

    pub fn press_button(&mut self, button: Button) {
        match button {
            Button::Group1 => self.group = 0,
            Button::Group2 => self.group = 1,
            Button::AutoMode => self.auto_mode = true,
            Button::PalmMute => self.palm_mute = !self.palm_mute,
        }
    }

    /// Currently selected manual chord.
    pub fn chord(&self) -> &'static str {
        self.chord
    }

    /// 1 or 2
    pub fn group(&self) -> usize {
        self.group + 1
    }

    pub fn auto_mode(&self) -> bool {
        self.auto_mode
    }

    pub fn palm_mute(&self) -> bool {
        self.palm_mute
    }
}

impl Default for ChordKeypad {
    fn default() -> Self {
        Self::new()
    }
}
