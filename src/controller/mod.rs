//! Gesture decoding on the controller side.
//!
//! Turns accelerometer readings and keypad presses into [`Command`]s. The
//! engine does not depend on anything here; a controller only ever talks to
//! it through commands.

pub mod keypad;
pub mod strum;

pub use keypad::{Button, ChordKeypad, KeypadEvent};
pub use strum::{Accel, MotionSource, Strike, StrumDetector};

use crate::io::command::{Command, Gesture, AUTOKEY_CHORD, MAX_VOLUME};

pub struct Controller<M> {
    motion: M,
    detector: StrumDetector,
    keypad: ChordKeypad,
    volume: u8,
}

impl<M: MotionSource> Controller<M> {
    pub fn new(motion: M) -> Self {
        Self {
            motion,
            detector: StrumDetector::default(),
            keypad: ChordKeypad::new(),
            volume: MAX_VOLUME,
        }
    }

    pub fn keypad_event(&mut self, event: KeypadEvent) {
        self.keypad.handle(event);
    }

    pub fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(MAX_VOLUME);
    }

    /// Poll the motion source once; a detected strum becomes a command.
    pub fn poll(&mut self) -> Option<Command> {
        let strike = self.detector.poll(&mut self.motion)?;
        Some(self.command_for(strike))
    }

    /// Command for `strike` under the current keypad state.
    pub fn command_for(&self, strike: Strike) -> Command {
        let chord = if self.keypad.auto_mode() {
            AUTOKEY_CHORD
        } else {
            self.keypad.chord()
        };
        let gesture = if self.keypad.palm_mute() {
            Gesture::Mute
        } else {
            strike.gesture
        };
        Command::new(chord, gesture, strike.velocity as i32).with_volume(self.volume as i32)
    }

    pub fn keypad(&self) -> &ChordKeypad {
        &self.keypad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swing(y: i16) -> Vec<Accel> {
        vec![Accel { x: 0, y, z: 0 }]
    }

    #[test]
    fn test_strum_uses_selected_chord() {
        let mut controller = Controller::new(swing(-30_000).into_iter());
        controller.keypad_event(KeypadEvent::Key('5'));
        controller.set_volume(70);

        let command = controller.poll().unwrap();
        assert_eq!(command.chord, "E");
        assert_eq!(command.gesture, Gesture::StrumUp);
        assert_eq!(command.volume(), 70);
        assert!(command.velocity() > 100);
    }

    #[test]
    fn test_auto_mode_sends_sentinel() {
        let mut controller = Controller::new(swing(20_000).into_iter());
        controller.keypad_event(KeypadEvent::Button(Button::AutoMode));
        let command = controller.poll().unwrap();
        assert!(command.is_autokey());
        assert_eq!(command.gesture, Gesture::StrumDown);
    }

    #[test]
    fn test_palm_mute_turns_strum_into_mute() {
        let mut controller = Controller::new(std::iter::empty::<Accel>());
        let strike = Strike {
            gesture: Gesture::StrumDown,
            velocity: 90,
        };
        controller.keypad_event(KeypadEvent::Button(Button::PalmMute));
        assert_eq!(controller.command_for(strike).gesture, Gesture::Mute);
        assert_eq!(controller.poll(), None);
    }
}
