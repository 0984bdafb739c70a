#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::NUM_STRINGS;

/// Order in which a strum crosses the strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrumDirection {
    /// Low string to high string
    Down,
    /// High string to low string
    Up,
}

impl StrumDirection {
    /// String index hit at position `order` (0 = first) within the strum.
    #[inline]
    pub fn string_at(self, order: usize) -> usize {
        match self {
            StrumDirection::Down => order,
            StrumDirection::Up => NUM_STRINGS - 1 - order,
        }
    }
}

/// Messages from the intake side to the render step.
///
/// Everything here is `Copy`: the render step must never free or allocate,
/// so chord names are resolved to notes before crossing the queue.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    Strum {
        direction: StrumDirection,
        notes: [u8; NUM_STRINGS],
        velocity: u8,
    },
    Mute,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// Receiver that never has anything; for driving an engine directly.
pub struct NoMessages;

impl MessageReceiver for NoMessages {
    fn pop(&mut self) -> Option<SynthMessage> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strum_order() {
        let down: Vec<usize> = (0..NUM_STRINGS).map(|i| StrumDirection::Down.string_at(i)).collect();
        let up: Vec<usize> = (0..NUM_STRINGS).map(|i| StrumDirection::Up.string_at(i)).collect();
        assert_eq!(down, [0, 1, 2, 3, 4, 5]);
        assert_eq!(up, [5, 4, 3, 2, 1, 0]);
    }
}
