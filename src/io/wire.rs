//! Text line decoder for the controller link.
//!
//! The controller sends one command per line:
//!
//! ```text
//! chord|gesture|velocity|volume     current form
//! chord|gesture|velocity            legacy form, volume defaults to 100
//! ```
//!
//! Numeric fields are parsed but not range-checked; clamping happens when the
//! command is consumed.

use super::command::{Command, Gesture};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Line was empty after trimming
    Empty,
    /// Fewer than three `|`-separated fields
    MissingField { line: String },
    /// Gesture token outside the known vocabulary
    UnknownGesture(String),
    /// Velocity or volume field is not an integer
    InvalidNumber { field: &'static str, value: String },
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireError::Empty => write!(f, "empty command line"),
            WireError::MissingField { line } => {
                write!(f, "expected chord|gesture|velocity[|volume], got {:?}", line)
            }
            WireError::UnknownGesture(token) => write!(f, "unknown gesture {:?}", token),
            WireError::InvalidNumber { field, value } => {
                write!(f, "{} is not an integer: {:?}", field, value)
            }
        }
    }
}

impl std::error::Error for WireError {}

/// Decode one controller line into a [`Command`].
pub fn parse_line(line: &str) -> Result<Command, WireError> {
    let line: String = line.chars().filter(|&c| c != '\r').collect();
    let line = line.trim();
    if line.is_empty() {
        return Err(WireError::Empty);
    }

    // Fields past the volume are ignored
    let mut fields = line.split('|');
    let (chord, gesture, velocity) = match (fields.next(), fields.next(), fields.next()) {
        (Some(chord), Some(gesture), Some(velocity)) => (chord, gesture, velocity),
        _ => {
            return Err(WireError::MissingField {
                line: line.to_string(),
            })
        }
    };

    let gesture = Gesture::from_wire(gesture.trim())
        .ok_or_else(|| WireError::UnknownGesture(gesture.trim().to_string()))?;
    let velocity = parse_number("velocity", velocity)?;
    let volume = fields.next().map(|v| parse_number("volume", v)).transpose()?;

    Ok(Command {
        chord: chord.trim().to_string(),
        gesture,
        velocity,
        volume,
    })
}

/// Encode a command back into its wire form (always the 4-field form when a
/// volume is present).
pub fn format_line(command: &Command) -> String {
    match command.volume {
        Some(volume) => format!(
            "{}|{}|{}|{}",
            command.chord,
            command.gesture.as_wire(),
            command.velocity,
            volume
        ),
        None => format!(
            "{}|{}|{}",
            command.chord,
            command.gesture.as_wire(),
            command.velocity
        ),
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<i32, WireError> {
    value.trim().parse().map_err(|_| WireError::InvalidNumber {
        field,
        value: value.trim().to_string(),
    })
}
