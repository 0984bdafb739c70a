// Purpose - external interfaces, format conversions

pub mod command;
pub mod converter;
pub mod source;
pub mod wire;

pub use command::{Command, Gesture, AUTOKEY_CHORD};
pub use source::{CommandSource, LineCommandSource};
pub use wire::{parse_line, WireError};
