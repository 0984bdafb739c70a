pub mod autokey;
pub mod chords;

pub use autokey::{AutoKey, ChordRun};
pub use chords::{ChordDefinition, ChordTable, STANDARD_TUNING};
