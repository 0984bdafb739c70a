/*
Chord Table
===========

Every chord is stored as a guitar voicing: one fret number per string over
standard tuning. String 0 is the low E, string 5 the high E.

    string   open   MIDI
      0       E2     40
      1       A2     45
      2       D3     50
      3       G3     55
      4       B3     59
      5       E4     64

All six strings sound on every voicing. Shapes that normally leave the low
strings unplayed (C, D, Dm, ...) put a chord tone there instead, so a strum
always excites the full string bank.

The index order matches the instrument's chord numbering (0:C ... 24:Cmaj7).
*/

use std::collections::HashMap;

use crate::NUM_STRINGS;

/// Open string pitches (MIDI) in standard tuning, low to high.
pub const STANDARD_TUNING: [u8; NUM_STRINGS] = [40, 45, 50, 55, 59, 64];

/// Six per-string fret offsets for one chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordDefinition {
    pub name: &'static str,
    pub frets: [u8; NUM_STRINGS],
}

impl ChordDefinition {
    pub const fn new(name: &'static str, frets: [u8; NUM_STRINGS]) -> Self {
        Self { name, frets }
    }

    /// MIDI note for one string.
    pub fn note(&self, string: usize) -> u8 {
        STANDARD_TUNING[string] + self.frets[string]
    }

    /// MIDI notes for all strings, low to high.
    pub fn notes(&self) -> [u8; NUM_STRINGS] {
        std::array::from_fn(|string| self.note(string))
    }
}

const CHORDS: [ChordDefinition; 25] = [
    ChordDefinition::new("C", [0, 3, 2, 0, 1, 0]),
    ChordDefinition::new("G", [3, 2, 0, 0, 0, 3]),
    ChordDefinition::new("D", [2, 0, 0, 2, 3, 2]),
    ChordDefinition::new("A", [0, 0, 2, 2, 2, 0]),
    ChordDefinition::new("E", [0, 2, 2, 1, 0, 0]),
    ChordDefinition::new("F", [1, 3, 3, 2, 1, 1]),
    ChordDefinition::new("C7", [0, 3, 2, 3, 1, 0]),
    ChordDefinition::new("G7", [3, 2, 0, 0, 0, 1]),
    ChordDefinition::new("D7", [2, 0, 0, 2, 1, 2]),
    ChordDefinition::new("A7", [0, 0, 2, 0, 2, 0]),
    ChordDefinition::new("E7", [0, 2, 0, 1, 0, 0]),
    ChordDefinition::new("B7", [2, 2, 1, 2, 0, 2]),
    ChordDefinition::new("Am", [0, 0, 2, 2, 1, 0]),
    ChordDefinition::new("Em", [0, 2, 2, 0, 0, 0]),
    ChordDefinition::new("Dm", [1, 0, 0, 2, 3, 1]),
    ChordDefinition::new("Bm", [2, 2, 4, 4, 3, 2]),
    ChordDefinition::new("F#m", [2, 4, 4, 2, 2, 2]),
    ChordDefinition::new("Gm", [3, 5, 5, 3, 3, 3]),
    ChordDefinition::new("Dsus4", [3, 0, 0, 2, 3, 3]),
    ChordDefinition::new("Gsus4", [3, 3, 0, 0, 1, 3]),
    ChordDefinition::new("Asus4", [0, 0, 2, 2, 3, 0]),
    ChordDefinition::new("Esus4", [0, 2, 2, 2, 0, 0]),
    ChordDefinition::new("Bdim", [1, 2, 3, 4, 3, 1]),
    ChordDefinition::new("F#dim", [2, 3, 4, 2, 1, 2]),
    ChordDefinition::new("Cmaj7", [0, 3, 2, 0, 0, 0]),
];

/// Immutable chord lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct ChordTable {
    chords: Vec<ChordDefinition>,
    by_name: HashMap<&'static str, usize>,
}

impl ChordTable {
    pub fn new(chords: Vec<ChordDefinition>) -> Self {
        let by_name = chords
            .iter()
            .enumerate()
            .map(|(index, chord)| (chord.name, index))
            .collect();
        Self { chords, by_name }
    }

    /// The instrument's 25 built-in voicings.
    pub fn standard() -> Self {
        Self::new(CHORDS.to_vec())
    }

    pub fn get(&self, name: &str) -> Option<&ChordDefinition> {
        self.index_of(name).map(|index| &self.chords[index])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn by_index(&self, index: usize) -> Option<&ChordDefinition> {
        self.chords.get(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChordDefinition> {
        self.chords.iter()
    }
}

impl Default for ChordTable {
    fn default() -> Self {
        Self::standard()
    }
}
