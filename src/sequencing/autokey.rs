//! AutoKey - pre-authored chord progression playback.
//!
//! When the controller asks for the `AUTOKEY` chord, the sequencer hands out
//! the next chord of the progression instead of a manually selected one.
//! Repeats are fully expanded at construction; one trigger = one entry.

/// A run of one chord repeated `count` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordRun {
    pub chord: &'static str,
    pub count: usize,
}

const fn run(chord: &'static str, count: usize) -> ChordRun {
    ChordRun { chord, count }
}

/// Verse loop, played nine times at the top of the song.
const VERSE: &[ChordRun] = &[run("Em", 3), run("Cmaj7", 7), run("G", 7), run("D", 3)];
const VERSE_REPEATS: usize = 9;

const TURNAROUND: &[ChordRun] = &[run("Em", 3), run("Cmaj7", 7), run("Dsus4", 7), run("D", 3)];

const PRE_CHORUS: &[ChordRun] = &[run("G", 10), run("Em", 10), run("C", 5), run("D", 5)];

const CHORUS: &[ChordRun] = &[
    run("G", 10),
    run("B7", 10),
    run("Em", 10),
    run("C", 10),
    run("Dsus4", 7),
    run("D", 3),
];

const BRIDGE: &[ChordRun] = &[run("G", 10), run("Em", 10)];

const OUTRO: &[ChordRun] = &[
    run("C", 5),
    run("D", 5),
    run("G", 10),
    run("B7", 10),
    run("Em", 10),
    run("C", 10),
    run("Dsus4", 7),
    run("D", 3),
    run("G", 10),
];

/// Expand the authored song into a flat list of chord names.
pub fn default_progression() -> Vec<String> {
    let mut sections: Vec<&[ChordRun]> = vec![VERSE; VERSE_REPEATS];
    sections.extend([TURNAROUND, PRE_CHORUS, CHORUS, BRIDGE, OUTRO]);
    expand(sections.into_iter().flatten())
}

/// Expand chord runs into one entry per trigger.
pub fn expand<'a>(runs: impl IntoIterator<Item = &'a ChordRun>) -> Vec<String> {
    runs.into_iter()
        .flat_map(|r| std::iter::repeat(r.chord.to_string()).take(r.count))
        .collect()
}

/// Position in the progression plus the on/off mode flag.
#[derive(Debug, Clone)]
pub struct AutoKey {
    sequence: Vec<String>,
    index: usize,
    enabled: bool,
}

impl AutoKey {
    /// Create a sequencer over `sequence`. Starts disabled at index 0.
    pub fn new(sequence: Vec<String>) -> Self {
        Self {
            sequence,
            index: 0,
            enabled: false,
        }
    }

    /// Yield the chord at the current index and advance, wrapping at the end.
    /// Also switches autoplay on.
    pub fn next_chord(&mut self) -> Option<&str> {
        if self.sequence.is_empty() {
            return None;
        }
        self.enabled = true;
        let current = self.index;
        self.index = (self.index + 1) % self.sequence.len();
        Some(&self.sequence[current])
    }

    /// Chord the next trigger will yield.
    pub fn peek(&self) -> Option<&str> {
        self.sequence.get(self.index).map(String::as_str)
    }

    /// Manual chord input preempts autoplay. The index is kept so that
    /// re-enabling resumes where the progression left off.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }
}

impl Default for AutoKey {
    fn default() -> Self {
        Self::new(default_progression())
    }
}
