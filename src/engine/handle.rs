//! Intake side of the engine.
//!
//! The handle owns everything that may allocate or look things up by name:
//! the chord table, the AutoKey progression and the producer end of the
//! message ring. It resolves a [`Command`] to a `Copy` [`SynthMessage`]
//! before anything crosses to the render step.

use std::sync::Arc;

use rtrb::Producer;
use tracing::{debug, warn};

use super::stats::{EngineStats, MasterVolume, StatsSnapshot};
use crate::{
    io::command::{Command, Gesture, AUTOKEY_CHORD},
    sequencing::{AutoKey, ChordTable},
    synth::message::{StrumDirection, SynthMessage},
};

/// Errors returned by [`EngineHandle::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Strum named a chord the chord table does not have
    UnknownChord(String),
    /// Intake ring is full; the render step is not keeping up
    QueueFull,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::UnknownChord(name) => write!(f, "unknown chord {:?}", name),
            SubmitError::QueueFull => write!(f, "engine message queue is full"),
        }
    }
}

impl std::error::Error for SubmitError {}

pub struct EngineHandle {
    tx: Producer<SynthMessage>,
    chords: ChordTable,
    autokey: AutoKey,
    volume: Arc<MasterVolume>,
    stats: Arc<EngineStats>,
    last_seen: StatsSnapshot,
}

impl EngineHandle {
    pub fn new(
        tx: Producer<SynthMessage>,
        chords: ChordTable,
        autokey: AutoKey,
        volume: Arc<MasterVolume>,
        stats: Arc<EngineStats>,
    ) -> Self {
        Self {
            tx,
            chords,
            autokey,
            volume,
            stats,
            last_seen: StatsSnapshot::default(),
        }
    }

    /// Apply one controller command.
    ///
    /// Volume is applied first and always, even if the gesture is then
    /// rejected. A mute is accepted whatever the chord field says.
    pub fn submit(&mut self, command: &Command) -> Result<SynthMessage, SubmitError> {
        self.volume.set_percent(command.volume());

        let mut autoplay = false;
        let message = match command.gesture {
            Gesture::Mute => SynthMessage::Mute,
            Gesture::StrumDown | Gesture::StrumUp => {
                let direction = if command.gesture == Gesture::StrumDown {
                    StrumDirection::Down
                } else {
                    StrumDirection::Up
                };

                autoplay = command.is_autokey();
                let name = if autoplay {
                    self.autokey
                        .peek()
                        .ok_or_else(|| SubmitError::UnknownChord(AUTOKEY_CHORD.to_string()))?
                } else {
                    self.autokey.disable();
                    command.chord.as_str()
                };

                let Some(chord) = self.chords.get(name) else {
                    warn!(chord = name, "strum ignored: unknown chord");
                    return Err(SubmitError::UnknownChord(name.to_string()));
                };

                debug!(
                    chord = chord.name,
                    ?direction,
                    velocity = command.velocity(),
                    "strum"
                );
                SynthMessage::Strum {
                    direction,
                    notes: chord.notes(),
                    velocity: command.velocity(),
                }
            }
        };

        if self.tx.push(message).is_err() {
            self.stats.record_dropped_message();
            warn!("engine message queue full, dropping {:?}", command.gesture);
            return Err(SubmitError::QueueFull);
        }
        // Only a strum that reached the engine uses up a progression entry
        if autoplay {
            self.autokey.next_chord();
        }
        Ok(message)
    }

    /// Log any trigger or message drops since the last call.
    pub fn report_overflows(&mut self) -> StatsSnapshot {
        let now = self.stats.snapshot();
        let dropped = now.dropped_triggers - self.last_seen.dropped_triggers;
        if dropped > 0 {
            warn!(dropped, "pluck queue overflow, newest triggers dropped");
        }
        let messages = now.dropped_messages - self.last_seen.dropped_messages;
        if messages > 0 {
            warn!(messages, "intake ring overflow");
        }
        self.last_seen = now;
        now
    }

    pub fn autokey(&self) -> &AutoKey {
        &self.autokey
    }

    pub fn autokey_mut(&mut self) -> &mut AutoKey {
        &mut self.autokey
    }

    pub fn chords(&self) -> &ChordTable {
        &self.chords
    }

    pub fn volume(&self) -> &Arc<MasterVolume> {
        &self.volume
    }

    pub fn stats(&self) -> &Arc<EngineStats> {
        &self.stats
    }
}
