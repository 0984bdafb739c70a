//! The render step.
//!
//! [`GuitarEngine`] runs on the audio thread. Each output sample it:
//!
//! ```text
//!   drain intake messages ── Strum ──> PluckScheduler ──> TriggerQueue
//!          │                 Mute  ──> clear queue, choke bank, reset tone,
//!          │                           start choke transient
//!          v
//!   fire due triggers ──> StringBank (6 × Karplus-Strong)
//!          v
//!   ToneShaper ──> + choke transient ──> OutputMixer ──> sample
//! ```
//!
//! Nothing in here allocates or blocks once constructed.

pub mod scheduler;
pub mod stats;

#[cfg(feature = "rtrb")]
pub mod handle;

use std::sync::Arc;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, RingBuffer};

#[cfg(feature = "rtrb")]
pub use self::handle::{EngineHandle, SubmitError};
pub use self::{
    scheduler::{PluckScheduler, PluckTrigger, QueueFull, Scheduled, TriggerQueue},
    stats::{EngineStats, MasterVolume, StatsSnapshot},
};
use crate::{
    config::EngineConfig,
    dsp::{ChokeHandler, Noise, OutputMixer, ToneShaper},
    synth::{
        message::{MessageReceiver, SynthMessage},
        StringBank,
    },
};
#[cfg(feature = "rtrb")]
use crate::{
    config::ConfigError,
    sequencing::{AutoKey, ChordTable},
};

pub struct GuitarEngine<R> {
    rx: R,
    bank: StringBank,
    scheduler: PluckScheduler,
    triggers: TriggerQueue,
    tone: ToneShaper,
    choke: ChokeHandler,
    mixer: OutputMixer,
    noise: Noise,
    volume: Arc<MasterVolume>,
    stats: Arc<EngineStats>,
    frame_counter: u64,
}

impl<R: MessageReceiver> GuitarEngine<R> {
    pub fn new(
        config: &EngineConfig,
        rx: R,
        volume: Arc<MasterVolume>,
        stats: Arc<EngineStats>,
    ) -> Self {
        Self {
            rx,
            bank: StringBank::new(config),
            scheduler: PluckScheduler::from_config(config),
            triggers: TriggerQueue::new(config.max_queued_plucks),
            tone: ToneShaper::new(
                config.lp_tone_alpha,
                config.presence_mix,
                config.body_alpha,
                config.body_mix,
            ),
            choke: ChokeHandler::new(
                config.choke_length_samples(),
                config.choke_amplitude,
                config.choke_decay,
            ),
            mixer: OutputMixer::new(config.output_gain),
            noise: Noise::new(config.noise_seed),
            volume,
            stats,
            frame_counter: 0,
        }
    }

    /// Apply one message at the current tick.
    pub fn handle_message(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::Strum {
                direction,
                notes,
                velocity,
            } => {
                let result = self.scheduler.schedule(
                    direction,
                    &notes,
                    velocity,
                    self.frame_counter,
                    &mut self.triggers,
                );
                if result.dropped > 0 {
                    self.stats.record_dropped_triggers(result.dropped);
                }
            }
            SynthMessage::Mute => {
                let cancelled = self.triggers.clear();
                self.bank.choke_all();
                self.tone.reset();
                self.choke.trigger();
                self.stats.record_choke(cancelled);
            }
        }
    }

    /// Produce one output sample and advance the clock by one tick.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        while let Some(message) = self.rx.pop() {
            self.handle_message(message);
        }

        let now = self.frame_counter;
        let Self {
            bank,
            triggers,
            noise,
            ..
        } = self;
        let fired = triggers.fire_due(now, |t| {
            bank.pluck(t.string, t.note, t.velocity, now, noise);
        });
        if fired > 0 {
            self.stats.record_plucks(fired);
        }

        let shaped = self.tone.process(self.bank.next_sample());
        let choke = self.choke.next_sample(&mut self.noise);
        let out = self.mixer.mix(shaped, choke, self.volume.get());

        self.frame_counter += 1;
        out
    }

    /// Fill `out` with consecutive samples.
    pub fn render_block(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Current tick (samples rendered so far).
    pub fn now(&self) -> u64 {
        self.frame_counter
    }

    pub fn bank(&self) -> &StringBank {
        &self.bank
    }

    pub fn triggers(&self) -> &TriggerQueue {
        &self.triggers
    }

    pub fn scheduler(&self) -> &PluckScheduler {
        &self.scheduler
    }

    pub fn choke(&self) -> &ChokeHandler {
        &self.choke
    }

    pub fn tone(&self) -> &ToneShaper {
        &self.tone
    }

    pub fn volume(&self) -> &Arc<MasterVolume> {
        &self.volume
    }

    pub fn stats(&self) -> &Arc<EngineStats> {
        &self.stats
    }
}

/// Engine fed through an `rtrb` ring, as built by [`engine_pair`].
#[cfg(feature = "rtrb")]
pub type RingEngine = GuitarEngine<Consumer<SynthMessage>>;

/// Validate `config` and build a connected intake handle and render engine.
#[cfg(feature = "rtrb")]
pub fn engine_pair(config: EngineConfig) -> Result<(EngineHandle, RingEngine), ConfigError> {
    let chords = ChordTable::standard();
    config.validate(&chords)?;

    let (tx, rx) = RingBuffer::new(config.command_queue_capacity);
    let volume = Arc::new(MasterVolume::default());
    let stats = Arc::new(EngineStats::default());

    let engine = GuitarEngine::new(&config, rx, Arc::clone(&volume), Arc::clone(&stats));
    let autokey = AutoKey::new(config.autokey_sequence);
    let handle = EngineHandle::new(tx, chords, autokey, volume, stats);
    Ok((handle, engine))
}
