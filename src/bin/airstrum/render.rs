//! Offline bounce of a timed command script.
//!
//! ```text
//! # ms    chord|gesture|velocity[|volume]
//! 0       Em|STRUM_DOWN|110|80
//! 250     Em|STRUM_UP|70
//! 500     AUTOKEY|STRUM_DOWN|120
//! 900     -|MUTE|0
//! ```

use std::path::Path;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{info, warn};

use airstrum::{engine_pair, io::wire, Command, EngineConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    pub at_ms: f32,
    pub command: Command,
}

/// Parse a script. Blank lines and `#` comments are skipped; events are
/// returned in time order (ties keep file order).
pub fn parse_script(text: &str) -> EyreResult<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (time, rest) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| eyre!("line {}: expected `<ms> <command>`", number + 1))?;
        let at_ms = time
            .parse::<f32>()
            .wrap_err_with(|| format!("line {}: bad time {:?}", number + 1, time))?;
        if !at_ms.is_finite() || at_ms < 0.0 {
            return Err(eyre!("line {}: time must be a non-negative number", number + 1));
        }
        let command =
            wire::parse_line(rest).wrap_err_with(|| format!("line {}", number + 1))?;
        events.push(ScriptEvent { at_ms, command });
    }
    events.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
    Ok(events)
}

pub fn run(config: EngineConfig, script: &Path, output: &Path, tail_ms: f32) -> EyreResult<()> {
    let text = std::fs::read_to_string(script)
        .wrap_err_with(|| format!("failed to read script {}", script.display()))?;
    let events = parse_script(&text)?;

    let sample_rate = config.sample_rate;
    let to_tick = |ms: f32| config.ms_to_samples(ms).round() as u64;
    let end_ms = events.last().map_or(0.0, |e| e.at_ms) + tail_ms.max(0.0);
    let total = to_tick(end_ms);
    let ticks: Vec<u64> = events.iter().map(|e| to_tick(e.at_ms)).collect();

    let (mut handle, mut engine) = engine_pair(config).wrap_err("invalid engine config")?;

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(output, spec)
        .wrap_err_with(|| format!("failed to create {}", output.display()))?;

    info!(
        events = events.len(),
        seconds = end_ms / 1000.0,
        sample_rate,
        "rendering"
    );

    let mut next = 0;
    for tick in 0..total {
        while next < events.len() && ticks[next] <= tick {
            if let Err(err) = handle.submit(&events[next].command) {
                warn!(at_ms = events[next].at_ms, "command rejected: {}", err);
            }
            next += 1;
        }
        writer.write_sample(engine.next_sample())?;
    }
    writer.finalize()?;

    let stats = handle.report_overflows();
    info!(
        plucks = stats.plucks,
        chokes = stats.chokes,
        dropped = stats.dropped_triggers,
        "wrote {}",
        output.display()
    );
    Ok(())
}
