//! Live playback: stdin intake thread feeding a cpal output stream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use tracing::{debug, error, info};

use airstrum::{
    engine_pair,
    io::{CommandSource, LineCommandSource},
    EngineConfig, MAX_BLOCK_SIZE,
};

pub fn run(config: EngineConfig) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = stream_config.sample_rate().0;
    let channels = stream_config.channels() as usize;

    // The engine runs at the device rate; delay lengths and stagger follow.
    let (mut handle, mut engine) = engine_pair(config.with_sample_rate(sample_rate))
        .wrap_err("invalid engine config")?;

    info!(sample_rate, channels, "output device ready");

    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &stream_config.into(),
        move |data: &mut [f32], _| {
            for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                let frames = chunk.len() / channels;
                let block = &mut render_buf[..frames];
                engine.render_block(block);

                // Mono to all channels
                for (frame, &s) in chunk.chunks_mut(channels).zip(block.iter()) {
                    frame.fill(s);
                }
            }
        },
        |err| error!("audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    info!("playing; send chord|gesture|velocity[|volume] lines, EOF to stop");

    let stdin = std::io::stdin();
    let mut source = LineCommandSource::new(stdin.lock());
    while let Some(command) = source.next_command() {
        match handle.submit(&command) {
            Ok(message) => debug!(?message, "submitted"),
            Err(err) => debug!("command rejected: {}", err),
        }
        handle.report_overflows();
    }

    let stats = handle.report_overflows();
    info!(
        plucks = stats.plucks,
        chokes = stats.chokes,
        rejected_lines = source.rejected(),
        "input closed"
    );
    Ok(())
}
