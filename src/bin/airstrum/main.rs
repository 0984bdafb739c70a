//! airstrum - air guitar strum engine
//!
//! Run with: cargo run -- play        (wire lines on stdin)
//!           cargo run -- render song.txt -o song.wav

mod play;
mod render;

use std::path::PathBuf;

use airstrum::EngineConfig;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing::Level;

#[derive(Parser)]
#[command(name = "airstrum")]
#[command(about = "Karplus-Strong strum engine for a motion controlled air guitar")]
#[command(version)]
struct Cli {
    /// TOML file overriding engine constants
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log every accepted command
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play live on the default output device, reading `chord|gesture|velocity[|volume]` lines from stdin
    Play,

    /// Render a timed script (`<ms> <wire line>` per line) to a WAV file
    Render {
        script: PathBuf,

        #[arg(short, long, default_value = "airstrum.wav")]
        output: PathBuf,

        /// Audio kept after the last command (ms)
        #[arg(long, default_value_t = 2000.0)]
        tail_ms: f32,

        /// Override the configured sample rate
        #[arg(long)]
        sample_rate: Option<u32>,
    },
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Play => play::run(config),
        Commands::Render {
            script,
            output,
            tail_ms,
            sample_rate,
        } => {
            let config = match sample_rate {
                Some(rate) => config.with_sample_rate(rate),
                None => config,
            };
            render::run(config, &script, &output, tail_ms)
        }
    }
}
