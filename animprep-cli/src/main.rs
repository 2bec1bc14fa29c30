//! animprep CLI Tool
//!
//! Command-line interface for the animation asset converters. Input and output
//! paths are fixed; run the tool from the asset directory.

use animprep_sprite::SpriteConfig;
use animprep_timeline::TimelineConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "animprep")]
#[command(about = "Offline converters for animation assets: SVG frame sprites and playback timelines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge frames/frame_*.svg into sprite.svg, one group per frame
    Sprite,

    /// Compress the frame-index log input.txt into the timeline literal output.txt
    Timeline,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sprite => build_sprite(SpriteConfig::default())?,
        Commands::Timeline => compress_timeline(TimelineConfig::default())?,
    }

    Ok(())
}

fn build_sprite(config: SpriteConfig) -> Result<()> {
    println!("Building sprite from {}", config.input_dir.display());

    let summary = animprep_sprite::run(&config).with_context(|| {
        format!(
            "Failed to build sprite from {}",
            config.input_dir.display()
        )
    })?;

    println!(
        "✔ Sprite written to {} ({} frames, viewBox \"{}\")",
        summary.output.display(),
        summary.frame_count,
        summary.view_box
    );

    Ok(())
}

fn compress_timeline(config: TimelineConfig) -> Result<()> {
    let summary = animprep_timeline::run(&config)
        .with_context(|| format!("Failed to compress timeline {}", config.input.display()))?;

    println!("✔ Timeline written to {}", summary.output.display());
    println!("✔ {} compressed segments generated", summary.segment_count);

    Ok(())
}
