//! BVPlayer entry point

use anyhow::Result;
use bvplayer::player::{NullBackend, PlayerController, PlayerEvent};
use bvplayer::utils::config::Config;
use bvplayer::window::PlayerShell;
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bvplayer")]
#[command(about = "A borderless media player shell", long_about = None)]
struct Args {
    /// Media files to queue on startup
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Start in fullscreen mode
    #[arg(short, long)]
    fullscreen: bool,

    /// Initial volume (0.0 to 1.0)
    #[arg(short, long)]
    volume: Option<f32>,

    /// Window width
    #[arg(long)]
    width: Option<u32>,

    /// Window height
    #[arg(long)]
    height: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().unwrap_or_else(|err| {
        eprintln!("config error: {}, using defaults", err);
        Config::default()
    });

    // CLI flags override the config file
    if args.fullscreen {
        config.window.fullscreen = true;
    }
    if let Some(volume) = args.volume {
        config.playback.volume = volume.clamp(0.0, 1.0);
    }
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    config.validate()?;

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        config
            .general
            .log_level
            .parse()
            .unwrap_or(LevelFilter::Info)
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .init();

    info!("BVPlayer starting");

    let mut controller =
        PlayerController::new(Box::new(NullBackend::new()), config.playback.clone())?;
    controller.add_listener(Box::new(|event| match event {
        PlayerEvent::TrackChanged { index } => info!("track changed: {}", index),
        PlayerEvent::EndOfMedia => info!("end of media"),
        PlayerEvent::Error { message } => log::error!("player error: {}", message),
        _ => {}
    }));

    let shell = PlayerShell::new(config.window.clone(), controller, args.files);
    shell.run()?;

    info!("BVPlayer exited");
    Ok(())
}
