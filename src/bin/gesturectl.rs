//! gesturectl - pinch gestures to system volume and display brightness
//!
//! This binary:
//! 1. Loads configuration (file, environment, command line)
//! 2. Opens the landmark source and builds the actuators
//! 3. Runs the frame loop until Ctrl-C or end of stream
//! 4. Prints a run summary

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gesture_control::{
    build_controls, source, ActuatorBackend, ControlDispatcher, FrameOrchestrator, GestureConfig,
    JsonLinesSink, LogSink, OverlaySink, RunOptions,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (JSON, or TOML with a .toml extension).
    #[arg(long, env = "GESTURE_CONFIG")]
    config: Option<PathBuf>,
    /// Landmark source: stub://NAME, exec://, -, or a JSON Lines file.
    #[arg(long)]
    source: Option<String>,
    /// Treat the view as unmirrored (raw side labels are used as-is).
    #[arg(long)]
    no_mirror: bool,
    /// Actuator backend (auto|macos|linux|custom|dry-run).
    #[arg(long, value_name = "BACKEND")]
    actuators: Option<String>,
    /// Overlay output (log|json).
    #[arg(long, default_value = "log", value_name = "MODE")]
    overlay: String,
    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = GestureConfig::load_from(args.config.as_deref())?;
    if let Some(uri) = args.source {
        cfg.source.uri = uri;
    }
    if args.no_mirror {
        cfg.mirror_view = false;
    }
    if let Some(backend) = args.actuators.as_deref() {
        cfg.actuators.backend = backend.parse::<ActuatorBackend>()?;
    }

    let mut sink: Box<dyn OverlaySink> = match args.overlay.as_str() {
        "log" => Box::new(LogSink),
        "json" => Box::new(JsonLinesSink::new(std::io::stdout().lock())),
        other => return Err(anyhow!("unknown overlay mode '{}' (expected log|json)", other)),
    };

    let (volume, brightness) = build_controls(&cfg.actuators)?;
    let mut orchestrator = FrameOrchestrator::new(
        cfg.mapper,
        cfg.mirror_view,
        ControlDispatcher::new(volume, brightness),
    );

    let mut landmarks = source::open(&cfg.source, cfg.mirror_view)?;

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        handler_stop.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow!("failed to install Ctrl-C handler: {}", e))?;

    let options = RunOptions {
        max_frames: args.max_frames,
        health_interval: cfg.health_interval,
    };
    let stats = orchestrator.run(&mut landmarks, &mut sink, &stop, &options)?;

    // Release the capability (and its helper process) before reporting.
    drop(landmarks);
    eprintln!(
        "gesturectl: {} frames, {} hands, {} actuations ({} failed), {} unresolved",
        stats.frames,
        stats.detections,
        stats.actuations_ok + stats.actuations_failed,
        stats.actuations_failed,
        stats.unknown
    );
    Ok(())
}
