//! Sneak headless runner
//!
//! Plays a scripted session at the target frame rate on a synthetic
//! monotonic clock and prints the outcome as JSON. Rendering and live input
//! live outside this crate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use log::LevelFilter;
use serde::Serialize;

use sneak::Settings;
use sneak::sim::{SessionPhase, SessionState, Snapshot, TickInput, tick};

/// Canned input patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Script {
    /// Stand still
    Idle,
    /// Hold forward the whole time
    Walk,
    /// Walk while turning in a slow circle
    Spin,
    /// Run west along the southern path
    Dash,
}

impl Script {
    fn input(self, tick_index: u64) -> TickInput {
        match self {
            Script::Idle => TickInput::default(),
            Script::Walk => TickInput {
                move_forward: true,
                ..Default::default()
            },
            Script::Spin => TickInput {
                move_forward: true,
                turn_left: tick_index % 4 == 0,
                ..Default::default()
            },
            Script::Dash => TickInput {
                move_forward: true,
                run: true,
                ..Default::default()
            },
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Sneak headless runner", long_about = None)]
struct Args {
    /// Seed for the bush scatter (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Maximum number of playing ticks
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Input pattern to play
    #[arg(long, value_enum, default_value_t = Script::Walk)]
    script: Script,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report {
    outcome: SessionPhase,
    ticks_played: u64,
    guards_down: usize,
    snapshot: Snapshot,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    // Only fails if a logger is already installed
    let _ = Builder::from_env(env).try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    log::info!("Sneak (headless) starting...");

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.bush_seed = seed;
    }

    let fps = u64::from(settings.fps);
    let mut state = SessionState::new(settings).context("building session")?;

    // Dismiss the start screen
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        0,
    );

    for i in 0..args.ticks {
        let now_ms = (i + 1) * 1000 / fps;
        tick(&mut state, &args.script.input(i), now_ms);
        if state.phase.is_terminal() {
            break;
        }
    }

    match state.phase {
        SessionPhase::Detected => log::info!("YOU HAVE BEEN DETECTED!"),
        SessionPhase::GoalReached => log::info!("YOU HAVE FOUND THE KING!"),
        _ => log::info!("Out of ticks after {}", state.time_ticks),
    }

    let report = Report {
        outcome: state.phase,
        ticks_played: state.time_ticks,
        guards_down: state.guards.iter().filter(|g| g.is_body()).count(),
        snapshot: state.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
