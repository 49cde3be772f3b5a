use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use beatmarch::autoplay::Autoplayer;
use beatmarch::config::SessionConfig;
use beatmarch::session::{RhythmSession, SessionEvent};
use beatmarch::state::GameState;
use beatmarch::traits::{
    ButtonPress, ChannelInput, FrameTimer, LogAudio, LogMovement, LogPresentation,
    MockTimeProvider, SystemTimeProvider, TimeProvider,
};
use beatmarch::util::logging::init_logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartMode {
    Freeplay,
    Simon,
}

#[derive(Parser, Debug)]
#[command(name = "beatmarch", about = "Headless rhythm session driven by an autoplayer")]
struct Args {
    /// Path to session config JSON file.
    #[arg(long, default_value = "beatmarch.json")]
    config: PathBuf,

    /// Simulated play time in seconds.
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,

    /// Seed for pattern draws and autoplay skips.
    #[arg(long, env = "BEATMARCH_SEED")]
    seed: Option<u64>,

    /// Override the configured tempo.
    #[arg(long)]
    bpm: Option<f64>,

    /// Override the configured start mode.
    #[arg(long, value_enum)]
    mode: Option<StartMode>,

    /// Chance the autoplayer answers a beat.
    #[arg(long, default_value_t = 0.95)]
    accuracy: f64,

    /// Simulated frame length in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u32,

    /// Length of the area to cross.
    #[arg(long, default_value_t = 40.0)]
    area_length: f64,

    /// Pace frames against the wall clock instead of simulated time.
    #[arg(long)]
    realtime: bool,

    /// Write the effective config to this path and exit.
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Debug logging for this crate.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let mut config = SessionConfig::load_from(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(bpm) = args.bpm {
        config.rhythm.bpm = bpm;
    }
    if let Some(seed) = args.seed {
        config.rhythm.seed = Some(seed);
    }
    if let Some(mode) = args.mode {
        config.rhythm.start_state = match mode {
            StartMode::Freeplay => GameState::Freeplay,
            StartMode::Simon => GameState::SimonTeach,
        };
    }
    if let Some(path) = &args.dump_config {
        config.save_to(path)?;
        log::info!("wrote config to {}", path.display());
        return Ok(());
    }

    let catalog = config.catalog()?;
    let mut session = RhythmSession::new(
        config.rhythm.clone(),
        catalog,
        LogPresentation,
        LogAudio,
        LogMovement::new(args.area_length),
    )?;
    let mut player =
        Autoplayer::new(config.rhythm.seed.unwrap_or_default()).with_accuracy(args.accuracy);

    let frame_us = i64::from(args.frame_ms.max(1)) * 1000;
    let end_us = (args.seconds.max(0.0) * 1_000_000.0) as i64;
    if args.realtime {
        let timer = FrameTimer::new(SystemTimeProvider::new());
        let frame = Duration::from_micros(frame_us as u64);
        simulate(&mut session, &mut player, timer, end_us, || thread::sleep(frame));
    } else {
        let time = MockTimeProvider::new();
        let timer = FrameTimer::new(time.clone());
        simulate(&mut session, &mut player, timer, end_us, || time.advance(frame_us));
    }

    let stats = session.stats();
    let combo = session.combo();
    println!(
        "beats {} | score {} | perfect {} great {} okay {} miss {} ({} dropped) | accuracy {:.1}%",
        session.beats_fired(),
        combo.player_score(),
        stats.perfect_count,
        stats.great_count,
        stats.okay_count,
        stats.misses,
        stats.dropped_beats,
        stats.accuracy()
    );
    println!(
        "commands {} | patterns cleared {} | best streak {} | max combo {} | position {:.2}",
        stats.commands_performed,
        stats.simon_patterns_cleared,
        combo.highest_note_streak(),
        combo.max_combo_count(),
        session.movement().position()
    );
    Ok(())
}

type HeadlessSession = RhythmSession<LogPresentation, LogAudio, LogMovement>;

// Autoplay presses go through the input channel, so each one is judged on
// the frame after the beat it answers.
fn simulate<T: TimeProvider>(
    session: &mut HeadlessSession,
    player: &mut Autoplayer,
    mut timer: FrameTimer<T>,
    end_us: i64,
    mut wait_frame: impl FnMut(),
) {
    let (sender, mut input) = ChannelInput::new();
    while timer.now_us() < end_us {
        wait_frame();
        let dt_us = timer.delta_us();
        let events = session.tick(dt_us, &mut input);
        if let Some(button) = player.respond(session, &events) {
            sender.press(ButtonPress::new(button, timer.now_us()));
        }
        if events.contains(&SessionEvent::AreaComplete) {
            log::info!("area crossed after {:.1}s", timer.now_us() as f64 / 1e6);
            break;
        }
    }
}
