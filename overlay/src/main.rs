//! Headless celebration demo
//!
//! Run with: cargo run -p pulse-overlay -- [options]
//!
//! Drives one habit to completion through the poll reducer, runs the
//! resulting celebration on a pixmap at a simulated 60 Hz, and writes every
//! Nth frame as a PNG.
//!
//!   --out DIR      output directory (default: pulse-frames)
//!   --width W      logical width (default: 800)
//!   --height H     logical height (default: 600)
//!   --scale S      device pixel ratio (default: 1.0)
//!   --every N      save every Nth frame (default: 30)
//!   --seed N       particle RNG seed (default: 7)
//!   --audio        play the completion cue on the default output device

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::Utc;
use pulse_core::celebration::CelebrationSignal;
use pulse_core::{AudioCuePlayer, CueSynthesizer, HabitBook, HabitSource, Orchestrator, PollState, Viewport};
use pulse_overlay::PixmapFactory;
use pulse_types::formatting::{format_duration_ms, format_progress};
use rand::SeedableRng;
use rand::rngs::StdRng;

const FRAME: Duration = Duration::from_micros(16_667);

struct DemoArgs {
    out: PathBuf,
    viewport: Viewport,
    every: u64,
    seed: u64,
    audio: bool,
}

impl DemoArgs {
    fn parse() -> Result<Self, String> {
        let mut args = Self {
            out: PathBuf::from("pulse-frames"),
            viewport: Viewport::new(800.0, 600.0, 1.0),
            every: 30,
            seed: 7,
            audio: false,
        };

        let mut iter = env::args().skip(1);
        while let Some(flag) = iter.next() {
            if flag == "--audio" {
                args.audio = true;
                continue;
            }
            let value = iter.next().ok_or_else(|| format!("missing value for {flag}"))?;
            match flag.as_str() {
                "--out" => args.out = PathBuf::from(&value),
                "--width" => args.viewport.width = parse_value(&flag, &value)?,
                "--height" => args.viewport.height = parse_value(&flag, &value)?,
                "--scale" => args.viewport.scale = parse_value(&flag, &value)?,
                "--every" => args.every = parse_value::<u64>(&flag, &value)?.max(1),
                "--seed" => args.seed = parse_value(&flag, &value)?,
                other => return Err(format!("unknown option {other}")),
            }
        }

        args.viewport = args.viewport.validate().map_err(|e| e.to_string())?;
        Ok(args)
    }
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}

fn main() {
    let _log_guard = pulse_overlay::logging::init_logging(tracing::Level::INFO);

    let args = match DemoArgs::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    if let Err(e) = std::fs::create_dir_all(&args.out) {
        tracing::error!(dir = %args.out.display(), error = %e, "Cannot create output directory");
        std::process::exit(1);
    }

    let config = pulse_core::config::load();
    let player = if args.audio {
        AudioCuePlayer::spawn(&config.audio)
    } else {
        AudioCuePlayer::silent()
    };
    let mut orchestrator = Orchestrator::with_rng(
        PixmapFactory::new(args.viewport),
        player,
        &config.celebration,
        StdRng::seed_from_u64(args.seed),
    );

    // Drive one habit from zero to its target, polling after every check
    let mut book = HabitBook::new(&config.habits);
    let Ok(habit) = book.add("Demo habit", Some(3)) else {
        return;
    };
    let (mut state, _) = PollState::new().advance(&book.fetch(), Utc::now());
    let mut events = Vec::new();
    while events.is_empty() {
        let Ok(record) = book.check(habit.id) else {
            return;
        };
        let progress = record.progress.unwrap_or_default();
        let target = record.target.unwrap_or_default();
        println!("{}: {}", record.name, format_progress(progress, target));

        let (next, found) = state.advance(&book.fetch(), Utc::now());
        state = next;
        events = found;
    }

    let start = Instant::now();
    let mut signals = orchestrator.handle_events(events, start);
    let mut frame = 0u64;
    let mut saved = 0usize;

    loop {
        for signal in signals.drain(..) {
            match signal {
                CelebrationSignal::Toast(message) => println!("{message}"),
                CelebrationSignal::Show { name, .. } => tracing::info!(%name, "Overlay shown"),
                CelebrationSignal::Hide { habit_id } => tracing::info!(habit_id, "Overlay hidden"),
            }
        }
        if !orchestrator.is_active() {
            break;
        }

        let now = start + FRAME * (frame as u32 + 1);
        signals = orchestrator.on_frame(now);
        frame += 1;

        if frame % args.every != 0 {
            continue;
        }
        if let Some(surface) = orchestrator.particle_run().and_then(|run| run.surface()) {
            let path = args.out.join(format!("frame-{frame:04}.png"));
            match surface.save_png(&path) {
                Ok(()) => {
                    saved += 1;
                    tracing::debug!(path = %path.display(), painted = surface.painted_pixels(), "Frame saved");
                }
                Err(e) => tracing::warn!(error = %e, "Frame not saved"),
            }
        }
    }

    println!(
        "{} frames over {}, {} saved to {}",
        frame,
        format_duration_ms(config.celebration.duration_ms),
        saved,
        args.out.display()
    );

    if args.audio {
        // Let the cue ring out before the process exits
        std::thread::sleep(Duration::from_secs_f32(CueSynthesizer::celebration().duration_secs() + 0.1));
    }
}
