use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use pulse_cli::app::App;
use pulse_cli::{commands, repl};
use pulse_core::AudioCuePlayer;
use pulse_core::celebration::CelebrationSignal;
use tokio::time::{MissedTickBehavior, interval};

/// Display refresh for the frame driver (~60 Hz)
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let _log_guard = pulse_overlay::logging::init_logging(tracing::Level::WARN);

    let config = pulse_core::config::load();
    let player = AudioCuePlayer::spawn(&config.audio);
    let poll_every = Duration::from_millis(config.poll.interval_ms);
    let mut app = App::new(config, player);

    let mut frames = interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut polls = interval(poll_every);
    polls.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let (mut lines, prompt) = repl::spawn_reader();

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    prompt.ready();
                    continue;
                }

                let quit = match respond(line, &mut app) {
                    Ok(quit) => quit,
                    Err(err) => {
                        writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                        false
                    }
                };
                print_signals(app.poll(Instant::now()));
                std::io::stdout().flush().map_err(|e| e.to_string())?;
                if quit {
                    break;
                }
                prompt.ready();
            }
            _ = frames.tick() => {
                print_signals(app.frame(Instant::now()));
            }
            _ = polls.tick() => {
                print_signals(app.poll(Instant::now()));
            }
        }
    }

    print_signals(app.shutdown());
    Ok(())
}

fn print_signals(signals: Vec<CelebrationSignal>) {
    for signal in signals {
        match signal {
            CelebrationSignal::Toast(message) => println!("{message}"),
            CelebrationSignal::Show { habit_id, name } => {
                tracing::info!(habit_id, %name, "Celebration overlay shown");
            }
            CelebrationSignal::Hide { habit_id } => {
                tracing::info!(habit_id, "Celebration overlay hidden");
            }
        }
    }
}

#[derive(Parser)]
#[command(version, about = "pulse habit shell")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a habit
    Add {
        name: String,
        #[arg(short, long)]
        target: Option<u32>,
    },
    /// Mark one more day
    Check { id: u64 },
    /// Back to zero progress
    Reset { id: u64 },
    Delete { id: u64 },
    List,
    Config,
    /// Save the live celebration frame as PNG
    Snapshot {
        #[arg(short, long)]
        path: PathBuf,
    },
    Exit,
}

fn respond(line: &str, app: &mut App) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "pulse".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let output = match &cli.command {
        Some(Commands::Add { name, target }) => commands::add(app, name, *target)?,
        Some(Commands::Check { id }) => commands::check(app, *id)?,
        Some(Commands::Reset { id }) => commands::reset(app, *id)?,
        Some(Commands::Delete { id }) => commands::delete(app, *id)?,
        Some(Commands::List) => commands::list(app),
        Some(Commands::Config) => commands::show_config(app),
        Some(Commands::Snapshot { path }) => commands::snapshot(app, path)?,
        Some(Commands::Exit) => {
            println!("quitting...");
            return Ok(true);
        }
        None => return Ok(false),
    };
    println!("{output}");
    Ok(false)
}
