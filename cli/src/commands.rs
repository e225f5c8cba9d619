//! Shell command handlers
//!
//! Each handler returns the text to print. Errors come back as user-facing
//! strings; nothing here is fatal to the shell.

use std::path::Path;

use pulse_core::config;
use pulse_types::HabitRecord;
use pulse_types::formatting::{format_bar, format_duration_ms, format_pct_ratio, format_progress};

use crate::app::App;

const BAR_WIDTH: usize = 20;

fn describe(record: &HabitRecord) -> String {
    let progress = record.progress.unwrap_or_default();
    let target = record.target.unwrap_or_default();
    format!(
        "{:>3}  {:<24} {} {:>4}  {}",
        record.id,
        record.name,
        format_bar(progress, target, BAR_WIDTH),
        format_pct_ratio(progress, target),
        format_progress(progress, target),
    )
}

pub fn add(app: &mut App, name: &str, target: Option<u32>) -> Result<String, String> {
    let record = app.book_mut().add(name, target).map_err(|e| e.to_string())?;
    Ok(format!("added {}", describe(&record).trim_start()))
}

pub fn check(app: &mut App, id: u64) -> Result<String, String> {
    let record = app.book_mut().check(id).map_err(|e| e.to_string())?;
    Ok(describe(&record))
}

pub fn reset(app: &mut App, id: u64) -> Result<String, String> {
    let record = app.book_mut().reset(id).map_err(|e| e.to_string())?;
    Ok(describe(&record))
}

pub fn delete(app: &mut App, id: u64) -> Result<String, String> {
    app.book_mut().delete(id).map_err(|e| e.to_string())?;
    Ok(format!("deleted habit {id}"))
}

pub fn list(app: &App) -> String {
    let records = app.book().list();
    if records.is_empty() {
        return "no habits yet, try `add <name>`".to_string();
    }
    records.iter().map(describe).collect::<Vec<_>>().join("\n")
}

pub fn show_config(app: &App) -> String {
    let cfg = app.config();
    let path = config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| format!("<unavailable: {e}>"));

    let mut lines = vec![format!("config file: {path}")];
    lines.push(format!(
        "celebration: {} particles, gravity {}, {}",
        cfg.celebration.particle_count,
        cfg.celebration.gravity,
        format_duration_ms(cfg.celebration.duration_ms)
    ));
    lines.push(format!(
        "audio: {}, volume {}, {} Hz",
        if cfg.audio.enabled { "on" } else { "off" },
        cfg.audio.volume,
        cfg.audio.sample_rate
    ));
    lines.push(format!("poll: every {}", format_duration_ms(cfg.poll.interval_ms)));
    lines.push(format!("habits: default target {}", cfg.habits.default_target));
    lines.join("\n")
}

/// Write the live celebration frame to a PNG
pub fn snapshot(app: &App, path: &Path) -> Result<String, String> {
    let surface = app
        .orchestrator()
        .particle_run()
        .and_then(|run| run.surface())
        .ok_or("no celebration running")?;
    surface.save_png(path).map_err(|e| e.to_string())?;
    Ok(format!("saved {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::AudioCuePlayer;
    use pulse_types::PulseConfig;

    fn app() -> App {
        App::new(PulseConfig::default(), AudioCuePlayer::silent())
    }

    #[test]
    fn test_add_and_list() {
        let mut app = app();
        let out = add(&mut app, "Read", Some(4)).unwrap();
        assert!(out.starts_with("added 1"));
        assert!(out.contains("0 / 4 days"));

        let listing = list(&app);
        assert!(listing.contains("Read"));
        assert!(listing.contains("0%"));
    }

    #[test]
    fn test_empty_list_hint() {
        assert!(list(&app()).contains("no habits yet"));
    }

    #[test]
    fn test_check_reports_progress() {
        let mut app = app();
        add(&mut app, "Read", Some(2)).unwrap();
        let out = check(&mut app, 1).unwrap();
        assert!(out.contains("1 / 2 days"));
        assert!(out.contains("50%"));
    }

    #[test]
    fn test_unknown_id_errors() {
        let mut app = app();
        assert_eq!(check(&mut app, 7).unwrap_err(), "habit 7 not found");
        assert_eq!(reset(&mut app, 7).unwrap_err(), "habit 7 not found");
        assert_eq!(delete(&mut app, 7).unwrap_err(), "habit 7 not found");
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut app = app();
        assert_eq!(
            add(&mut app, "  ", None).unwrap_err(),
            "habit name must not be empty"
        );
    }

    #[test]
    fn test_delete_removes_from_list() {
        let mut app = app();
        add(&mut app, "Read", None).unwrap();
        assert_eq!(delete(&mut app, 1).unwrap(), "deleted habit 1");
        assert!(list(&app).contains("no habits yet"));
    }

    #[test]
    fn test_snapshot_requires_live_celebration() {
        let app = app();
        let err = snapshot(&app, Path::new("unused.png")).unwrap_err();
        assert_eq!(err, "no celebration running");
    }

    #[test]
    fn test_show_config_lists_sections() {
        let out = show_config(&app());
        assert!(out.contains("80 particles"));
        assert!(out.contains("3.80s"));
        assert!(out.contains("default target 30"));
    }
}
