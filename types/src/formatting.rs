//! Centralized message and progress formatting.
//!
//! All user-facing strings about habits go through this module so the shell,
//! the overlay demo and the notification collaborator agree on wording.

use crate::habit::percentage;

/// Toast text handed to the notification collaborator when a habit completes.
///
/// # Examples
/// ```
/// use pulse_types::formatting::celebration_message;
/// assert_eq!(celebration_message("Read"), "🎉 Read complete!");
/// ```
pub fn celebration_message(name: &str) -> String {
    format!("🎉 {} complete!", name)
}

/// Format progress against target as `P / T days`.
///
/// # Examples
/// ```
/// use pulse_types::formatting::format_progress;
/// assert_eq!(format_progress(3, 30), "3 / 30 days");
/// assert_eq!(format_progress(1, 1), "1 / 1 day");
/// ```
pub fn format_progress(progress: u32, target: u32) -> String {
    let unit = if target == 1 { "day" } else { "days" };
    format!("{} / {} {}", progress, target, unit)
}

/// Format progress as a whole percentage, capped at 100.
///
/// # Examples
/// ```
/// use pulse_types::formatting::format_pct_ratio;
/// assert_eq!(format_pct_ratio(3, 10), "30%");
/// assert_eq!(format_pct_ratio(12, 10), "100%");
/// assert_eq!(format_pct_ratio(0, 0), "0%");
/// ```
pub fn format_pct_ratio(progress: u32, target: u32) -> String {
    format!("{}%", percentage(progress, target))
}

/// Render a fixed-width text progress bar, e.g. `[####------]`.
///
/// # Examples
/// ```
/// use pulse_types::formatting::format_bar;
/// assert_eq!(format_bar(5, 10, 10), "[#####-----]");
/// assert_eq!(format_bar(0, 0, 4), "[----]");
/// ```
pub fn format_bar(progress: u32, target: u32, width: usize) -> String {
    let filled = (percentage(progress, target) as usize * width) / 100;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

/// Format a duration in milliseconds as `S.ss s`.
///
/// # Examples
/// ```
/// use pulse_types::formatting::format_duration_ms;
/// assert_eq!(format_duration_ms(3_800), "3.80s");
/// assert_eq!(format_duration_ms(0), "0.00s");
/// ```
pub fn format_duration_ms(ms: u64) -> String {
    format!("{:.2}s", ms as f64 / 1_000.0)
}
