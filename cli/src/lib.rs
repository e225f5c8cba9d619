//! The `pulse` shell
//!
//! A small REPL around the habit book. Completions detected on each poll
//! drive a headless celebration and the audio cue; toasts go to stdout.

pub mod app;
pub mod commands;
pub mod repl;
