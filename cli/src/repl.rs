//! Line input for the shell
//!
//! Stdin is blocking, so lines are read on their own thread and handed to the
//! async loop over a channel. The frame driver keeps ticking while the prompt
//! waits.

use std::io::{self, BufRead, Write};
use std::sync::mpsc as std_mpsc;
use std::thread;

use tokio::sync::mpsc;

pub const PROMPT: &str = "pulse> ";

/// Print the prompt and read one line. `Ok(None)` on end of input.
pub fn readline() -> Result<Option<String>, String> {
    let mut out = io::stdout();
    write!(out, "{PROMPT}").map_err(|e| e.to_string())?;
    out.flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

/// Lets the reader print the next prompt once a line has been handled
#[derive(Debug, Clone)]
pub struct PromptHandle(std_mpsc::Sender<()>);

impl PromptHandle {
    pub fn ready(&self) {
        let _ = self.0.send(());
    }
}

/// Forward stdin lines until end of input or until the receiver is dropped.
///
/// After each line the reader waits for [`PromptHandle::ready`] so command
/// output is printed before the next prompt.
pub fn spawn_reader() -> (mpsc::Receiver<String>, PromptHandle) {
    let (tx, rx) = mpsc::channel(8);
    let (ready_tx, ready_rx) = std_mpsc::channel();

    let spawned = thread::Builder::new()
        .name("pulse-stdin".to_string())
        .spawn(move || {
            loop {
                match readline() {
                    Ok(Some(line)) => {
                        if tx.blocking_send(line).is_err() || ready_rx.recv().is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read input");
                        break;
                    }
                }
            }
        });

    if let Err(e) = spawned {
        tracing::error!(error = %e, "Failed to start input thread");
    }
    (rx, PromptHandle(ready_tx))
}
