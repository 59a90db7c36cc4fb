//! Interrupt-aware execution of external commands for checks.

use std::{
    io::{self, Read},
    process::{Command, ExitStatus, Stdio},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};

use super::{error::Interrupted, interrupt::Interrupt};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of an external command.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Stdout followed by stderr, trimmed; what a check shows the user.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.trim_end().to_string();
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(stderr);
        }
        out
    }
}

/// Run `command` to completion, killing it if `interrupt` trips first.
///
/// Returns an error wrapping [`Interrupted`] on cancellation and the raw
/// `io::Error` (kind `NotFound` for a missing program) if spawning fails.
pub fn run_command(mut command: Command, interrupt: &Interrupt) -> Result<CommandOutput> {
    let program = command.get_program().to_string_lossy().into_owned();

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain pipes on helper threads so a chatty child can't fill the buffer
    // and block while we poll.
    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    let status = loop {
        if interrupt.is_triggered() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(Interrupted.into());
        }
        match child
            .try_wait()
            .with_context(|| format!("Failed to wait for `{}`", program))?
        {
            Some(status) => break status,
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    Ok(CommandOutput {
        status,
        stdout: join_reader(stdout),
        stderr: join_reader(stderr),
    })
}

fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    })
}

fn join_reader(handle: Option<thread::JoinHandle<io::Result<String>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .and_then(|r| r.ok())
        .unwrap_or_default()
}

/// True if `err` came from spawning a program that doesn't exist.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
