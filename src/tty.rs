//! Terminal I/O utilities for CLI.
//!
//! Provides TTY detection and user prompting.

use std::io::{self, BufRead, IsTerminal, Write};

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn is_stderr_tty() -> bool {
    io::stderr().is_terminal()
}

/// Prompts are written to stderr so stdout stays a clean JSON stream.
pub fn can_prompt() -> bool {
    is_stdin_tty() && is_stderr_tty()
}

/// Prompt on stderr and read one line. `None` means stdin is closed.
pub fn prompt(message: &str) -> create_si::Result<Option<String>> {
    eprint!("{}", message);
    io::stderr().flush().ok();

    read_answer(&mut io::stdin().lock())
}

fn read_answer<R: BufRead>(reader: &mut R) -> create_si::Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(|e| {
        create_si::Error::internal_io(
            format!("Failed to read input: {}", e),
            Some("read prompt".to_string()),
        )
    })?;

    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt with a default shown in brackets; empty input accepts it.
pub fn prompt_with_default(message: &str, default: &str) -> create_si::Result<Option<String>> {
    let answer = prompt(&format!("{} [{}]: ", message, default))?;
    Ok(answer.map(|answer| {
        if answer.is_empty() {
            default.to_string()
        } else {
            answer
        }
    }))
}

/// Yes/no question; anything but y/yes (including end of input) is no.
pub fn confirm(message: &str) -> create_si::Result<bool> {
    let answer = prompt(&format!("{} [y/N]: ", message))?;
    Ok(matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("y" | "yes")
    ))
}

/// Print status message to stderr if running in a terminal.
pub fn status(message: &str) {
    if is_stderr_tty() {
        eprintln!("{}", message);
    }
}

// log_status! macro is defined in lib.rs (#[macro_export]) and available crate-wide.
