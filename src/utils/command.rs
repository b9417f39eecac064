//! Command execution primitives with consistent error handling.

use std::path::Path;
use std::process::{Command, Output};

use serde::Serialize;

use crate::error::{Error, Result};

/// Captured output from command execution.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedOutput {
    pub exit_code: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    fn from_output(output: &Output) -> Self {
        Self {
            // Killed by a signal: no code, report as generic failure.
            exit_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Run a command to completion, capturing its output whatever the exit code.
///
/// The command runs in `cwd`. Only a failure to spawn is an error.
pub fn capture(program: &str, args: &[String], cwd: &Path, context: &str) -> Result<CapturedOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| {
            Error::internal_io(
                format!("Failed to run {}: {}", program, e),
                Some(context.to_string()),
            )
        })?;

    Ok(CapturedOutput::from_output(&output))
}

/// Extract error text from captured output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &CapturedOutput) -> String {
    if !output.stderr.trim().is_empty() {
        output.stderr.trim().to_string()
    } else {
        output.stdout.trim().to_string()
    }
}

/// Render a program and its arguments as a copy-pasteable command line.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(quote_arg)
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    const SHELL_META: &[char] = &[
        ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}',
        '<', '>', '|', '&', ';', '#', '~',
    ];

    if !arg.contains(SHELL_META) {
        return arg.to_string();
    }

    format!("'{}'", arg.replace('\'', "'\\''"))
}
