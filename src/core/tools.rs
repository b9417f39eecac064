//! External SVG optimizer and linter.
//!
//! Both are plain subprocesses configured in [`crate::defaults::ToolConfig`].
//! The optimizer must succeed; the linter's verdict is reported, not raised.

use std::path::Path;

use serde::Serialize;

use crate::defaults::{self, ToolConfig};
use crate::error::{Error, Result, ToolCommandFailedDetails};
use crate::utils::command::{self, CapturedOutput};
use crate::utils::template::{self, TemplateVars};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    pub passed: bool,
    /// Command line to re-run the linter by hand.
    pub command: String,
    #[serde(flatten)]
    pub output: CapturedOutput,
}

fn program_path(root: &Path, program: &str) -> String {
    // Bare names are looked up on PATH; anything path-like is repo-relative.
    if program.contains('/') || program.contains('\\') || program.starts_with('~') {
        defaults::resolve(root, program).display().to_string()
    } else {
        program.to_string()
    }
}

/// Run the optimizer on `input` and return the optimized SVG markup.
pub fn optimize(tool: &ToolConfig, root: &Path, input: &Path, precision: u8) -> Result<String> {
    let program = program_path(root, &tool.program);
    let input_str = input.display().to_string();
    let precision_str = precision.to_string();
    let args = template::render_args(
        &tool.args,
        &[
            (TemplateVars::INPUT, &input_str),
            (TemplateVars::FILE, &input_str),
            (TemplateVars::PRECISION, &precision_str),
        ],
    );

    let output = command::capture(&program, &args, root, "run optimizer")
        .map_err(|e| e.with_hint("Install the optimizer (npm install) or set \"optimizer\" in create-si.json"))?;

    if !output.success() || output.stdout.trim().is_empty() {
        return Err(Error::tool_command_failed(ToolCommandFailedDetails {
            tool: "optimizer".to_string(),
            command: command::display_command(&program, &args),
            exit_code: Some(output.exit_code),
            stderr: command::error_text(&output),
        }));
    }

    Ok(output.stdout)
}

/// Lint the written icon file.
///
/// A linter that cannot be started counts as a failed lint.
pub fn lint(tool: &ToolConfig, root: &Path, file: &Path) -> LintReport {
    let program = program_path(root, &tool.program);
    let file_str = file.display().to_string();
    let args = template::render_args(
        &tool.args,
        &[
            (TemplateVars::FILE, &file_str),
            (TemplateVars::INPUT, &file_str),
        ],
    );
    let command_line = command::display_command(&program, &args);

    let output = command::capture(&program, &args, root, "run linter").unwrap_or_else(|err| {
        CapturedOutput {
            exit_code: 1,
            stdout: String::new(),
            stderr: err.details["error"]
                .as_str()
                .map(str::to_string)
                .unwrap_or(err.message),
        }
    });

    LintReport {
        passed: output.success(),
        command: command_line,
        output,
    }
}
