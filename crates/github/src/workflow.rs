//! Workflow commands and step outputs.
//!
//! Commands (`::error::`, `::add-mask::`) are lines on stdout that the runner
//! interprets. Step outputs are appended to the file named by `GITHUB_OUTPUT`.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::ActionError;

const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";

/// Output: id of the queued build or created release.
pub const RUN_ID_OUTPUT: &str = "pipeline-run-id";
/// Output: web link to the queued build or created release.
pub const RUN_URL_OUTPUT: &str = "pipeline-url";

/// Writes workflow commands to `W` and step outputs to the output file.
pub struct WorkflowCommands<W: Write> {
    out: W,
    output_file: Option<PathBuf>,
}

impl WorkflowCommands<io::Stdout> {
    /// Commands on stdout; outputs to `$GITHUB_OUTPUT` when it is set.
    pub fn from_env() -> Self {
        let output_file = std::env::var_os(OUTPUT_FILE_VAR).map(PathBuf::from);
        Self::new(io::stdout(), output_file)
    }
}

impl<W: Write> WorkflowCommands<W> {
    /// Commands on `out`; outputs to `output_file` when given.
    pub fn new(out: W, output_file: Option<PathBuf>) -> Self {
        Self { out, output_file }
    }

    /// Marks the step as failed with `message`.
    pub fn set_failed(&mut self, message: &str) -> Result<(), ActionError> {
        self.command("error", message)
    }

    /// Masks `secret` in all subsequent log output.
    pub fn add_mask(&mut self, secret: &str) -> Result<(), ActionError> {
        self.command("add-mask", secret)
    }

    /// Sets a step output.
    ///
    /// Without an output file (outside a runner) the value is only logged.
    pub fn set_output(&mut self, name: &str, value: &str) -> Result<(), ActionError> {
        let Some(path) = &self.output_file else {
            debug!(name, value, "No output file; skipping step output");
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if value.contains('\n') {
            let delimiter = heredoc_delimiter(value);
            writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")?;
        } else {
            writeln!(file, "{name}={value}")?;
        }
        Ok(())
    }

    fn command(&mut self, command: &str, message: &str) -> Result<(), ActionError> {
        writeln!(self.out, "::{command}::{}", escape_data(message))?;
        self.out.flush()?;
        Ok(())
    }

    /// Consumes the writer, returning the command sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Escapes command data so a multi-line message stays one command.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn heredoc_delimiter(value: &str) -> String {
    let mut delimiter = String::from("ghadelimiter");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}
