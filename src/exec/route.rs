/// Output routing: a formatted payload goes to exactly one target.
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::errors::CommandError;

/// Where a command result is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Persist to a file; a success status referencing the path follows.
    File(PathBuf),
    /// Raw payload on stdout, no status wrapper.
    Stdout,
}

impl OutputTarget {
    /// Build from the optional `--output` argument.
    #[must_use]
    pub fn from_arg(path: Option<&Path>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_path_buf()))
    }

    /// Whether this target is a file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// What `route` did with the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Saved(PathBuf),
    Printed,
}

/// Deliver `payload` to `target`.
///
/// The payload is written byte-for-byte to either target, so formatting
/// never depends on where the result goes. Parent directories are not
/// created.
///
/// # Errors
///
/// Returns `CommandError::WriteFailure` with the I/O error text verbatim.
pub fn route(
    payload: &str,
    target: &OutputTarget,
    stdout: &mut dyn Write,
) -> Result<Routed, CommandError> {
    match target {
        OutputTarget::File(path) => {
            debug!(path = %path.display(), bytes = payload.len(), "writing output file");
            std::fs::write(path, payload).map_err(write_failure)?;
            Ok(Routed::Saved(path.clone()))
        }
        OutputTarget::Stdout => {
            debug!(bytes = payload.len(), "writing output to stdout");
            stdout
                .write_all(payload.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(write_failure)?;
            Ok(Routed::Printed)
        }
    }
}

fn write_failure(err: std::io::Error) -> CommandError {
    CommandError::WriteFailure(err.to_string())
}
