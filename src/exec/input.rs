/// Input resolution: piped stdin wins over the positional argument.
use std::io::{IsTerminal, Read};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::errors::CommandError;

/// How long to wait for redirected stdin to reach end-of-file.
pub const STDIN_WINDOW: Duration = Duration::from_millis(250);

/// The two places a command input can come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSources {
    /// Trimmed content of redirected stdin, if any, or the error reading it.
    pub piped: Result<Option<String>, CommandError>,
    /// The command's positional argument, if given.
    pub positional: Option<String>,
}

impl Default for InputSources {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl InputSources {
    #[must_use]
    pub fn new(piped: Option<String>, positional: Option<String>) -> Self {
        Self {
            piped: Ok(piped),
            positional,
        }
    }

    /// Resolve the effective input value.
    ///
    /// # Errors
    ///
    /// Returns the stdin read error if reading the pipe failed, or
    /// `CommandError::MissingInput` carrying `missing` when neither source
    /// is present.
    pub fn resolve(&self, missing: &'static str) -> Result<String, CommandError> {
        let piped = self.piped.clone()?;
        resolve(piped.as_deref(), self.positional.as_deref(), missing)
    }
}

/// Pick piped input over the positional argument.
///
/// # Errors
///
/// Returns `CommandError::MissingInput` when both are absent.
pub fn resolve(
    piped: Option<&str>,
    positional: Option<&str>,
    missing: &'static str,
) -> Result<String, CommandError> {
    match (piped, positional) {
        (Some(piped), _) => Ok(piped.to_owned()),
        (None, Some(arg)) => Ok(arg.to_owned()),
        (None, None) => Err(CommandError::MissingInput(missing)),
    }
}

/// Read redirected stdin, once per process.
///
/// Returns `None` when stdin is a terminal, carries only whitespace, or does
/// not reach end-of-file within [`STDIN_WINDOW`].
///
/// # Errors
///
/// - `CommandError::MalformedInput` if stdin is not valid UTF-8
/// - `CommandError::ReadFailure` for any other I/O error
pub fn read_piped_stdin() -> Result<Option<String>, CommandError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    read_within(stdin, STDIN_WINDOW)
}

/// Read `reader` to end on a worker thread, giving up after `window`.
///
/// An abandoned worker stays blocked until the process exits.
///
/// # Errors
///
/// Same as [`read_piped_stdin`].
pub fn read_within<R>(mut reader: R, window: Duration) -> Result<Option<String>, CommandError>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = reader.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });

    match rx.recv_timeout(window) {
        Ok(Ok(bytes)) => match String::from_utf8(bytes) {
            Ok(text) => Ok(non_empty(&text)),
            Err(_) => Err(CommandError::MalformedInput(
                "stream did not contain valid UTF-8".to_owned(),
            )),
        },
        Ok(Err(err)) => Err(CommandError::ReadFailure(err.to_string())),
        Err(RecvTimeoutError::Timeout) => {
            debug!(window = ?window, "stdin still open, ignoring it");
            Ok(None)
        }
        Err(RecvTimeoutError::Disconnected) => Ok(None),
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Instant;

    use super::*;

    const MISSING: &str = "pass it either as an argument or via stdin";

    /// A pipe whose writer never writes nor closes.
    struct Stalled;

    impl Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            thread::sleep(Duration::from_secs(3600));
            Ok(0)
        }
    }

    #[test]
    fn test_piped_wins_over_argument() {
        let got = resolve(Some("piped.json"), Some("arg.json"), MISSING).unwrap();
        assert_eq!(got, "piped.json");
    }

    #[test]
    fn test_argument_used_without_pipe() {
        let got = resolve(None, Some("arg.json"), MISSING).unwrap();
        assert_eq!(got, "arg.json");
    }

    #[test]
    fn test_missing_both() {
        let err = resolve(None, None, MISSING).unwrap_err();
        assert_eq!(err, CommandError::MissingInput(MISSING));
        assert!(err.to_string().contains("argument or via stdin"));
    }

    #[test]
    fn test_sources_struct_delegates() {
        let sources = InputSources::new(Some("a".to_owned()), None);
        assert_eq!(sources.resolve(MISSING).unwrap(), "a");
        assert!(InputSources::default().resolve(MISSING).is_err());
    }

    #[test]
    fn test_pipe_error_wins_over_argument() {
        let sources = InputSources {
            piped: Err(CommandError::MalformedInput("bad bytes".to_owned())),
            positional: Some("arg.json".to_owned()),
        };
        assert_eq!(
            sources.resolve(MISSING),
            Err(CommandError::MalformedInput("bad bytes".to_owned()))
        );
    }

    #[test]
    fn test_whitespace_only_stdin_is_absent() {
        assert_eq!(non_empty("  \n\t"), None);
        assert_eq!(non_empty(" path.json\n"), Some("path.json".to_owned()));
    }

    #[test]
    fn test_read_within_returns_content() {
        let got = read_within(Cursor::new(b" def.json\n".to_vec()), STDIN_WINDOW).unwrap();
        assert_eq!(got, Some("def.json".to_owned()));
    }

    #[test]
    fn test_read_within_gives_up_on_open_pipe() {
        let started = Instant::now();
        let got = read_within(Stalled, Duration::from_millis(50)).unwrap();
        assert_eq!(got, None);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_read_within_rejects_invalid_utf8() {
        let err = read_within(Cursor::new(vec![0xff, 0xfe, 0x00]), STDIN_WINDOW).unwrap_err();
        assert_eq!(
            err,
            CommandError::MalformedInput("stream did not contain valid UTF-8".to_owned())
        );
    }
}
