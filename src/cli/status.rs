/// Status side-channel: progress and outcome messages on stderr.
///
/// Reporters never touch stdout, which carries raw command results only.
use std::io::{IsTerminal, Write};

use crate::exec::CommandError;
use crate::types::ErrorOutput;

/// Progress indicator driven by the command executor.
pub trait StatusReporter {
    /// An invocation has started.
    fn start(&mut self, label: &str);
    /// The result was persisted; `message` references the destination.
    fn succeed(&mut self, message: &str);
    /// The invocation failed; the error's message is shown verbatim.
    fn fail(&mut self, error: &CommandError);
}

/// Spinner-style reporter with `✔` / `✖` marks.
///
/// The start label is only drawn on an interactive stream and is cleared
/// again before the final mark (or on drop when no mark follows).
pub struct Spinner<W: Write> {
    out: W,
    interactive: bool,
    pending: bool,
}

impl Spinner<std::io::Stderr> {
    /// Spinner on stderr, animated only when stderr is a TTY.
    #[must_use]
    pub fn stderr() -> Self {
        let err = std::io::stderr();
        let interactive = err.is_terminal();
        Self::new(err, interactive)
    }
}

impl<W: Write> Spinner<W> {
    #[must_use]
    pub fn new(out: W, interactive: bool) -> Self {
        Self {
            out,
            interactive,
            pending: false,
        }
    }

    fn clear_pending(&mut self) {
        if self.pending {
            let _ = write!(self.out, "\r\x1b[2K");
            self.pending = false;
        }
    }

    fn finish(&mut self, mark: &str, message: &str) {
        self.clear_pending();
        let _ = writeln!(self.out, "{mark} {message}");
        let _ = self.out.flush();
    }
}

impl<W: Write> StatusReporter for Spinner<W> {
    fn start(&mut self, label: &str) {
        if self.interactive {
            let _ = write!(self.out, "- {label}");
            let _ = self.out.flush();
            self.pending = true;
        }
    }

    fn succeed(&mut self, message: &str) {
        self.finish("✔", message);
    }

    fn fail(&mut self, error: &CommandError) {
        self.finish("✖", &error.to_string());
    }
}

impl<W: Write> Drop for Spinner<W> {
    fn drop(&mut self) {
        self.clear_pending();
        let _ = self.out.flush();
    }
}

/// Reporter for `--json`: failures become a JSON envelope, successes a
/// `{"ok":true,...}` line.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> StatusReporter for JsonReporter<W> {
    fn start(&mut self, _label: &str) {}

    fn succeed(&mut self, message: &str) {
        let line = serde_json::json!({ "ok": true, "message": message });
        let _ = writeln!(self.out, "{line}");
    }

    fn fail(&mut self, error: &CommandError) {
        let envelope = ErrorOutput::from_command_error(error);
        let s = serde_json::to_string_pretty(&envelope).unwrap_or_default();
        let _ = writeln!(self.out, "{s}");
    }
}

/// Reporter for `--quiet`: failures are still printed, nothing else is.
pub struct QuietReporter<W: Write> {
    out: W,
}

impl<W: Write> QuietReporter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> StatusReporter for QuietReporter<W> {
    fn start(&mut self, _label: &str) {}

    fn succeed(&mut self, _message: &str) {}

    fn fail(&mut self, error: &CommandError) {
        let _ = writeln!(self.out, "Error: {error}");
    }
}

/// Build the reporter selected by the global flags.
#[must_use]
pub fn reporter_for(json: bool, quiet: bool) -> Box<dyn StatusReporter> {
    if json {
        Box::new(JsonReporter::new(std::io::stderr()))
    } else if quiet {
        Box::new(QuietReporter::new(std::io::stderr()))
    } else {
        Box::new(Spinner::stderr())
    }
}

/// One recorded reporter call.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Start(String),
    Succeed(String),
    Fail(String),
}

/// Reporter that records every call, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<StatusEvent>,
}

#[cfg(test)]
impl StatusReporter for RecordingReporter {
    fn start(&mut self, label: &str) {
        self.events.push(StatusEvent::Start(label.to_owned()));
    }

    fn succeed(&mut self, message: &str) {
        self.events.push(StatusEvent::Succeed(message.to_owned()));
    }

    fn fail(&mut self, error: &CommandError) {
        self.events.push(StatusEvent::Fail(error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_non_interactive_prints_marks_only() {
        let mut buf = Vec::new();
        {
            let mut spinner = Spinner::new(&mut buf, false);
            spinner.start("Loading the schema...");
            spinner.succeed("The schema was saved in out.graphql");
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "✔ The schema was saved in out.graphql\n"
        );
    }

    #[test]
    fn test_spinner_interactive_clears_label() {
        let mut buf = Vec::new();
        {
            let mut spinner = Spinner::new(&mut buf, true);
            spinner.start("Loading");
            spinner.fail(&CommandError::MalformedInput("bad".to_owned()));
        }
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("- Loading\r\x1b[2K"));
        assert!(s.ends_with("✖ bad\n"));
    }

    #[test]
    fn test_spinner_drop_clears_unfinished_label() {
        let mut buf = Vec::new();
        {
            let mut spinner = Spinner::new(&mut buf, true);
            spinner.start("Loading");
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "- Loading\r\x1b[2K");
    }

    #[test]
    fn test_json_reporter_envelope() {
        let mut buf = Vec::new();
        JsonReporter::new(&mut buf).fail(&CommandError::WriteFailure("denied".to_owned()));
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["ok"], false);
        assert_eq!(v["error"]["code"], "write_failure");
        assert_eq!(v["error"]["message"], "denied");
    }

    #[test]
    fn test_quiet_reporter_keeps_failures() {
        let mut buf = Vec::new();
        {
            let mut quiet = QuietReporter::new(&mut buf);
            quiet.start("x");
            quiet.succeed("saved");
            quiet.fail(&CommandError::MissingInput("nothing to read"));
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "Error: nothing to read\n");
    }
}
