/// Command executor: resolve input, invoke once, route the result.
///
/// Phases run `Idle -> Resolving -> Invoking -> Routing -> Done`, and any of
/// the three middle phases can drop into `Failed`. Each terminal phase has
/// produced exactly one user-visible signal: a failure status, a success
/// status for a file target, or the raw payload on stdout.
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::errors::CommandError;
use super::input::InputSources;
use super::route::{OutputTarget, Routed, route};
use crate::cli::StatusReporter;

/// One external capability behind a command.
pub trait Operation {
    /// Value produced by the capability.
    type Output;

    /// Status label shown while the command runs.
    fn label(&self) -> &'static str;

    /// Message reported when no input source is present. Names both sources.
    fn missing_input(&self) -> &'static str;

    /// Call the capability with the resolved input. Called at most once.
    ///
    /// # Errors
    ///
    /// Returns any read, parse, or capability failure with its text intact.
    fn invoke(&self, input: &str) -> Result<Self::Output, CommandError>;

    /// Format the output. Formatting options are applied here, before the
    /// target is known, so the bytes are the same for file and stdout.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the value cannot be serialized.
    fn format(&self, output: &Self::Output) -> Result<String, CommandError>;

    /// Success status for a file target.
    fn saved_message(&self, path: &Path) -> String {
        format!("The output was saved in {}", path.display())
    }
}

/// Executor phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Resolving,
    Invoking,
    Routing,
    Done,
    Failed,
}

/// Drives a single invocation and reports its outcome.
pub struct Executor<'a> {
    reporter: &'a mut dyn StatusReporter,
    stdout: &'a mut dyn Write,
    phase: Phase,
}

impl<'a> Executor<'a> {
    #[must_use]
    pub fn new(reporter: &'a mut dyn StatusReporter, stdout: &'a mut dyn Write) -> Self {
        Self {
            reporter,
            stdout,
            phase: Phase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run `op` against `sources`, delivering to `target`.
    ///
    /// # Errors
    ///
    /// Returns the error that moved the executor into `Phase::Failed`. It has
    /// already been reported through the status reporter.
    pub fn run<O: Operation>(
        &mut self,
        op: &O,
        sources: &InputSources,
        target: &OutputTarget,
    ) -> Result<Routed, CommandError> {
        self.reporter.start(op.label());
        let outcome = self.drive(op, sources, target);
        match &outcome {
            Ok(Routed::Saved(path)) => {
                self.reporter.succeed(&op.saved_message(path));
                self.enter(Phase::Done);
            }
            Ok(Routed::Printed) => self.enter(Phase::Done),
            Err(err) => {
                debug!(code = err.code(), from = ?self.phase, "command failed");
                self.reporter.fail(err);
                self.enter(Phase::Failed);
            }
        }
        outcome
    }

    fn drive<O: Operation>(
        &mut self,
        op: &O,
        sources: &InputSources,
        target: &OutputTarget,
    ) -> Result<Routed, CommandError> {
        self.enter(Phase::Resolving);
        let input = sources.resolve(op.missing_input())?;

        self.enter(Phase::Invoking);
        let output = op.invoke(&input)?;
        let payload = op.format(&output)?;

        self.enter(Phase::Routing);
        route(&payload, target, &mut *self.stdout)
    }

    fn enter(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "executor transition");
        self.phase = next;
    }
}
