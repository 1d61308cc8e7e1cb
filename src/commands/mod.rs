/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod composite_models;
pub mod graphql_schema;
pub mod model_validate;

use std::io::Write;

use tracing::debug;

use crate::cli::args::{Command, CompositeCommand, GraphqlCommand, ModelCommand};
use crate::cli::{OutputCtx, StatusReporter};
use crate::exec::{CommandError, Executor, InputSources, Operation, OutputTarget};

/// Message for commands whose input is a runtime definition path.
pub const MISSING_DEFINITION_PATH: &str =
    "You need to pass a composite runtime definition path either as an argument or via stdin";

/// Per-process state shared by the command handlers.
pub struct Session<'a> {
    /// Redirected stdin (or the error reading it), consumed by the first
    /// command that asks for it.
    pub piped: Result<Option<String>, CommandError>,
    pub ctx: OutputCtx,
    pub reporter: &'a mut dyn StatusReporter,
    pub stdout: &'a mut dyn Write,
}

impl Session<'_> {
    /// Input sources for a command with the given positional argument.
    pub fn sources(&mut self, positional: Option<&str>) -> InputSources {
        InputSources {
            piped: std::mem::replace(&mut self.piped, Ok(None)),
            positional: positional.map(str::to_owned),
        }
    }

    /// Run `op` through the executor.
    ///
    /// # Errors
    ///
    /// Returns the `CommandError` that failed the invocation, already reported.
    pub fn execute<O: Operation>(
        &mut self,
        op: &O,
        sources: &InputSources,
        target: &OutputTarget,
    ) -> Result<(), CommandError> {
        let mut executor = Executor::new(&mut *self.reporter, &mut *self.stdout);
        let result = executor.run(op, sources, target);
        debug!(phase = ?executor.phase(), "invocation finished");
        result.map(|_| ())
    }
}

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `CommandError` on any command failure.
pub fn dispatch(command: &Command, session: &mut Session<'_>) -> Result<(), CommandError> {
    match command {
        Command::Graphql(GraphqlCommand::Schema(args)) => graphql_schema::run(args, session),
        Command::Model(ModelCommand::Validate(args)) => model_validate::run(args, session),
        Command::Composite(CompositeCommand::Models(args)) => composite_models::run(args, session),
    }
}
