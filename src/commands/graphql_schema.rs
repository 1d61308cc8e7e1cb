/// `graphql schema` command: print or save the GraphQL schema of a composite.
use std::path::Path;

use super::{MISSING_DEFINITION_PATH, Session};
use crate::cli::args::GraphqlSchemaArgs;
use crate::composite::{RuntimeCompositeDefinition, load_definition, print_graphql_schema};
use crate::exec::{CommandError, Operation, OutputTarget};

/// Loads a runtime definition and prints its schema.
pub struct GraphqlSchema {
    pub readonly: bool,
}

impl Operation for GraphqlSchema {
    type Output = RuntimeCompositeDefinition;

    fn label(&self) -> &'static str {
        "Loading the GraphQL schema..."
    }

    fn missing_input(&self) -> &'static str {
        MISSING_DEFINITION_PATH
    }

    fn invoke(&self, input: &str) -> Result<Self::Output, CommandError> {
        load_definition(Path::new(input))
    }

    fn format(&self, definition: &Self::Output) -> Result<String, CommandError> {
        print_graphql_schema(definition, self.readonly)
    }

    fn saved_message(&self, path: &Path) -> String {
        format!("The schema was saved in {}", path.display())
    }
}

/// Run `composectl graphql schema`.
///
/// # Errors
///
/// Returns `CommandError` when no definition path is given, the file cannot
/// be read or parsed, the schema cannot be printed, or the output cannot be
/// written.
pub fn run(args: &GraphqlSchemaArgs, session: &mut Session<'_>) -> Result<(), CommandError> {
    let op = GraphqlSchema {
        readonly: args.readonly,
    };
    let sources = session.sources(args.runtime_definition_path.as_deref());
    let target = OutputTarget::from_arg(args.out.output.as_deref());
    session.execute(&op, &sources, &target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::cli::args::OutputArgs;
    use crate::cli::status::StatusEvent;
    use crate::commands::testing::{DEFINITION, run_with};

    fn args(path: Option<&str>, output: Option<&Path>, readonly: bool) -> GraphqlSchemaArgs {
        GraphqlSchemaArgs {
            runtime_definition_path: path.map(str::to_owned),
            out: OutputArgs {
                output: output.map(Path::to_path_buf),
            },
            readonly,
        }
    }

    #[test]
    fn test_missing_path() {
        let captured = run_with(None, OutputFormat::Auto, |s| run(&args(None, None, false), s));
        assert_eq!(
            captured.result,
            Err(CommandError::MissingInput(MISSING_DEFINITION_PATH))
        );
        assert!(captured.stdout.is_empty());
        assert_eq!(
            captured.reporter.events.last(),
            Some(&StatusEvent::Fail(MISSING_DEFINITION_PATH.to_owned()))
        );
    }

    #[test]
    fn test_piped_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("definition.json");
        std::fs::write(&path, DEFINITION).unwrap();
        let piped = path.to_string_lossy().into_owned();

        let captured = run_with(Some(&piped), OutputFormat::Auto, |s| {
            run(&args(Some("/does/not/exist.json"), None, true), s)
        });
        assert_eq!(captured.result, Ok(()));
        assert!(captured.stdout.contains("type Post implements Node"));
        assert!(captured.stdout.contains("interface Named implements Node"));
        assert!(!captured.stdout.contains("Mutation"));
    }

    #[test]
    fn test_file_and_stdout_match() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("definition.json");
        let schema = dir.path().join("schema.graphql");
        std::fs::write(&path, DEFINITION).unwrap();
        let def = path.to_str().unwrap();

        let printed = run_with(None, OutputFormat::Auto, |s| {
            run(&args(Some(def), None, false), s)
        });
        let saved = run_with(None, OutputFormat::Auto, |s| {
            run(&args(Some(def), Some(&schema), false), s)
        });

        assert!(saved.result.is_ok());
        assert!(saved.stdout.is_empty());
        assert_eq!(std::fs::read_to_string(&schema).unwrap(), printed.stdout);
        assert_eq!(
            saved.reporter.events.last(),
            Some(&StatusEvent::Succeed(format!(
                "The schema was saved in {}",
                schema.display()
            )))
        );
    }
}
