/// `model validate` command: check model content and print it as compact JSON.
use std::path::Path;

use super::Session;
use crate::cli::args::ModelValidateArgs;
use crate::composite::ModelDefinition;
use crate::exec::{CommandError, Operation, OutputTarget};

pub const MISSING_CONTENT: &str =
    "You need to pass the model content (JSON encoded as string) either as an argument or via stdin";

/// Parses model content given inline.
pub struct ModelValidate;

impl Operation for ModelValidate {
    type Output = ModelDefinition;

    fn label(&self) -> &'static str {
        "Checking the model definition..."
    }

    fn missing_input(&self) -> &'static str {
        MISSING_CONTENT
    }

    fn invoke(&self, input: &str) -> Result<Self::Output, CommandError> {
        let model = ModelDefinition::parse(input)?;
        tracing::debug!(
            name = %model.name,
            relation = model.account_relation.as_str(),
            "model definition is valid"
        );
        Ok(model)
    }

    fn format(&self, model: &Self::Output) -> Result<String, CommandError> {
        model.to_compact_json()
    }

    fn saved_message(&self, path: &Path) -> String {
        format!("The model definition was saved in {}", path.display())
    }
}

/// Run `composectl model validate`.
///
/// # Errors
///
/// Returns `CommandError` when no content is given, it is not JSON, it is not
/// a valid model definition, or the output cannot be written.
pub fn run(args: &ModelValidateArgs, session: &mut Session<'_>) -> Result<(), CommandError> {
    let sources = session.sources(args.content.as_deref());
    let target = OutputTarget::from_arg(args.out.output.as_deref());
    session.execute(&ModelValidate, &sources, &target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::cli::args::OutputArgs;
    use crate::cli::status::StatusEvent;
    use crate::commands::testing::run_with;

    const MY_MODEL_JSON: &str = r#"{"name":"MyModel","accountRelation":"list","schema":{"type":"object","properties":{"stringPropName":{"type":"string","maxLength":80}},"required":["stringPropName"]}}"#;

    fn args(content: Option<&str>) -> ModelValidateArgs {
        ModelValidateArgs {
            content: content.map(str::to_owned),
            out: OutputArgs { output: None },
        }
    }

    #[test]
    fn test_prints_compact_definition() {
        let captured = run_with(None, OutputFormat::Auto, |s| run(&args(Some(MY_MODEL_JSON)), s));
        assert_eq!(captured.result, Ok(()));
        assert!(captured.stdout.contains(r#""name":"MyModel""#));
        assert!(captured.stdout.contains(r#""accountRelation":"list""#));
        assert!(
            !captured
                .reporter
                .events
                .iter()
                .any(|e| matches!(e, StatusEvent::Fail(_)))
        );
    }

    #[test]
    fn test_piped_content_wins() {
        let captured = run_with(Some(MY_MODEL_JSON), OutputFormat::Auto, |s| {
            run(&args(Some("not json")), s)
        });
        assert_eq!(captured.result, Ok(()));
        assert!(captured.stdout.contains("MyModel"));
    }

    #[test]
    fn test_missing_content() {
        let captured = run_with(None, OutputFormat::Auto, |s| run(&args(None), s));
        assert_eq!(captured.result, Err(CommandError::MissingInput(MISSING_CONTENT)));
        assert!(MISSING_CONTENT.contains("model content (JSON encoded as string)"));
    }

    #[test]
    fn test_malformed_content_keeps_parser_message() {
        let expected = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .to_string();
        let captured = run_with(None, OutputFormat::Auto, |s| run(&args(Some("{oops")), s));
        assert_eq!(captured.result, Err(CommandError::MalformedInput(expected.clone())));
        assert!(captured.stdout.is_empty());
        assert_eq!(captured.reporter.events.last(), Some(&StatusEvent::Fail(expected)));
    }
}
