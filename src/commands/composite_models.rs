/// `composite models` command: list the models of a runtime composite definition.
use std::path::Path;

use super::{MISSING_DEFINITION_PATH, Session};
use crate::cli::OutputFormat;
use crate::cli::args::CompositeModelsArgs;
use crate::cli::output::render_models;
use crate::composite::load_definition;
use crate::exec::{CommandError, Operation, OutputTarget};
use crate::types::ModelSummaryOutput;

/// Loads a runtime definition and summarizes its models.
pub struct CompositeModels {
    pub format: OutputFormat,
}

impl Operation for CompositeModels {
    type Output = Vec<ModelSummaryOutput>;

    fn label(&self) -> &'static str {
        "Loading the composite models..."
    }

    fn missing_input(&self) -> &'static str {
        MISSING_DEFINITION_PATH
    }

    fn invoke(&self, input: &str) -> Result<Self::Output, CommandError> {
        let definition = load_definition(Path::new(input))?;
        Ok(definition
            .models
            .iter()
            .map(|(name, model)| ModelSummaryOutput::new(name, model))
            .collect())
    }

    fn format(&self, models: &Self::Output) -> Result<String, CommandError> {
        render_models(models, self.format)
    }

    fn saved_message(&self, path: &Path) -> String {
        format!("The model list was saved in {}", path.display())
    }
}

/// Run `composectl composite models`.
///
/// # Errors
///
/// Returns `CommandError` when no definition path is given, the file cannot
/// be read or parsed, or the output cannot be written.
pub fn run(args: &CompositeModelsArgs, session: &mut Session<'_>) -> Result<(), CommandError> {
    let target = OutputTarget::from_arg(args.out.output.as_deref());
    let format = if args.id_only {
        OutputFormat::Id
    } else {
        session.ctx.format_for(!target.is_file())
    };
    let sources = session.sources(args.runtime_definition_path.as_deref());
    session.execute(&CompositeModels { format }, &sources, &target)
}
