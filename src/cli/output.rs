/// Output formatting: JSON, table, id modes. TTY detection.
///
/// Formatters return the text instead of printing it; the executor routes
/// it to a file or stdout.
use std::io::IsTerminal;

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::args::OutputFormat;
use crate::exec::CommandError;
use crate::types::ModelSummaryOutput;

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
///
/// `Auto` only becomes a table when the result goes to a terminal stdout.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool, to_stdout: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if to_stdout && std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
#[derive(Debug, Clone, Copy)]
pub struct OutputCtx {
    pub format: OutputFormat,
    pub json: bool,
}

impl OutputCtx {
    /// Construct from CLI args. Format resolution is deferred until the
    /// output target is known.
    #[must_use]
    pub fn new(format: OutputFormat, json: bool) -> Self {
        Self { format, json }
    }

    /// Effective format for a result routed to stdout or a file.
    #[must_use]
    pub fn format_for(&self, to_stdout: bool) -> OutputFormat {
        resolve_format(self.format, self.json, to_stdout)
    }
}

// --- Model listing ---

/// Render a list of models.
///
/// # Errors
///
/// Returns `CommandError` if JSON serialization fails.
pub fn render_models(
    models: &[ModelSummaryOutput],
    format: OutputFormat,
) -> Result<String, CommandError> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => json(models),
        OutputFormat::Compact => compact_json(models),
        OutputFormat::Id => Ok(models.iter().map(|m| format!("{}\n", m.id)).collect()),
        OutputFormat::Table => Ok(models_table(models)),
    }
}

fn models_table(models: &[ModelSummaryOutput]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(["NAME", "ID", "RELATION", "INTERFACE", "IMPLEMENTS"]);

    for model in models {
        let relation = if model.set_fields.is_empty() {
            model.account_relation.clone()
        } else {
            format!("{} ({})", model.account_relation, model.set_fields.join(", "))
        };
        table.add_row([
            Cell::new(&model.name),
            Cell::new(&model.id),
            Cell::new(relation),
            Cell::new(if model.interface { "yes" } else { "" }),
            Cell::new(model.implements.join(", ")),
        ]);
    }

    format!("{table}\n")
}

// --- Generic JSON helpers ---

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, CommandError> {
    let mut s = serde_json::to_string_pretty(value)?;
    s.push('\n');
    Ok(s)
}

fn compact_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CommandError> {
    let mut s = serde_json::to_string(value)?;
    s.push('\n');
    Ok(s)
}
