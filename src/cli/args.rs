/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// composectl — print GraphQL schemas and inspect composite models.
#[derive(Debug, Parser)]
#[command(
    name = "composectl",
    about = "Print GraphQL schemas and inspect composite models from the CLI",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Format for listings. Auto-detects: table when stdout is a TTY, json otherwise.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub format: OutputFormat,

    /// Shorthand for --format json. Failures are reported as a JSON envelope on stderr.
    #[arg(long, global = true, conflicts_with = "format")]
    pub json: bool,

    /// Only report failures on stderr.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log executor phases to stderr (same as RUST_LOG=debug).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when writing to a TTY stdout, json otherwise.
    #[default]
    Auto,
    /// JSON array or object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Aligned table with headers (human-readable).
    Table,
    /// Stream ID only, one per line.
    Id,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// GraphQL schema of a composite.
    #[command(subcommand)]
    Graphql(GraphqlCommand),
    /// Model definitions.
    #[command(subcommand)]
    Model(ModelCommand),
    /// Compiled composites.
    #[command(subcommand)]
    Composite(CompositeCommand),
}

#[derive(Debug, Subcommand)]
pub enum GraphqlCommand {
    /// Print or save the GraphQL schema of a runtime composite definition.
    Schema(GraphqlSchemaArgs),
}

#[derive(Debug, Subcommand)]
pub enum ModelCommand {
    /// Check model content and print it as compact JSON.
    Validate(ModelValidateArgs),
}

#[derive(Debug, Subcommand)]
pub enum CompositeCommand {
    /// List the models of a runtime composite definition.
    Models(CompositeModelsArgs),
}

/// Destination shared by every command.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Path to the file where the result should be saved. Prints to stdout when absent.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for `composectl graphql schema`.
#[derive(Debug, Parser)]
pub struct GraphqlSchemaArgs {
    /// Path to the runtime composite definition (JSON). Read from stdin when piped.
    pub runtime_definition_path: Option<String>,

    #[command(flatten)]
    pub out: OutputArgs,

    /// Leave mutations out of the schema.
    #[arg(long)]
    pub readonly: bool,
}

/// Arguments for `composectl model validate`.
#[derive(Debug, Parser)]
pub struct ModelValidateArgs {
    /// Model content (JSON encoded as string). Read from stdin when piped.
    pub content: Option<String>,

    #[command(flatten)]
    pub out: OutputArgs,
}

/// Arguments for `composectl composite models`.
#[derive(Debug, Parser)]
pub struct CompositeModelsArgs {
    /// Path to the runtime composite definition (JSON). Read from stdin when piped.
    pub runtime_definition_path: Option<String>,

    #[command(flatten)]
    pub out: OutputArgs,

    /// Only print model stream IDs (same as --format id).
    #[arg(long)]
    pub id_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_graphql_schema_flags() {
        let cli = Cli::try_parse_from([
            "composectl",
            "graphql",
            "schema",
            "def.json",
            "-o",
            "schema.graphql",
            "--readonly",
        ])
        .unwrap();
        let Command::Graphql(GraphqlCommand::Schema(args)) = cli.command else {
            panic!("expected graphql schema");
        };
        assert_eq!(args.runtime_definition_path.as_deref(), Some("def.json"));
        assert_eq!(args.out.output, Some(PathBuf::from("schema.graphql")));
        assert!(args.readonly);
    }

    #[test]
    fn test_positional_is_optional() {
        let cli = Cli::try_parse_from(["composectl", "model", "validate"]).unwrap();
        let Command::Model(ModelCommand::Validate(args)) = cli.command else {
            panic!("expected model validate");
        };
        assert!(args.content.is_none());
        assert!(args.out.output.is_none());
    }

    #[test]
    fn test_json_conflicts_with_format() {
        let result = Cli::try_parse_from([
            "composectl",
            "--json",
            "--format",
            "table",
            "composite",
            "models",
        ]);
        assert!(result.is_err());
    }
}
