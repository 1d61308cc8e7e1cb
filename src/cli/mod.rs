/// CLI layer: argument parsing, output formatting, status reporting.
pub mod args;
pub mod output;
pub mod status;

pub use args::{Cli, OutputFormat};
pub use output::OutputCtx;
pub use status::{StatusReporter, reporter_for};
