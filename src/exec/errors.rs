/// Errors raised while executing a command.
use thiserror::Error;

/// Every way a command invocation can fail.
///
/// The carried message is shown to the user unchanged: parser and I/O
/// errors keep their original text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Neither piped stdin nor the positional argument supplied an input.
    #[error("{0}")]
    MissingInput(&'static str),

    /// The input file could not be read.
    #[error("{0}")]
    ReadFailure(String),

    /// The input is not valid structured data.
    #[error("{0}")]
    MalformedInput(String),

    /// The delegated capability rejected the input.
    #[error("{0}")]
    ExternalCallFailure(String),

    /// The output file could not be written.
    #[error("{0}")]
    WriteFailure(String),
}

impl CommandError {
    /// Return the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput(_) => 2,
            Self::ReadFailure(_)
            | Self::MalformedInput(_)
            | Self::ExternalCallFailure(_)
            | Self::WriteFailure(_) => 1,
        }
    }

    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "missing_input",
            Self::ReadFailure(_) => "read_failure",
            Self::MalformedInput(_) => "malformed_input",
            Self::ExternalCallFailure(_) => "external_call_failure",
            Self::WriteFailure(_) => "write_failure",
        }
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() {
            Self::MalformedInput(err.to_string())
        } else {
            Self::ExternalCallFailure(err.to_string())
        }
    }
}
