/// Shared serializable output types.
///
/// These types are what gets written to stdout (or stderr for errors) as
/// JSON or rendered as a table. They are decoupled from the runtime
/// definition types in `composite`.
use serde::{Deserialize, Serialize};

use crate::composite::RuntimeModel;
use crate::exec::CommandError;

/// One model of a runtime composite definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummaryOutput {
    /// Model name, as used in the GraphQL schema.
    pub name: String,
    /// Stream ID of the model.
    pub id: String,
    /// `list`, `single`, `set` or `none`.
    pub account_relation: String,
    /// Fields that make a `set` relation unique.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_fields: Vec<String>,
    /// Whether the model is an interface.
    pub interface: bool,
    /// Stream IDs of implemented interfaces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
}

impl ModelSummaryOutput {
    #[must_use]
    pub fn new(name: &str, model: &RuntimeModel) -> Self {
        let set_fields = match &model.account_relation {
            crate::composite::AccountRelation::Set { fields } => fields.clone(),
            _ => Vec::new(),
        };
        Self {
            name: name.to_owned(),
            id: model.id.clone(),
            account_relation: model.account_relation.as_str().to_owned(),
            set_fields,
            interface: model.interface,
            implements: model.implements.clone(),
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message, unchanged from its source.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `CommandError`.
    #[must_use]
    pub fn from_command_error(err: &CommandError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
