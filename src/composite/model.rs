/// Model definitions: the JSON content a model is created from.
use serde_json::{Map, Value};

use super::types::AccountRelation;
use crate::exec::CommandError;

/// A checked model definition. The original JSON object is kept so it can
/// be re-serialized with its keys in their original order.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub name: String,
    pub account_relation: AccountRelation,
    content: Map<String, Value>,
}

impl ModelDefinition {
    /// Parse and check model content given as a JSON string.
    ///
    /// # Errors
    ///
    /// - `CommandError::MalformedInput` if `content` is not JSON
    /// - `CommandError::ExternalCallFailure` if it is not a valid model definition
    pub fn parse(content: &str) -> Result<Self, CommandError> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Object(content) = value else {
            return Err(invalid("Model content must be a JSON object"));
        };

        let name = match content.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
            _ => return Err(invalid("Model definition is missing a \"name\"")),
        };

        let relation = content
            .get("accountRelation")
            .ok_or_else(|| invalid("Model definition is missing an \"accountRelation\""))?;
        let account_relation: AccountRelation = serde_json::from_value(relation.clone())
            .map_err(|e| CommandError::ExternalCallFailure(e.to_string()))?;

        let Some(Value::Object(schema)) = content.get("schema") else {
            return Err(invalid("Model definition is missing a JSON \"schema\" object"));
        };
        if let AccountRelation::Set { fields } = &account_relation {
            check_set_fields(schema, fields)?;
        }

        match content.get("implements") {
            None => {}
            Some(Value::Array(ids)) if ids.iter().all(Value::is_string) => {}
            Some(_) => return Err(invalid("\"implements\" must be a list of model IDs")),
        }

        Ok(Self {
            name,
            account_relation,
            content,
        })
    }

    /// Compact one-line JSON, terminated by a newline.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if serialization fails.
    pub fn to_compact_json(&self) -> Result<String, CommandError> {
        let mut s = serde_json::to_string(&self.content)?;
        s.push('\n');
        Ok(s)
    }
}

/// Every `set` field must be a required property of the schema.
fn check_set_fields(schema: &Map<String, Value>, fields: &[String]) -> Result<(), CommandError> {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    for field in fields {
        if !required.contains(&field.as_str()) {
            return Err(CommandError::ExternalCallFailure(format!(
                "Field \"{field}\" of the set relation must be a required property"
            )));
        }
    }
    Ok(())
}

fn invalid(message: &str) -> CommandError {
    CommandError::ExternalCallFailure(message.to_owned())
}
