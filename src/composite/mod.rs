/// Composite domain layer: runtime definitions, schema printing, model definitions.
pub mod graphql;
pub mod model;
pub mod types;

use std::path::Path;

use tracing::debug;

pub use graphql::print_graphql_schema;
pub use model::ModelDefinition;
pub use types::{AccountRelation, RuntimeCompositeDefinition, RuntimeModel};

use crate::exec::CommandError;

/// Read and parse a runtime composite definition file.
///
/// # Errors
///
/// - `CommandError::ReadFailure` if the file cannot be read
/// - `CommandError::MalformedInput` if it is not JSON
/// - `CommandError::ExternalCallFailure` if the JSON is not a runtime definition
pub fn load_definition(path: &Path) -> Result<RuntimeCompositeDefinition, CommandError> {
    debug!(path = %path.display(), "loading runtime definition");
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CommandError::ReadFailure(e.to_string()))?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_definition(Path::new("/no/such/definition.json")).unwrap_err();
        assert!(matches!(err, CommandError::ReadFailure(_)));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ models: ").unwrap();
        let err = load_definition(&path).unwrap_err();
        assert!(matches!(err, CommandError::MalformedInput(_)));
    }

    #[test]
    fn test_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.json");
        std::fs::write(&path, r#"{"objects": {}}"#).unwrap();
        let err = load_definition(&path).unwrap_err();
        assert!(matches!(err, CommandError::ExternalCallFailure(_)));
        assert!(err.to_string().contains("missing field `models`"));
    }
}
