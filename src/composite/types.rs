/// Runtime composite definition: the JSON document the schema commands read.
///
/// Only the parts the printer and the model listing need are typed; maps are
/// ordered by key so output is deterministic.
use std::collections::BTreeMap;

use serde::Deserialize;

/// A compiled composite, as loaded from a runtime definition file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCompositeDefinition {
    /// Model name -> model metadata.
    pub models: BTreeMap<String, RuntimeModel>,
    /// Object name -> field name -> field.
    #[serde(default)]
    pub objects: BTreeMap<String, BTreeMap<String, RuntimeField>>,
    /// Enum name -> values.
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,
    /// Fields added to the `CeramicAccount` type.
    #[serde(default)]
    pub account_data: BTreeMap<String, AccountDataField>,
}

/// A model entry of the runtime definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeModel {
    /// Stream ID of the model.
    pub id: String,
    pub account_relation: AccountRelation,
    /// Interface models cannot hold documents.
    #[serde(default)]
    pub interface: bool,
    /// Stream IDs of interfaces this model implements.
    #[serde(default)]
    pub implements: Vec<String>,
}

/// How documents of a model relate to their controlling account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RelationRepr")]
pub enum AccountRelation {
    List,
    Single,
    /// One document per account and unique combination of `fields`.
    Set {
        fields: Vec<String>,
    },
    None,
}

impl AccountRelation {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Single => "single",
            Self::Set { .. } => "set",
            Self::None => "none",
        }
    }
}

/// Accepted encodings: `"list"` or `{"type": "list"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RelationRepr {
    Bare(String),
    Tagged {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        fields: Vec<String>,
    },
}

impl TryFrom<RelationRepr> for AccountRelation {
    type Error = String;

    fn try_from(repr: RelationRepr) -> Result<Self, Self::Error> {
        let (kind, fields) = match repr {
            RelationRepr::Bare(kind) => (kind, Vec::new()),
            RelationRepr::Tagged { kind, fields } => (kind, fields),
        };
        match kind.as_str() {
            "list" => Ok(Self::List),
            "single" => Ok(Self::Single),
            "none" => Ok(Self::None),
            "set" if fields.is_empty() => {
                Err("Account relation \"set\" requires at least one field".to_owned())
            }
            "set" => Ok(Self::Set { fields }),
            other => Err(format!("Unsupported account relation: {other}")),
        }
    }
}

/// One field of a runtime object.
///
/// `kind` is either a scalar name (`string`, `integer`, `did`, ...) or one
/// of `list`, `reference`, `view`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeField {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
    /// Item type of a `list` field.
    pub item: Option<Box<RuntimeField>>,
    /// `object`, `enum`, `connection` or `node` for a `reference` field.
    pub ref_type: Option<String>,
    pub ref_name: Option<String>,
    /// `documentAccount`, `documentVersion` or `relation` for a `view` field.
    pub view_type: Option<String>,
    pub relation: Option<RelationView>,
}

/// Target of a relation view field.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationView {
    /// `document`, `queryConnection` or `queryCount`.
    pub source: String,
    /// Model stream ID the relation points to.
    pub model: String,
}

/// A field on the `CeramicAccount` type.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDataField {
    /// `node`, `connection`, `set` or `account-set`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Model name the field resolves to.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_bare_and_tagged() {
        let bare: AccountRelation = serde_json::from_str("\"list\"").unwrap();
        let tagged: AccountRelation = serde_json::from_str(r#"{"type":"single"}"#).unwrap();
        assert_eq!(bare, AccountRelation::List);
        assert_eq!(tagged, AccountRelation::Single);
    }

    #[test]
    fn test_relation_set_needs_fields() {
        assert!(serde_json::from_str::<AccountRelation>(r#"{"type":"set"}"#).is_err());
        let set: AccountRelation =
            serde_json::from_str(r#"{"type":"set","fields":["owner"]}"#).unwrap();
        assert_eq!(set.as_str(), "set");
    }

    #[test]
    fn test_relation_unknown_kind() {
        let err = serde_json::from_str::<AccountRelation>("\"many\"").unwrap_err();
        assert!(err.to_string().contains("Unsupported account relation: many"));
    }

    #[test]
    fn test_definition_defaults() {
        let def: RuntimeCompositeDefinition = serde_json::from_str(
            r#"{"models":{"Post":{"id":"kjzl6hvfrbw6c1","accountRelation":{"type":"list"}}}}"#,
        )
        .unwrap();
        assert!(def.objects.is_empty());
        assert!(!def.models["Post"].interface);
    }
}
