/// GraphQL schema printer for runtime composite definitions.
///
/// Produces SDL text. The `readonly` option drops every mutation and the
/// input types only mutations use.
use std::collections::BTreeSet;

use super::types::{RuntimeCompositeDefinition, RuntimeField};
use crate::exec::CommandError;

const CONNECTION_ARGS: &str = "(first: Int, after: String, last: Int, before: String)";

/// Print the GraphQL schema of `definition`.
///
/// # Errors
///
/// Returns `CommandError::ExternalCallFailure` for unsupported field types or
/// relations to models missing from the definition.
pub fn print_graphql_schema(
    definition: &RuntimeCompositeDefinition,
    readonly: bool,
) -> Result<String, CommandError> {
    let mut printer = Printer {
        def: definition,
        scalars: BTreeSet::new(),
    };
    let mut blocks = vec![
        "interface Node {\n  id: ID!\n}".to_owned(),
        printer.query_type(),
        printer.account_type()?,
        PAGE_INFO.to_owned(),
    ];

    for (name, values) in &definition.enums {
        blocks.push(block(&format!("enum {name}"), values.iter().cloned()));
    }
    for name in definition.objects.keys() {
        blocks.extend(printer.object_types(name)?);
    }
    if !readonly {
        blocks.extend(printer.mutation_types()?);
    }

    let mut out: Vec<String> = printer
        .scalars
        .iter()
        .map(|s| format!("scalar {s}"))
        .collect();
    out.extend(blocks);
    let mut sdl = out.join("\n\n");
    sdl.push('\n');
    Ok(sdl)
}

const PAGE_INFO: &str = "type PageInfo {
  hasNextPage: Boolean!
  hasPreviousPage: Boolean!
  startCursor: String
  endCursor: String
}";

struct Printer<'a> {
    def: &'a RuntimeCompositeDefinition,
    /// Custom scalars referenced so far.
    scalars: BTreeSet<&'static str>,
}

impl<'a> Printer<'a> {
    fn query_type(&self) -> String {
        let mut fields = vec![
            "node(id: ID!): Node".to_owned(),
            "viewer: CeramicAccount".to_owned(),
        ];
        // Models without an object have no printed type to index.
        for name in self.def.models.keys().filter(|n| self.def.objects.contains_key(*n)) {
            fields.push(format!(
                "{}Index{CONNECTION_ARGS}: {name}Connection",
                lower_first(name)
            ));
        }
        block("type Query", fields)
    }

    fn account_type(&self) -> Result<String, CommandError> {
        let mut fields = vec!["id: ID!".to_owned(), "isViewer: Boolean!".to_owned()];
        for (field, data) in &self.def.account_data {
            if !self.def.objects.contains_key(&data.name) {
                return Err(missing_object(&data.name));
            }
            let line = match data.kind.as_str() {
                "node" => format!("{field}: {}", data.name),
                "connection" | "set" | "account-set" => {
                    format!("{field}{CONNECTION_ARGS}: {}Connection", data.name)
                }
                other => {
                    return Err(CommandError::ExternalCallFailure(format!(
                        "Unsupported account data type: {other}"
                    )));
                }
            };
            fields.push(line);
        }
        Ok(block("type CeramicAccount implements Node", fields))
    }

    fn object_types(&mut self, name: &str) -> Result<Vec<String>, CommandError> {
        let def = self.def;
        let fields = &def.objects[name];
        let mut lines = Vec::new();
        let model = def.models.get(name);
        if model.is_some() {
            lines.push("id: ID!".to_owned());
        }
        for (field_name, field) in fields {
            lines.push(self.output_field(field_name, field)?);
        }

        let Some(model) = model else {
            return Ok(vec![block(&format!("type {name}"), lines)]);
        };

        let mut implements = vec!["Node".to_owned()];
        for id in &model.implements {
            implements.push(self.model_name(id)?.to_owned());
        }
        let keyword = if model.interface { "interface" } else { "type" };
        let header = format!("{keyword} {name} implements {}", implements.join(" & "));

        Ok(vec![
            block(&header, lines),
            block(
                &format!("type {name}Connection"),
                [
                    format!("edges: [{name}Edge]"),
                    "pageInfo: PageInfo!".to_owned(),
                ],
            ),
            block(
                &format!("type {name}Edge"),
                ["cursor: String!".to_owned(), format!("node: {name}")],
            ),
        ])
    }

    fn mutation_types(&mut self) -> Result<Vec<String>, CommandError> {
        let def = self.def;
        let mut blocks = Vec::new();
        let mut mutations = Vec::new();

        for (name, fields) in &def.objects {
            if def.models.get(name).is_some_and(|m| m.interface) {
                continue;
            }
            let mut lines = Vec::new();
            for (field_name, field) in fields {
                if let Some(ty) = self.input_type(field)? {
                    lines.push(format!("{field_name}: {ty}"));
                }
            }
            if lines.is_empty() {
                continue;
            }
            blocks.push(block(&format!("input {name}Input"), lines));
            if def.models.contains_key(name) {
                mutations.push(format!("create{name}(input: {name}Input!): {name}"));
                mutations.push(format!("update{name}(id: ID!, input: {name}Input!): {name}"));
            }
        }

        if !mutations.is_empty() {
            blocks.push(block("type Mutation", mutations));
        }
        Ok(blocks)
    }

    fn output_field(&mut self, name: &str, field: &RuntimeField) -> Result<String, CommandError> {
        if field.kind == "view" {
            return self.view_field(name, field);
        }
        Ok(format!("{name}: {}", self.output_type(field)?))
    }

    fn view_field(&mut self, name: &str, field: &RuntimeField) -> Result<String, CommandError> {
        match field.view_type.as_deref() {
            Some("documentAccount") => Ok(format!("{name}: CeramicAccount!")),
            Some("documentVersion") => {
                self.scalars.insert("CeramicCommitID");
                Ok(format!("{name}: CeramicCommitID!"))
            }
            Some("relation") => {
                let relation = field.relation.as_ref().ok_or_else(|| {
                    CommandError::ExternalCallFailure(format!(
                        "Missing relation definition for field: {name}"
                    ))
                })?;
                let model = self.model_name(&relation.model)?;
                match relation.source.as_str() {
                    "document" => Ok(format!("{name}: {model}")),
                    "queryConnection" => {
                        Ok(format!("{name}{CONNECTION_ARGS}: {model}Connection!"))
                    }
                    "queryCount" => Ok(format!("{name}: Int!")),
                    other => Err(unsupported("relation source", other)),
                }
            }
            other => Err(unsupported("view type", other.unwrap_or("undefined"))),
        }
    }

    fn output_type(&mut self, field: &RuntimeField) -> Result<String, CommandError> {
        let base = match field.kind.as_str() {
            "list" => format!("[{}]", self.output_type(list_item(field)?)?),
            "reference" => {
                let ref_name = reference_name(field)?;
                match field.ref_type.as_deref() {
                    Some("object" | "enum" | "node") => ref_name.to_owned(),
                    Some("connection") => format!("{ref_name}Connection"),
                    other => return Err(unsupported("reference type", other.unwrap_or("undefined"))),
                }
            }
            scalar => self.scalar(scalar)?.to_owned(),
        };
        Ok(with_required(base, field.required))
    }

    /// Input type for a mutation field; `None` for fields clients cannot set.
    fn input_type(&mut self, field: &RuntimeField) -> Result<Option<String>, CommandError> {
        let base = match field.kind.as_str() {
            "view" => return Ok(None),
            "list" => match self.input_type(list_item(field)?)? {
                Some(item) => format!("[{item}]"),
                None => return Ok(None),
            },
            "reference" => {
                let ref_name = reference_name(field)?;
                match field.ref_type.as_deref() {
                    Some("object") if self.has_input(ref_name) => format!("{ref_name}Input"),
                    Some("enum") => ref_name.to_owned(),
                    Some("node") => "ID".to_owned(),
                    _ => return Ok(None),
                }
            }
            scalar => self.scalar(scalar)?.to_owned(),
        };
        Ok(Some(with_required(base, field.required)))
    }

    fn scalar(&mut self, kind: &str) -> Result<&'static str, CommandError> {
        let (name, custom) = match kind {
            "boolean" => ("Boolean", false),
            "integer" => ("Int", false),
            "float" => ("Float", false),
            "string" => ("String", false),
            "id" => ("ID", false),
            "commitid" => ("CeramicCommitID", true),
            "countrycode" => ("CountryCode", true),
            "date" => ("Date", true),
            "datetime" => ("DateTime", true),
            "did" => ("DID", true),
            "duration" => ("Duration", true),
            "latitude" => ("Latitude", true),
            "localdate" => ("LocalDate", true),
            "localtime" => ("LocalTime", true),
            "longitude" => ("Longitude", true),
            "streamid" => ("CeramicStreamID", true),
            "time" => ("Time", true),
            "uri" => ("URI", true),
            other => return Err(unsupported("field type", other)),
        };
        if custom {
            self.scalars.insert(name);
        }
        Ok(name)
    }

    /// Name of the model with stream ID `id`; its object must be printed too.
    fn model_name(&self, id: &str) -> Result<&'a str, CommandError> {
        let def = self.def;
        let name = def
            .models
            .iter()
            .find(|(_, model)| model.id == id)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| CommandError::ExternalCallFailure(format!("Missing model for ID: {id}")))?;
        if def.objects.contains_key(name) {
            Ok(name)
        } else {
            Err(missing_object(name))
        }
    }

    /// Whether `{name}Input` gets printed: the object has a settable field.
    fn has_input(&self, name: &str) -> bool {
        let interface = self.def.models.get(name).is_some_and(|m| m.interface);
        !interface
            && self
                .def
                .objects
                .get(name)
                .is_some_and(|fields| fields.values().any(settable))
    }
}

fn list_item(field: &RuntimeField) -> Result<&RuntimeField, CommandError> {
    field
        .item
        .as_deref()
        .ok_or_else(|| CommandError::ExternalCallFailure("List field is missing its item type".to_owned()))
}

fn reference_name(field: &RuntimeField) -> Result<&str, CommandError> {
    field
        .ref_name
        .as_deref()
        .ok_or_else(|| CommandError::ExternalCallFailure("Reference field is missing its name".to_owned()))
}

/// Whether `input_type` yields a type for `field`, one object level deep.
fn settable(field: &RuntimeField) -> bool {
    match field.kind.as_str() {
        "view" => false,
        "reference" => matches!(field.ref_type.as_deref(), Some("object" | "enum" | "node")),
        "list" => field.item.as_deref().is_some_and(settable),
        _ => true,
    }
}

fn missing_object(model: &str) -> CommandError {
    CommandError::ExternalCallFailure(format!("Missing object for model: {model}"))
}

fn unsupported(what: &str, value: &str) -> CommandError {
    CommandError::ExternalCallFailure(format!("Unsupported {what}: {value}"))
}

fn with_required(base: String, required: bool) -> String {
    if required { format!("{base}!") } else { base }
}

fn block(header: &str, lines: impl IntoIterator<Item = String>) -> String {
    let mut s = format!("{header} {{\n");
    for line in lines {
        s.push_str("  ");
        s.push_str(&line);
        s.push('\n');
    }
    s.push('}');
    s
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
