//! JSON Schema to TypeScript type mapping and data contract declarations.

use std::collections::HashSet;

use crate::openapi::OpenApiContext;
use crate::utils::{
    comment_lines, escape_ts_string, is_valid_identifier, property_key, to_type_name,
    to_upper_camel_case,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A named TypeScript declaration in the data contracts section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Contract {
    /// `export interface Name { ... }`
    Interface {
        name: String,
        description: Vec<String>,
        fields: Vec<ContractField>,
    },
    /// `export enum Name { ... }`
    Enum {
        name: String,
        description: Vec<String>,
        members: Vec<EnumMember>,
    },
    /// `export type Name = ...;`
    Type {
        name: String,
        description: Vec<String>,
        body: String,
    },
}

impl Contract {
    pub fn name(&self) -> &str {
        match self {
            Self::Interface { name, .. } | Self::Enum { name, .. } | Self::Type { name, .. } => {
                name
            }
        }
    }
}

/// One property of an interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractField {
    /// Property key, quoted when it is not an identifier
    pub key: String,
    pub optional: bool,
    pub ts_type: String,
    /// Lines of the `/** */` block above the property
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub key: String,
    /// TypeScript literal, already quoted for strings
    pub value: String,
}

/// Collect the named schemas of a spec, sorted by their TypeScript name
pub fn collect_contracts(spec: &OpenApiContext) -> Vec<Contract> {
    let mut contracts: Vec<Contract> = spec
        .schemas()
        .map(|schemas| {
            schemas
                .iter()
                .map(|(name, schema)| build_contract(to_type_name(name), schema))
                .collect()
        })
        .unwrap_or_default();
    contracts.sort_by(|a, b| a.name().cmp(b.name()));
    contracts
}

/// Build the declaration for `schema` under an already sanitized `name`
pub fn build_contract(name: String, schema: &JsonValue) -> Contract {
    let description = schema
        .get("description")
        .or_else(|| schema.get("title"))
        .and_then(JsonValue::as_str)
        .map(comment_lines)
        .unwrap_or_default();

    if let Some(members) = enum_members(schema) {
        return Contract::Enum {
            name,
            description,
            members,
        };
    }

    if is_plain_object(schema) {
        let required = required_set(schema);
        let fields = schema
            .get("properties")
            .and_then(JsonValue::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(key, prop)| ContractField {
                        key: property_key(key),
                        optional: !required.contains(key.as_str()),
                        ts_type: ts_type(prop),
                        docs: property_docs(prop),
                    })
                    .collect()
            })
            .unwrap_or_default();
        return Contract::Interface {
            name,
            description,
            fields,
        };
    }

    Contract::Type {
        name,
        description,
        body: ts_type(schema),
    }
}

/// Map a schema to a TypeScript type expression
pub fn ts_type(schema: &JsonValue) -> String {
    let base = base_type(schema);
    if is_nullable(schema) && base != "any" && !base.ends_with("| null") {
        format!("{} | null", base)
    } else {
        base
    }
}

/// Type name a `$ref` points at
pub fn ref_type_name(reference: &str) -> String {
    let last = reference.rsplit('/').next().unwrap_or(reference);
    to_type_name(&last.replace("~1", "/").replace("~0", "~"))
}

/// Whether a schema can be written as an interface body
pub fn is_plain_object(schema: &JsonValue) -> bool {
    let Some(obj) = schema.as_object() else {
        return false;
    };
    let type_ok = match obj.get("type").and_then(JsonValue::as_str) {
        Some("object") | None => true,
        Some(_) => false,
    };
    type_ok
        && obj.get("properties").is_some_and(JsonValue::is_object)
        && !obj.contains_key("$ref")
        && !obj.contains_key("allOf")
        && !obj.contains_key("oneOf")
        && !obj.contains_key("anyOf")
        && !has_additional_properties(schema)
        && !is_nullable(schema)
}

fn base_type(schema: &JsonValue) -> String {
    let Some(obj) = schema.as_object() else {
        return "any".to_string();
    };

    if let Some(reference) = obj.get("$ref").and_then(JsonValue::as_str) {
        return ref_type_name(reference);
    }

    if let Some(values) = obj.get("enum").and_then(JsonValue::as_array) {
        let literals: Vec<String> = values.iter().filter_map(literal).collect();
        if !literals.is_empty() {
            return dedup(literals).join(" | ");
        }
    }

    if let Some(parts) = obj.get("allOf").and_then(JsonValue::as_array) {
        return compose(parts, " & ");
    }
    for key in ["oneOf", "anyOf"] {
        if let Some(parts) = obj.get(key).and_then(JsonValue::as_array) {
            return compose(parts, " | ");
        }
    }

    match obj.get("type") {
        Some(JsonValue::String(typ)) => primitive_type(typ, schema),
        // OpenAPI 3.1 allows `type: ["string", "null"]`
        Some(JsonValue::Array(types)) => {
            let mapped: Vec<String> = types
                .iter()
                .filter_map(JsonValue::as_str)
                .map(|typ| primitive_type(typ, schema))
                .collect();
            if mapped.is_empty() {
                "any".to_string()
            } else {
                dedup(mapped).join(" | ")
            }
        }
        _ if obj.contains_key("properties") || has_additional_properties(schema) => {
            object_type(schema)
        }
        _ => "any".to_string(),
    }
}

fn primitive_type(typ: &str, schema: &JsonValue) -> String {
    match typ {
        "string" => match schema.get("format").and_then(JsonValue::as_str) {
            Some("binary") => "File".to_string(),
            _ => "string".to_string(),
        },
        "integer" | "number" => "number".to_string(),
        "boolean" => "boolean".to_string(),
        "file" => "File".to_string(),
        "null" => "null".to_string(),
        "array" => match schema.get("items") {
            Some(items) => format!("{}[]", wrap(ts_type(items))),
            None => "any[]".to_string(),
        },
        "object" => object_type(schema),
        _ => "any".to_string(),
    }
}

fn object_type(schema: &JsonValue) -> String {
    let required = required_set(schema);
    let fields: Vec<String> = schema
        .get("properties")
        .and_then(JsonValue::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(key, prop)| {
                    format!(
                        "{}{}: {}",
                        property_key(key),
                        if required.contains(key.as_str()) { "" } else { "?" },
                        ts_type(prop)
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let record = match schema.get("additionalProperties") {
        Some(JsonValue::Bool(true)) => Some("Record<string, any>".to_string()),
        Some(value @ JsonValue::Object(_)) => Some(format!("Record<string, {}>", ts_type(value))),
        _ => None,
    };

    match (fields.is_empty(), record) {
        (true, Some(record)) => record,
        (true, None) => "Record<string, any>".to_string(),
        (false, None) => format!("{{ {} }}", fields.join("; ")),
        (false, Some(record)) => format!("{{ {} }} & {}", fields.join("; "), record),
    }
}

fn compose(parts: &[JsonValue], separator: &str) -> String {
    let mapped: Vec<String> = parts.iter().map(|part| wrap(ts_type(part))).collect();
    match mapped.len() {
        0 => "any".to_string(),
        1 => mapped.into_iter().next().unwrap_or_default(),
        _ => dedup(mapped).join(separator),
    }
}

/// Parenthesize unions and intersections so they can be nested
fn wrap(ts: String) -> String {
    if ts.contains(" | ") || ts.contains(" & ") {
        format!("({})", ts)
    } else {
        ts
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn literal(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(format!("\"{}\"", escape_ts_string(s))),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null => Some("null".to_string()),
        _ => None,
    }
}

fn is_nullable(schema: &JsonValue) -> bool {
    ["nullable", "x-nullable"]
        .iter()
        .any(|key| schema.get(*key).and_then(JsonValue::as_bool) == Some(true))
}

fn has_additional_properties(schema: &JsonValue) -> bool {
    match schema.get("additionalProperties") {
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::Object(_)) => true,
        _ => false,
    }
}

fn required_set(schema: &JsonValue) -> HashSet<&str> {
    schema
        .get("required")
        .and_then(JsonValue::as_array)
        .map(|arr| arr.iter().filter_map(JsonValue::as_str).collect())
        .unwrap_or_default()
}

/// Members for `export enum`, or `None` when the values only fit a literal union
fn enum_members(schema: &JsonValue) -> Option<Vec<EnumMember>> {
    let values = schema.get("enum")?.as_array()?;
    if values.is_empty() || is_nullable(schema) {
        return None;
    }
    let var_names: Vec<&str> = schema
        .get("x-enum-varnames")
        .and_then(JsonValue::as_array)
        .map(|arr| arr.iter().filter_map(JsonValue::as_str).collect())
        .unwrap_or_default();

    let mut members = Vec::with_capacity(values.len());
    let mut keys = HashSet::new();
    for (i, value) in values.iter().enumerate() {
        let (key, literal) = match value {
            JsonValue::String(s) => (
                var_names
                    .get(i)
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| to_upper_camel_case(s)),
                format!("\"{}\"", escape_ts_string(s)),
            ),
            JsonValue::Number(n) => (var_names.get(i)?.to_string(), n.to_string()),
            _ => return None,
        };
        if !is_valid_identifier(&key) || !keys.insert(key.clone()) {
            return None;
        }
        members.push(EnumMember {
            key,
            value: literal,
        });
    }
    Some(members)
}

fn property_docs(prop: &JsonValue) -> Vec<String> {
    let mut docs = prop
        .get("description")
        .or_else(|| prop.get("title"))
        .and_then(JsonValue::as_str)
        .map(comment_lines)
        .unwrap_or_default();
    if let Some(format) = prop.get("format").and_then(JsonValue::as_str) {
        docs.push(format!("@format {}", format));
    }
    if let Some(example) = prop.get("example") {
        docs.push(format!("@example {}", example).replace("*/", "*\\/"));
    }
    if prop.get("deprecated").and_then(JsonValue::as_bool) == Some(true) {
        docs.push("@deprecated".to_string());
    }
    docs
}
