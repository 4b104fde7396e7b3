//! Importing externally supplied OpenAPI text into the document model.
//!
//! Import is a three-step pipeline: parse the text as YAML (a superset of
//! JSON) into a generic value, validate the value against the minimal
//! OpenAPI shape, then convert it into the typed model. The shape check is
//! deliberately shallow: the content of `paths` and `components.schemas`
//! is converted best-effort and never causes a rejection, matching the
//! designer's all-or-nothing-at-the-top-level acceptance policy.

use crate::errors::{Error, Result};
use crate::types::{
    Document, HttpMethod, Info, MediaType, Operation, Parameter, ParameterLocation, PathItem,
    RequestBody, Response, Schema, SchemaFormat, SchemaKind, Server,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Parses and validates a full OpenAPI document from YAML or JSON text
///
/// On success the returned document is ready to be installed with
/// [`Workspace::replace`](crate::document::Workspace::replace); on failure
/// the caller's current document is untouched.
///
/// # Errors
///
/// * [`Error::Parse`] - the input is not syntactically valid YAML or JSON
/// * [`Error::InvalidShape`] - the input parses but fails the shallow
///   structural check
pub fn try_import(raw: &str) -> Result<Document> {
    let value: Value = serde_yaml::from_str(raw).map_err(|e| Error::parse(e.to_string()))?;
    let root = validate_shape(&value)?;
    Ok(convert_document(root))
}

/// Checks the minimal OpenAPI document shape, all-or-nothing:
/// `openapi` is a string, `info.title` and `info.version` are strings,
/// `servers` is a sequence, `paths` is a mapping, and
/// `components.schemas` is a mapping when present.
///
/// Nothing below those keys is inspected.
fn validate_shape(value: &Value) -> Result<&Map<String, Value>> {
    let root = value
        .as_object()
        .ok_or_else(|| Error::invalid_shape("document", "top level must be a mapping"))?;

    if !root.get("openapi").is_some_and(Value::is_string) {
        return Err(Error::invalid_shape("openapi", "must be a string"));
    }

    let info = root.get("info").and_then(Value::as_object);
    if !info
        .and_then(|i| i.get("title"))
        .is_some_and(Value::is_string)
    {
        return Err(Error::invalid_shape("info.title", "must be a string"));
    }
    if !info
        .and_then(|i| i.get("version"))
        .is_some_and(Value::is_string)
    {
        return Err(Error::invalid_shape("info.version", "must be a string"));
    }

    if !root.get("servers").is_some_and(Value::is_array) {
        return Err(Error::invalid_shape("servers", "must be a sequence"));
    }

    if !root.get("paths").is_some_and(Value::is_object) {
        return Err(Error::invalid_shape("paths", "must be a mapping"));
    }

    // Absent components (or components.schemas) is acceptable and treated
    // as empty, but a present schemas key must be a mapping.
    if let Some(schemas) = root
        .get("components")
        .and_then(Value::as_object)
        .and_then(|c| c.get("schemas"))
    {
        if !schemas.is_object() {
            return Err(Error::invalid_shape(
                "components.schemas",
                "must be a mapping",
            ));
        }
    }

    Ok(root)
}

/// Converts an accepted value into the typed model, best-effort.
///
/// Fragments the model cannot represent (non-mapping path items, unknown
/// method keys, schemas with unknown type tags) are dropped with a
/// warning rather than failing the import.
fn convert_document(root: &Map<String, Value>) -> Document {
    let openapi = root
        .get("openapi")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let info = parse_info(root.get("info").and_then(Value::as_object));

    let servers = root
        .get("servers")
        .and_then(Value::as_array)
        .map(|arr| parse_servers(arr))
        .unwrap_or_default();

    let paths = root
        .get("paths")
        .and_then(Value::as_object)
        .map(parse_paths)
        .unwrap_or_default();

    let schemas = root
        .get("components")
        .and_then(Value::as_object)
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
        .map(parse_named_schemas)
        .unwrap_or_default();

    Document {
        openapi,
        info,
        servers,
        paths,
        components: crate::types::Components { schemas },
    }
}

fn parse_info(info: Option<&Map<String, Value>>) -> Info {
    // title and version were validated as strings by the shape check
    Info {
        title: info
            .and_then(|i| i.get("title"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        version: info
            .and_then(|i| i.get("version"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        description: info
            .and_then(|i| i.get("description"))
            .and_then(Value::as_str)
            .map(String::from),
    }
}

fn parse_servers(arr: &[Value]) -> Vec<Server> {
    arr.iter()
        .filter_map(|v| {
            let obj = v.as_object()?;
            let url = obj.get("url")?.as_str()?;
            Some(Server {
                url: url.to_string(),
                description: obj
                    .get("description")
                    .and_then(Value::as_str)
                    .map(String::from),
            })
        })
        .collect()
}

fn parse_paths(obj: &Map<String, Value>) -> IndexMap<String, PathItem> {
    obj.iter()
        .filter_map(|(path, item)| match item.as_object() {
            Some(item_obj) => {
                let item = parse_path_item(path, item_obj);
                if item.is_empty() {
                    log::warn!("path {path} has no usable operations, dropping it");
                    None
                } else {
                    Some((path.clone(), item))
                }
            }
            None => {
                log::warn!("path {path} is not a mapping, dropping it");
                None
            }
        })
        .collect()
}

fn parse_path_item(path: &str, obj: &Map<String, Value>) -> PathItem {
    let mut item = PathItem::new();
    for (key, value) in obj {
        let Some(method) = HttpMethod::parse(key) else {
            log::warn!("unsupported method {key} at {path}, skipping");
            continue;
        };
        match value.as_object() {
            Some(op) => {
                item.set_operation(method, parse_operation(method, path, op));
            }
            None => log::warn!("{key} at {path} is not a mapping, skipping"),
        }
    }
    item
}

fn parse_operation(method: HttpMethod, path: &str, obj: &Map<String, Value>) -> Operation {
    let mut responses = obj
        .get("responses")
        .and_then(Value::as_object)
        .map(parse_responses)
        .unwrap_or_default();
    if responses.is_empty() {
        // Every operation carries at least one response entry
        log::debug!("{method} {path} arrived without responses, scaffolding 200 OK");
        responses = Operation::scaffold_responses();
    }

    Operation {
        summary: obj
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        operation_id: obj
            .get("operationId")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| crate::types::derive_operation_id(method, path)),
        parameters: obj
            .get("parameters")
            .and_then(Value::as_array)
            .map(|arr| parse_parameters(arr))
            .unwrap_or_default(),
        request_body: obj
            .get("requestBody")
            .and_then(Value::as_object)
            .and_then(parse_request_body),
        responses,
    }
}

fn parse_parameters(arr: &[Value]) -> Vec<Parameter> {
    arr.iter()
        .filter_map(|v| {
            let obj = v.as_object()?;
            let name = obj.get("name")?.as_str()?;
            let location = obj
                .get("in")
                .and_then(Value::as_str)
                .and_then(ParameterLocation::parse)?;
            Some(Parameter {
                name: name.to_string(),
                location,
                description: obj
                    .get("description")
                    .and_then(Value::as_str)
                    .map(String::from),
                required: obj
                    .get("required")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                schema: obj
                    .get("schema")
                    .and_then(Value::as_object)
                    .and_then(parse_schema)
                    .unwrap_or_else(Schema::string),
            })
        })
        .collect()
}

fn parse_request_body(obj: &Map<String, Value>) -> Option<RequestBody> {
    let content = obj.get("content")?.as_object()?;
    Some(RequestBody {
        content: parse_content(content),
    })
}

fn parse_content(obj: &Map<String, Value>) -> IndexMap<String, MediaType> {
    obj.iter()
        .map(|(media_type, v)| {
            (
                media_type.clone(),
                MediaType {
                    schema: v
                        .as_object()
                        .and_then(|m| m.get("schema"))
                        .and_then(Value::as_object)
                        .and_then(parse_schema),
                },
            )
        })
        .collect()
}

fn parse_responses(obj: &Map<String, Value>) -> IndexMap<String, Response> {
    obj.iter()
        .filter_map(|(status, v)| match v.as_object() {
            Some(resp) => Some((
                status.clone(),
                Response {
                    description: resp
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    content: resp
                        .get("content")
                        .and_then(Value::as_object)
                        .map(parse_content),
                },
            )),
            None => {
                log::warn!("response {status} is not a mapping, skipping");
                None
            }
        })
        .collect()
}

fn parse_named_schemas(obj: &Map<String, Value>) -> IndexMap<String, Schema> {
    obj.iter()
        .filter_map(|(name, v)| match v.as_object().and_then(parse_schema) {
            Some(schema) => Some((name.clone(), schema)),
            None => {
                log::warn!("component schema {name} is not representable, dropping it");
                None
            }
        })
        .collect()
}

fn parse_schema(obj: &Map<String, Value>) -> Option<Schema> {
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(SchemaKind::parse)?;

    Some(Schema {
        kind,
        format: obj
            .get("format")
            .and_then(Value::as_str)
            .and_then(SchemaFormat::parse),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        required: obj.get("required").and_then(Value::as_array).map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        }),
        properties: obj
            .get("properties")
            .and_then(Value::as_object)
            .map(parse_named_schemas),
        items: obj
            .get("items")
            .and_then(Value::as_object)
            .and_then(parse_schema)
            .map(Box::new),
    })
}
