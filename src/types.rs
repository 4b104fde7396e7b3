//! Core type definitions for the OpenAPI document model.
//!
//! This module contains the typed representation the designer edits:
//! the document root, path items, operations, parameters, and the
//! recursive schema descriptor. Ordered mappings use `IndexMap` so the
//! exported document keeps the order entries were authored in.

use indexmap::IndexMap;
use serde::Serialize;

/// Media type the designer emits for request and response bodies
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// HTTP method enumeration
///
/// Only the methods the designer exposes; method keys are lower-cased on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// All supported methods, in serialization order
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Returns the lower-cased wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }

    /// Parses a method name, accepting any casing
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter location enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }

    /// Parses a location name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schema type tag enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaKind {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
        }
    }

    /// Parses a type tag
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(SchemaKind::String),
            "number" => Some(SchemaKind::Number),
            "integer" => Some(SchemaKind::Integer),
            "boolean" => Some(SchemaKind::Boolean),
            "array" => Some(SchemaKind::Array),
            "object" => Some(SchemaKind::Object),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schema format refinement enumeration
///
/// Formats are only meaningful for compatible type tags (int32 on integer,
/// date-time on string, and so on); the model does not enforce the pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaFormat {
    Int32,
    Int64,
    Float,
    Double,
    Date,
    #[serde(rename = "date-time")]
    DateTime,
    Email,
    Password,
}

impl SchemaFormat {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFormat::Int32 => "int32",
            SchemaFormat::Int64 => "int64",
            SchemaFormat::Float => "float",
            SchemaFormat::Double => "double",
            SchemaFormat::Date => "date",
            SchemaFormat::DateTime => "date-time",
            SchemaFormat::Email => "email",
            SchemaFormat::Password => "password",
        }
    }

    /// Parses a format name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "int32" => Some(SchemaFormat::Int32),
            "int64" => Some(SchemaFormat::Int64),
            "float" => Some(SchemaFormat::Float),
            "double" => Some(SchemaFormat::Double),
            "date" => Some(SchemaFormat::Date),
            "date-time" => Some(SchemaFormat::DateTime),
            "email" => Some(SchemaFormat::Email),
            "password" => Some(SchemaFormat::Password),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recursive structural type descriptor for payloads and parameter values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<SchemaFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Required property names; only meaningful when `kind` is object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Property schemas; only meaningful when `kind` is object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Element schema; only meaningful when `kind` is array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    /// Creates a bare schema with the given type tag
    pub fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            format: None,
            description: None,
            required: None,
            properties: None,
            items: None,
        }
    }

    /// Creates a string schema
    pub fn string() -> Self {
        Self::of(SchemaKind::String)
    }

    /// Creates an integer schema
    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer)
    }

    /// Creates an object schema from property schemas and required names
    pub fn object(properties: IndexMap<String, Schema>, required: Vec<String>) -> Self {
        Self {
            required: Some(required),
            properties: Some(properties),
            ..Self::of(SchemaKind::Object)
        }
    }

    /// Creates an array schema with the given element schema
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaKind::Array)
        }
    }

    /// Sets the format refinement
    pub fn with_format(mut self, format: SchemaFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub schema: Schema,
}

impl Parameter {
    /// Creates a parameter with the given name, location, and value schema
    pub fn new(name: impl Into<String>, location: ParameterLocation, schema: Schema) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: false,
            schema,
        }
    }

    /// Marks the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Media type object holding a body schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Request body keyed by media type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    /// Creates an `application/json` request body with the given schema
    pub fn json(schema: Schema) -> Self {
        let mut content = IndexMap::new();
        content.insert(
            JSON_MEDIA_TYPE.to_string(),
            MediaType {
                schema: Some(schema),
            },
        );
        Self { content }
    }
}

/// Response descriptor keyed by status code in the operation's responses map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

impl Response {
    /// Creates a response with the given description and no body
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: None,
        }
    }

    /// The scaffold `200` response the designer starts every operation with
    pub fn ok() -> Self {
        Self::new("OK")
    }

    /// Attaches an `application/json` body schema
    pub fn with_json_schema(mut self, schema: Schema) -> Self {
        let mut content = IndexMap::new();
        content.insert(
            JSON_MEDIA_TYPE.to_string(),
            MediaType {
                schema: Some(schema),
            },
        );
        self.content = Some(content);
        self
    }
}

/// Derives the designer's conventional operation id:
/// the lower-cased method, a dash, and the path with slashes replaced by
/// dashes (`get` + `/users` becomes `get--users`).
pub fn derive_operation_id(method: HttpMethod, path: &str) -> String {
    format!("{}-{}", method, path.replace('/', "-"))
}

/// A single HTTP method handler description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Status code string to response descriptor; never empty
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// Creates the designer's default operation for a method and path:
    /// empty summary, derived operation id, and the scaffold `200 OK`
    /// response
    pub fn scaffold(method: HttpMethod, path: &str) -> Self {
        Self {
            summary: String::new(),
            description: None,
            operation_id: derive_operation_id(method, path),
            parameters: Vec::new(),
            request_body: None,
            responses: Self::scaffold_responses(),
        }
    }

    /// The default responses mapping: `{"200": {"description": "OK"}}`
    pub fn scaffold_responses() -> IndexMap<String, Response> {
        let mut responses = IndexMap::new();
        responses.insert("200".to_string(), Response::ok());
        responses
    }

    /// Sets the summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a parameter, replacing any existing parameter with the same
    /// name so names stay unique within the operation
    pub fn add_parameter(&mut self, parameter: Parameter) {
        if let Some(existing) = self.parameters.iter_mut().find(|p| p.name == parameter.name) {
            *existing = parameter;
        } else {
            self.parameters.push(parameter);
        }
    }

    /// Inserts or replaces a response under the given status code
    pub fn set_response(&mut self, status: impl Into<String>, response: Response) {
        self.responses.insert(status.into(), response);
    }
}

/// One operation per HTTP method under a single path key
///
/// Fields serialize in declaration order, which matches the order the
/// methods appear in the designer's palette.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Creates a path item with no operations
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, method: HttpMethod) -> &Option<Operation> {
        match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Post => &self.post,
            HttpMethod::Put => &self.put,
            HttpMethod::Delete => &self.delete,
            HttpMethod::Patch => &self.patch,
        }
    }

    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Patch => &mut self.patch,
        }
    }

    /// Returns the operation registered under the given method
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.slot(method).as_ref()
    }

    /// Inserts the operation under the given method, returning the
    /// operation it overwrote, if any
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) -> Option<Operation> {
        self.slot_mut(method).replace(operation)
    }

    /// Removes and returns the operation under the given method
    pub fn remove_operation(&mut self, method: HttpMethod) -> Option<Operation> {
        self.slot_mut(method).take()
    }

    /// Returns true if no method has an operation
    pub fn is_empty(&self) -> bool {
        HttpMethod::ALL.iter().all(|m| self.slot(*m).is_none())
    }

    /// Number of registered operations
    pub fn len(&self) -> usize {
        HttpMethod::ALL
            .iter()
            .filter(|m| self.slot(**m).is_some())
            .count()
    }

    /// Iterates the methods that have an operation, in declaration order
    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter(|m| self.slot(*m).is_some())
    }
}

/// Document info block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reusable component schemas
///
/// Serialized even when empty; the designer always emits
/// `components.schemas`.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Components {
    pub schemas: IndexMap<String, Schema>,
}

/// The root OpenAPI document
///
/// Exactly one document is live per session, owned by the
/// [`Workspace`](crate::document::Workspace); all paths and schemas
/// reachable from it are exclusively owned and never shared across
/// documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}
