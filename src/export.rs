//! Serializing the document for download.

use crate::errors::Result;
use crate::types::Document;

/// Download format for the current document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Pretty-printed JSON, 2-space indentation
    Json,
    /// Block-style YAML
    Yaml,
}

impl ExportFormat {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }

    /// The file name the designer offers for download
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "openapi-spec.json",
            ExportFormat::Yaml => "openapi-spec.yaml",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serializes the document in the requested format
///
/// Key order follows struct field declaration order and map insertion
/// order, so two exports of the same document are byte-identical. Pure;
/// serializer errors cannot occur for documents built through the model.
pub fn serialize(document: &Document, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        ExportFormat::Yaml => Ok(serde_yaml::to_string(document)?),
    }
}

impl Document {
    /// Serializes to pretty-printed JSON; see [`serialize`]
    pub fn to_json_pretty(&self) -> Result<String> {
        serialize(self, ExportFormat::Json)
    }

    /// Serializes to block YAML; see [`serialize`]
    pub fn to_yaml(&self) -> Result<String> {
        serialize(self, ExportFormat::Yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HttpMethod, Operation};

    #[test]
    fn test_format_file_names() {
        assert_eq!(ExportFormat::Json.file_name(), "openapi-spec.json");
        assert_eq!(ExportFormat::Yaml.file_name(), "openapi-spec.yaml");
        assert_eq!(ExportFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_json_is_two_space_indented() {
        let doc = Document::new();
        let json = serialize(&doc, ExportFormat::Json).unwrap();
        assert!(json.starts_with("{\n  \"openapi\": \"3.0.0\""));
    }

    #[test]
    fn test_json_field_order_is_declaration_order() {
        let doc = Document::new();
        let json = doc.to_json_pretty().unwrap();

        let openapi = json.find("\"openapi\"").unwrap();
        let info = json.find("\"info\"").unwrap();
        let servers = json.find("\"servers\"").unwrap();
        let paths = json.find("\"paths\"").unwrap();
        let components = json.find("\"components\"").unwrap();
        assert!(openapi < info && info < servers && servers < paths && paths < components);
    }

    #[test]
    fn test_empty_mappings_are_kept() {
        // The designer always emits paths and components.schemas, even
        // when empty
        let json = Document::new().to_json_pretty().unwrap();
        assert!(json.contains("\"paths\": {}"));
        assert!(json.contains("\"schemas\": {}"));
    }

    #[test]
    fn test_yaml_is_block_style() {
        let mut doc = Document::new();
        doc.add_or_merge_operation(
            "/users",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/users").with_summary("list users"),
        );

        let yaml = doc.to_yaml().unwrap();
        assert!(yaml.contains("openapi: 3.0.0"));
        assert!(yaml.contains("/users:"));
        assert!(yaml.contains("summary: list users"));
    }

    #[test]
    fn test_exports_are_deterministic() {
        let mut doc = Document::new();
        doc.add_or_merge_operation(
            "/b",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/b"),
        );
        doc.add_or_merge_operation(
            "/a",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/a"),
        );

        let first = doc.to_json_pretty().unwrap();
        let second = doc.to_json_pretty().unwrap();
        assert_eq!(first, second);

        // Insertion order is preserved, not sorted
        assert!(first.find("\"/b\"").unwrap() < first.find("\"/a\"").unwrap());
    }
}
