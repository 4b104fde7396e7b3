//! Document construction, mutation operations, and the session workspace.
//!
//! All mutation operations are synchronous and total: they complete before
//! returning, have no failure path, and take owned values so a caller
//! keeping a clone of an operation or schema can never retroactively alter
//! the document.

use crate::errors::Result;
use crate::types::{
    Components, Document, HttpMethod, Info, Operation, PathItem, Schema, Server,
};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};

/// OpenAPI version the designer emits for new documents
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.0";

/// Creates the designer's default document, used at session start and
/// after a reset
///
/// # Examples
///
/// ```
/// use apidraft::document::new_document;
///
/// let doc = new_document();
/// assert_eq!(doc.openapi, "3.0.0");
/// assert_eq!(doc.info.title, "API Contract Designer");
/// assert!(doc.paths.is_empty());
/// ```
pub fn new_document() -> Document {
    Document {
        openapi: DEFAULT_OPENAPI_VERSION.to_string(),
        info: Info {
            title: "API Contract Designer".to_string(),
            version: "1.0.0".to_string(),
            description: Some("API designed with API Contract Designer".to_string()),
        },
        servers: vec![Server {
            url: "http://localhost:3000".to_string(),
            description: Some("Development server".to_string()),
        }],
        paths: IndexMap::new(),
        components: Components::default(),
    }
}

impl Default for Document {
    fn default() -> Self {
        new_document()
    }
}

/// Counts shown on the designer's dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    /// Number of path entries
    pub paths: usize,
    /// Total number of operations across all paths
    pub operations: usize,
    /// Number of component schemas
    pub schemas: usize,
}

impl Document {
    /// Creates the default document
    pub fn new() -> Self {
        new_document()
    }

    /// Inserts `operation` at `path` under the given method, creating the
    /// path entry when absent and overwriting any operation already
    /// registered under that method
    pub fn add_or_merge_operation(
        &mut self,
        path: impl Into<String>,
        method: HttpMethod,
        operation: Operation,
    ) {
        let path = path.into();
        let item = self.paths.entry(path.clone()).or_default();
        if item.set_operation(method, operation).is_some() {
            log::debug!("overwrote {method} operation at {path}");
        }
    }

    /// Removes the entry for `path`; no-op when absent
    pub fn remove_path(&mut self, path: &str) -> Option<PathItem> {
        // shift_remove keeps the remaining paths in authoring order
        self.paths.shift_remove(path)
    }

    /// Removes a single operation; the owning path entry is dropped with
    /// it when no operations remain
    pub fn remove_operation(&mut self, path: &str, method: HttpMethod) -> Option<Operation> {
        let item = self.paths.get_mut(path)?;
        let removed = item.remove_operation(method);
        if item.is_empty() {
            self.paths.shift_remove(path);
            log::debug!("dropped empty path entry {path}");
        }
        removed
    }

    /// Inserts or wholly replaces the named component schema; the schema's
    /// internal consistency is not checked
    pub fn add_or_replace_schema(&mut self, name: impl Into<String>, schema: Schema) {
        self.components.schemas.insert(name.into(), schema);
    }

    /// Returns the operation at `path` under the given method
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path)?.operation(method)
    }

    /// Returns the dashboard counts for this document
    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            paths: self.paths.len(),
            operations: self.paths.values().map(PathItem::len).sum(),
            schemas: self.components.schemas.len(),
        }
    }

    /// Calculates the SHA-256 digest of the document's canonical JSON
    /// rendering, as a hex string
    ///
    /// Editing surfaces use this for cheap change detection between two
    /// points in a session.
    pub fn fingerprint(&self) -> Result<String> {
        let data = serde_json::to_vec(self)?;

        let mut hasher = Sha256::new();
        hasher.update(&data);
        let result = hasher.finalize();
        Ok(hex::encode(result))
    }
}

/// The owned session context: one live document plus the selection state
/// editing surfaces share
///
/// Replaces ambient global state; every mutator goes through a `&mut`
/// borrow of the workspace, so there is one mutator at a time by
/// construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workspace {
    document: Document,
    selected_path: Option<String>,
    selected_method: Option<HttpMethod>,
}

impl Workspace {
    /// Creates a workspace holding the default document with nothing
    /// selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the live document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the live document
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Atomically swaps the live document for `document`
    ///
    /// Used by the importer after successful validation; the selection is
    /// cleared because it referred to the old document.
    pub fn replace(&mut self, document: Document) {
        self.document = document;
        self.selected_path = None;
        self.selected_method = None;
    }

    /// Discards the live document and returns to the session-start default
    pub fn reset(&mut self) {
        self.replace(new_document());
    }

    /// Parses and validates `raw`, installing the resulting document on
    /// success; on any error the current document is left untouched
    pub fn import(&mut self, raw: &str) -> Result<()> {
        let document = crate::import::try_import(raw)?;
        self.replace(document);
        Ok(())
    }

    /// See [`Document::add_or_merge_operation`]
    pub fn add_or_merge_operation(
        &mut self,
        path: impl Into<String>,
        method: HttpMethod,
        operation: Operation,
    ) {
        self.document.add_or_merge_operation(path, method, operation);
    }

    /// See [`Document::remove_path`]; clears the selection when it pointed
    /// at the removed path
    pub fn remove_path(&mut self, path: &str) -> Option<PathItem> {
        if self.selected_path.as_deref() == Some(path) {
            self.selected_path = None;
            self.selected_method = None;
        }
        self.document.remove_path(path)
    }

    /// See [`Document::remove_operation`]
    pub fn remove_operation(&mut self, path: &str, method: HttpMethod) -> Option<Operation> {
        let removed = self.document.remove_operation(path, method);
        if removed.is_some()
            && self.selected_path.as_deref() == Some(path)
            && self.selected_method == Some(method)
        {
            self.selected_method = None;
        }
        removed
    }

    /// See [`Document::add_or_replace_schema`]
    pub fn add_or_replace_schema(&mut self, name: impl Into<String>, schema: Schema) {
        self.document.add_or_replace_schema(name, schema);
    }

    /// Selects a path (and optionally a method) for the editing surfaces
    pub fn select(&mut self, path: impl Into<String>, method: Option<HttpMethod>) {
        self.selected_path = Some(path.into());
        self.selected_method = method;
    }

    /// Currently selected path, if any
    pub fn selected_path(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    /// Currently selected method, if any
    pub fn selected_method(&self) -> Option<HttpMethod> {
        self.selected_method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Parameter, ParameterLocation, Response};

    #[test]
    fn test_default_document_shape() {
        let doc = new_document();
        assert_eq!(doc.openapi, "3.0.0");
        assert_eq!(doc.info.title, "API Contract Designer");
        assert_eq!(doc.info.version, "1.0.0");
        assert_eq!(
            doc.info.description.as_deref(),
            Some("API designed with API Contract Designer")
        );
        assert_eq!(doc.servers.len(), 1);
        assert_eq!(doc.servers[0].url, "http://localhost:3000");
        assert!(doc.paths.is_empty());
        assert!(doc.components.schemas.is_empty());
    }

    #[test]
    fn test_add_or_merge_operation_creates_path() {
        let mut doc = Document::new();
        let op = Operation::scaffold(HttpMethod::Get, "/users").with_summary("list users");

        doc.add_or_merge_operation("/users", HttpMethod::Get, op.clone());

        assert_eq!(doc.operation("/users", HttpMethod::Get), Some(&op));
    }

    #[test]
    fn test_add_or_merge_operation_overwrites_method() {
        let mut doc = Document::new();
        doc.add_or_merge_operation(
            "/users",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/users").with_summary("first"),
        );
        doc.add_or_merge_operation(
            "/users",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/users").with_summary("second"),
        );

        assert_eq!(doc.operation("/users", HttpMethod::Get).unwrap().summary, "second");
        assert_eq!(doc.paths["/users"].len(), 1);
    }

    #[test]
    fn test_add_or_merge_operation_keeps_siblings() {
        let mut doc = Document::new();
        let get = Operation::scaffold(HttpMethod::Get, "/users").with_summary("list");
        doc.add_or_merge_operation("/users", HttpMethod::Get, get.clone());
        doc.add_or_merge_operation(
            "/users",
            HttpMethod::Post,
            Operation::scaffold(HttpMethod::Post, "/users"),
        );

        assert_eq!(doc.operation("/users", HttpMethod::Get), Some(&get));
        assert_eq!(doc.paths["/users"].len(), 2);
    }

    #[test]
    fn test_remove_path_is_total() {
        let mut doc = Document::new();
        doc.add_or_merge_operation(
            "/users",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/users"),
        );

        assert!(doc.remove_path("/users").is_some());
        assert!(!doc.paths.contains_key("/users"));

        // Absent path is a no-op
        assert!(doc.remove_path("/users").is_none());
        assert!(doc.remove_path("/never-existed").is_none());
    }

    #[test]
    fn test_remove_last_operation_drops_path() {
        let mut doc = Document::new();
        doc.add_or_merge_operation(
            "/orders",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/orders"),
        );
        doc.add_or_merge_operation(
            "/orders",
            HttpMethod::Delete,
            Operation::scaffold(HttpMethod::Delete, "/orders"),
        );

        doc.remove_operation("/orders", HttpMethod::Get);
        assert!(doc.paths.contains_key("/orders"));

        doc.remove_operation("/orders", HttpMethod::Delete);
        assert!(!doc.paths.contains_key("/orders"));
    }

    #[test]
    fn test_add_or_replace_schema_replaces_wholesale() {
        let mut doc = Document::new();

        let mut props = IndexMap::new();
        props.insert("id".to_string(), Schema::integer());
        doc.add_or_replace_schema("User", Schema::object(props, vec!["id".to_string()]));

        let replacement = Schema::string();
        doc.add_or_replace_schema("User", replacement.clone());

        assert_eq!(doc.components.schemas["User"], replacement);
        assert_eq!(doc.components.schemas.len(), 1);
    }

    #[test]
    fn test_mutation_is_copy_on_write() {
        let mut doc = Document::new();
        let mut op = Operation::scaffold(HttpMethod::Get, "/users");
        doc.add_or_merge_operation("/users", HttpMethod::Get, op.clone());

        // Mutating the caller's copy must not reach into the document
        op.summary = "mutated after insert".to_string();
        op.add_parameter(Parameter::new(
            "q",
            ParameterLocation::Query,
            Schema::string(),
        ));

        let stored = doc.operation("/users", HttpMethod::Get).unwrap();
        assert_eq!(stored.summary, "");
        assert!(stored.parameters.is_empty());
    }

    #[test]
    fn test_stats() {
        let mut doc = Document::new();
        assert_eq!(
            doc.stats(),
            DocumentStats {
                paths: 0,
                operations: 0,
                schemas: 0
            }
        );

        doc.add_or_merge_operation(
            "/users",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/users"),
        );
        doc.add_or_merge_operation(
            "/users",
            HttpMethod::Post,
            Operation::scaffold(HttpMethod::Post, "/users"),
        );
        doc.add_or_merge_operation(
            "/orders",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/orders"),
        );
        doc.add_or_replace_schema("User", Schema::of(crate::types::SchemaKind::Object));

        assert_eq!(
            doc.stats(),
            DocumentStats {
                paths: 2,
                operations: 3,
                schemas: 1
            }
        );
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let mut doc = Document::new();
        let before = doc.fingerprint().unwrap();
        assert_eq!(before.len(), 64);
        assert_eq!(before, doc.fingerprint().unwrap()); // Deterministic

        doc.add_or_merge_operation(
            "/users",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/users"),
        );
        assert_ne!(before, doc.fingerprint().unwrap());
    }

    #[test]
    fn test_workspace_selection_cleared_on_remove() {
        let mut ws = Workspace::new();
        ws.add_or_merge_operation(
            "/users",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/users"),
        );
        ws.select("/users", Some(HttpMethod::Get));
        assert_eq!(ws.selected_path(), Some("/users"));

        ws.remove_path("/users");
        assert_eq!(ws.selected_path(), None);
        assert_eq!(ws.selected_method(), None);
    }

    #[test]
    fn test_workspace_reset() {
        let mut ws = Workspace::new();
        ws.add_or_merge_operation(
            "/users",
            HttpMethod::Get,
            Operation::scaffold(HttpMethod::Get, "/users"),
        );
        ws.select("/users", None);

        ws.reset();
        assert_eq!(ws.document(), &new_document());
        assert_eq!(ws.selected_path(), None);
    }

    #[test]
    fn test_operation_set_response() {
        let mut op = Operation::scaffold(HttpMethod::Post, "/users");
        op.set_response("201", Response::new("Created"));

        assert_eq!(op.responses.len(), 2);
        assert_eq!(op.responses["201"].description, "Created");
    }
}
