//! apidraft - the document core of an OpenAPI contract designer
//!
//! apidraft holds the single in-memory OpenAPI document a design session
//! edits, and exposes the three things editing surfaces need:
//!
//! - A typed document model with pure, total mutation operations
//!   (add or merge an operation, remove a path, add or replace a schema)
//! - An importer that parses pasted or uploaded YAML/JSON and validates
//!   it against the minimal OpenAPI shape before it replaces the live
//!   document
//! - An exporter producing pretty-printed JSON or block YAML for download
//!
//! Forms, canvases, and other UI are external consumers: they call into
//! the [`Workspace`](document::Workspace) and render what they read back.
//!
//! # Basic Usage
//!
//! ```
//! use apidraft::prelude::*;
//!
//! let mut workspace = Workspace::new();
//! workspace.add_or_merge_operation(
//!     "/users",
//!     HttpMethod::Get,
//!     Operation::scaffold(HttpMethod::Get, "/users").with_summary("list users"),
//! );
//!
//! let json = workspace.document().to_json_pretty()?;
//! assert!(json.contains("list users"));
//! # Ok::<(), apidraft::Error>(())
//! ```

pub mod document;
pub mod errors;
pub mod export;
pub mod import;
pub mod types;

// Re-exports for convenience
pub use errors::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::{new_document, DocumentStats, Workspace};
    pub use crate::errors::{Error, Result};
    pub use crate::export::{serialize, ExportFormat};
    pub use crate::import::try_import;
    pub use crate::types::*;
}
