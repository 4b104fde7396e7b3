//! Walkthrough of a design session
//!
//! This example shows:
//! - Starting a workspace from the default document
//! - Scaffolding operations and filling them in
//! - Authoring a component schema
//! - Importing an existing document
//! - Exporting as JSON and YAML

use apidraft::prelude::*;
use indexmap::IndexMap;

fn main() -> anyhow::Result<()> {
    println!("🧩 apidraft Designer Example");
    println!("============================\n");

    // 1. Start a session
    println!("1. Starting a fresh workspace...");
    let mut workspace = Workspace::new();
    println!("✓ Document: {} v{}", workspace.document().info.title, workspace.document().info.version);

    // 2. Scaffold a couple of operations
    println!("\n2. Scaffolding /users operations...");
    workspace.add_or_merge_operation(
        "/users",
        HttpMethod::Get,
        Operation::scaffold(HttpMethod::Get, "/users").with_summary("List users"),
    );

    let mut create = Operation::scaffold(HttpMethod::Post, "/users").with_summary("Create a user");
    create.request_body = Some(RequestBody::json(Schema::object(
        {
            let mut props = IndexMap::new();
            props.insert("name".to_string(), Schema::string());
            props.insert(
                "email".to_string(),
                Schema::string().with_format(SchemaFormat::Email),
            );
            props
        },
        vec!["name".to_string()],
    )));
    create.set_response("201", Response::new("Created"));
    workspace.add_or_merge_operation("/users", HttpMethod::Post, create);
    println!("✓ {} operations on /users", workspace.document().paths["/users"].len());

    // 3. Author a reusable schema
    println!("\n3. Adding the User schema...");
    let mut props = IndexMap::new();
    props.insert(
        "id".to_string(),
        Schema::integer().with_format(SchemaFormat::Int64),
    );
    props.insert("name".to_string(), Schema::string());
    workspace.add_or_replace_schema("User", Schema::object(props, vec!["id".to_string()]));

    let stats = workspace.document().stats();
    println!(
        "✓ {} paths, {} operations, {} schemas",
        stats.paths, stats.operations, stats.schemas
    );

    // 4. Export both download formats
    println!("\n4. Exporting...");
    let json = serialize(workspace.document(), ExportFormat::Json)?;
    let yaml = serialize(workspace.document(), ExportFormat::Yaml)?;
    println!("✓ {} -> {} bytes", ExportFormat::Json.file_name(), json.len());
    println!("✓ {} -> {} bytes", ExportFormat::Yaml.file_name(), yaml.len());

    // 5. Re-import the YAML we just produced
    println!("\n5. Importing the exported YAML back...");
    workspace.import(&yaml)?;
    println!("✓ Imported: {}", workspace.document().info.title);

    // 6. Imports that fail leave the session untouched
    println!("\n6. Rejecting a malformed paste...");
    match workspace.import("just a string, not a document") {
        Err(err) => println!("✓ Rejected: {}", err),
        Ok(_) => unreachable!(),
    }
    println!("✓ Document still intact: {} paths", workspace.document().stats().paths);

    println!("\n✨ Example completed successfully!");
    Ok(())
}
