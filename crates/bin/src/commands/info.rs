//! Project info command - shows header values, object counts and targets.

use std::collections::BTreeMap;

use super::{CommandResult, Context};
use crate::output::{OutputFormat, print_table};

/// Run the info command
pub fn run(ctx: &Context) -> CommandResult {
    let document = ctx.document()?;
    let project = pbxgraph::Project::from_document_with(&document, ctx.options.clone())?;

    let header = |key: &str| {
        document
            .get(key)
            .and_then(|value| value.as_str())
            .unwrap_or("-")
            .to_string()
    };
    let archive_version = header("archiveVersion");
    let object_version = header("objectVersion");

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for object in project.objects().iter() {
        *kinds.entry(object.kind().tag()).or_default() += 1;
    }
    let targets: Vec<String> = project
        .targets()?
        .into_iter()
        .map(|target| target.name().unwrap_or("-").to_string())
        .collect();

    match ctx.format {
        OutputFormat::Human => {
            println!("Archive version: {archive_version}");
            println!("Object version:  {object_version}");
            println!("Root object:     {}", project.root_id());
            println!("Objects:         {}", project.objects().len());
            println!("Targets:         {}", targets.join(", "));
            println!();
            let rows: Vec<Vec<String>> = kinds
                .iter()
                .map(|(kind, count)| vec![kind.to_string(), count.to_string()])
                .collect();
            print_table(&["KIND", "COUNT"], &rows);
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "archive_version": archive_version,
                "object_version": object_version,
                "root_object": project.root_id().as_str(),
                "objects": project.objects().len(),
                "kinds": kinds,
                "targets": targets,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
