//! Group children command, sorted the way Xcode's "Sort by Name" does.

use pbxgraph::ObjectId;

use super::{CommandResult, Context};
use crate::cli::ChildrenArgs;
use crate::output::{OutputFormat, print_table};

/// Run the children command
pub fn run(args: &ChildrenArgs, ctx: &Context) -> CommandResult {
    let project = ctx.project()?;
    let group = match &args.group {
        Some(id) => ObjectId::new(id.as_str()),
        None => project.main_group()?,
    };

    let children = project.sorted_children(&group, args.groups.into())?;
    let rows: Vec<Vec<String>> = children
        .iter()
        .map(|child| {
            vec![
                child.id().to_string(),
                child.kind().tag().to_string(),
                project.display_name(child.id()).unwrap_or_default(),
            ]
        })
        .collect();

    match ctx.format {
        OutputFormat::Human => {
            if rows.is_empty() {
                println!("Group {group} is empty.");
                return Ok(());
            }
            print_table(&["ID", "ISA", "NAME"], &rows);
        }
        OutputFormat::Json => {
            let entries: Vec<_> = rows
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "id": row[0],
                        "isa": row[1],
                        "name": row[2],
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&entries)?);
        }
    }

    Ok(())
}
