//! Object listing command.

use super::{CommandResult, Context};
use crate::cli::ListArgs;
use crate::output::{OutputFormat, print_table};

/// Run the list command
pub fn run(args: &ListArgs, ctx: &Context) -> CommandResult {
    let project = ctx.project()?;

    let rows: Vec<Vec<String>> = project
        .objects()
        .iter()
        .filter(|object| {
            args.kind
                .as_deref()
                .is_none_or(|kind| object.kind().tag() == kind)
        })
        .map(|object| {
            vec![
                object.id().to_string(),
                object.kind().tag().to_string(),
                project.display_name(object.id()).unwrap_or_default(),
            ]
        })
        .collect();

    match ctx.format {
        OutputFormat::Human => {
            if rows.is_empty() {
                println!("No objects found.");
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
