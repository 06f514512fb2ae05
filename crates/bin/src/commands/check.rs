//! Consistency check command.

use pbxgraph::projector::hydrate;

use super::{CommandResult, Context};
use crate::output::OutputFormat;

/// Run the check command. Fails when the document has any violation.
pub fn run(ctx: &Context) -> CommandResult {
    let document = ctx.document()?;
    let result = hydrate(&document);

    let violations: Vec<String> = match &result {
        Ok(_) => Vec::new(),
        Err(err) => err.violations().iter().map(ToString::to_string).collect(),
    };

    match ctx.format {
        OutputFormat::Human => match &result {
            Ok(graph) => println!("OK: {} objects", graph.objects.len()),
            Err(_) => {
                for violation in &violations {
                    println!("{violation}");
                }
            }
        },
        OutputFormat::Json => {
            let value = serde_json::json!({
                "valid": violations.is_empty(),
                "violations": violations,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    result?;
    Ok(())
}
