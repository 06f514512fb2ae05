//! Commands that load a project and write it back out.

use super::{CommandResult, Context, write_document};
use crate::cli::WriteArgs;

/// Run the normalize command: decode, hydrate and write the document back.
pub fn normalize(args: &WriteArgs, ctx: &Context) -> CommandResult {
    let project = ctx.project()?;
    tracing::info!(objects = project.objects().len(), "Normalizing project");
    write_document(&project.to_document(), args.output.as_deref())
}

/// Run the rekey command: replace identifiers with predictable ones.
pub fn rekey(args: &WriteArgs, ctx: &Context) -> CommandResult {
    let mut project = ctx.project()?;
    let renames = project.predictable_ids()?;
    let changed = renames.iter().filter(|(from, to)| from != to).count();
    tracing::info!(changed, reachable = renames.len(), "Rekeyed project");
    write_document(&project.to_document(), args.output.as_deref())
}
