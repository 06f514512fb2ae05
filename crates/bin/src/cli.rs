//! CLI argument definitions for the pbxgraph binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pbxgraph::project::GroupsPosition;

use crate::output::OutputFormat;

/// Where groups go when listing children
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Groups {
    /// Groups before files
    Above,
    /// Groups after files
    Below,
    /// Groups and files sorted together
    Mixed,
}

impl From<Groups> for GroupsPosition {
    fn from(groups: Groups) -> Self {
        match groups {
            Groups::Above => GroupsPosition::Above,
            Groups::Below => GroupsPosition::Below,
            Groups::Mixed => GroupsPosition::Mixed,
        }
    }
}

/// Inspect and rewrite Xcode project documents
#[derive(Parser, Debug)]
#[command(name = "pbxgraph")]
#[command(about = "pbxgraph: inspect and rewrite Xcode project documents")]
#[command(version)]
pub struct Cli {
    /// Project document in its JSON form
    #[arg(
        short,
        long,
        global = true,
        default_value = "project.pbxproj.json",
        env = "PBXGRAPH_PROJECT"
    )]
    pub project: PathBuf,

    /// Seed for identifiers of new objects. Random when unset
    #[arg(long, global = true, env = "PBXGRAPH_SEED")]
    pub seed: Option<u64>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value = "human",
        env = "PBXGRAPH_FORMAT"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show header values, object counts and targets
    Info,
    /// List objects in document order
    List(ListArgs),
    /// List the children of a group the way Xcode sorts them
    Children(ChildrenArgs),
    /// Report every consistency violation of the document
    Check,
    /// Load and write back the document unchanged in meaning
    Normalize(WriteArgs),
    /// Replace identifiers with ones derived from each object's position
    Rekey(WriteArgs),
}

/// Arguments for the list command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only objects whose isa is this tag
    #[arg(short, long)]
    pub kind: Option<String>,
}

/// Arguments for the children command
#[derive(clap::Args, Debug)]
pub struct ChildrenArgs {
    /// Group identifier. Defaults to the main group
    pub group: Option<String>,

    /// Placement of groups among files
    #[arg(short, long, value_enum, default_value = "mixed")]
    pub groups: Groups,
}

/// Arguments for commands that write a document
#[derive(clap::Args, Debug)]
pub struct WriteArgs {
    /// Destination file. Standard output when unset
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
