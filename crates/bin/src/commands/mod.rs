//! Subcommand implementations.
//!
//! Every command reads the project document named on the command line; the
//! writing commands emit a document to a file or standard output.

pub mod check;
pub mod children;
pub mod info;
pub mod list;
pub mod rewrite;

use std::io::Write;
use std::path::{Path, PathBuf};

use pbxgraph::{Document, JsonCodec, PlistCodec, Project, ProjectOptions};

use crate::cli::Cli;
use crate::output::OutputFormat;

/// Result type shared by the commands
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Settings every command needs, resolved from the global arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub path: PathBuf,
    pub options: ProjectOptions,
    pub format: OutputFormat,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let options = match cli.seed {
            Some(seed) => ProjectOptions::seeded(seed),
            None => ProjectOptions::default(),
        };
        Self {
            path: cli.project.clone(),
            options,
            format: cli.format,
        }
    }

    /// Decodes the project document without hydrating it.
    pub fn document(&self) -> Result<Document, pbxgraph::Error> {
        JsonCodec::new().read_file(&self.path)
    }

    /// Decodes and hydrates the project document.
    pub fn project(&self) -> Result<Project, pbxgraph::Error> {
        Project::from_document_with(&self.document()?, self.options.clone())
    }
}

/// Writes `document` to `output`, or to standard output when unset.
pub fn write_document(document: &Document, output: Option<&Path>) -> CommandResult {
    let codec = JsonCodec::pretty();
    match output {
        Some(path) => {
            codec.write_file(path, document)?;
            tracing::info!(path = %path.display(), "Wrote project document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&codec.encode(document)?)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
