use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::{Context, check, children, info, list, rewrite};

fn main() -> ExitCode {
    // Initialize tracing. Logs go to stderr so documents can be piped.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("pbxgraph=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let ctx = Context::from_cli(&cli);

    let result = match &cli.command {
        Commands::Info => info::run(&ctx),
        Commands::List(args) => list::run(args, &ctx),
        Commands::Children(args) => children::run(args, &ctx),
        Commands::Check => check::run(&ctx),
        Commands::Normalize(args) => rewrite::normalize(args, &ctx),
        Commands::Rekey(args) => rewrite::rekey(args, &ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
