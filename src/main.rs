mod cli;
mod config;
mod error_help;
mod ingest;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crucible", about = "Dependency resolver for source/binary packages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a package request against one or more manifests.
    Resolve {
        /// Constraint string, e.g. "a", "a == 1.0-0", "a ~> 5.2".
        request: String,

        /// Manifest YAML file, highest priority first. May be given multiple times.
        #[arg(long = "manifest", required = true)]
        manifests: Vec<PathBuf>,

        /// Installed-package-set YAML file (name -> {version}).
        #[arg(long)]
        installed: Option<PathBuf>,

        /// Runtime platform tag. May be given multiple times; defaults to unix, linux.
        #[arg(long = "platform")]
        platforms: Vec<String>,

        /// Render the plan as a dependency tree instead of a flat token list.
        #[arg(long)]
        tree: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve {
            request,
            manifests,
            installed,
            platforms,
            tree,
        } => {
            tracing::info!(%request, manifest_count = manifests.len(), "starting resolve");
            cli::resolve::run(cli::resolve::ResolveArgs {
                request,
                manifests,
                installed,
                platforms,
                tree,
            })
        }
    }
}
