//! carconf — terminal host for the car configurator.

mod commands;
mod logging;
mod manifest;
mod presenter;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use commands::OutputFormat;
use manifest::{CarconfManifest, PresentationConfig};

#[derive(Parser)]
#[command(name = "carconf", version, about = "Assemble a car by selecting its parts")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,
    /// Path to carconf.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a carconf.toml template in the current directory
    Init {
        /// Overwrite an existing carconf.toml
        #[arg(long)]
        force: bool,
    },
    /// List the part catalog
    Parts {
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Toggle the given parts in order on a fresh session
    Assemble {
        /// Part ids to toggle
        #[arg(required = true)]
        ids: Vec<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
        /// Skip the success delay and title flash pauses
        #[arg(long)]
        instant: bool,
    },
    /// Drive a session interactively from stdin
    Session {
        /// Skip the success delay and title flash pauses
        #[arg(long)]
        instant: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = cli.config.as_deref();

    match cli.command {
        // `init` must work even when an existing carconf.toml does not parse.
        Commands::Init { force } => {
            logging::init_tracing(cli.verbose)?;
            commands::init::run(&cwd, force)
        }

        Commands::Parts { format } => {
            let format = OutputFormat::parse(format.as_deref())?;
            let manifest = setup(&cwd, config, cli.verbose)?;
            let registry = manifest.registry()?;
            commands::parts::run(&registry, format, &mut io::stdout().lock())
        }

        Commands::Assemble {
            ids,
            format,
            instant,
        } => {
            let format = OutputFormat::parse(format.as_deref())?;
            let manifest = setup(&cwd, config, cli.verbose)?;
            let registry = manifest.registry()?;
            commands::assemble::run(
                registry,
                &presentation(&manifest, instant),
                &ids,
                format,
                &mut io::stdout().lock(),
            )
        }

        Commands::Session { instant } => {
            let manifest = setup(&cwd, config, cli.verbose)?;
            let registry = manifest.registry()?;
            commands::session::run(
                registry,
                &presentation(&manifest, instant),
                io::stdin().lock(),
                &mut io::stdout().lock(),
            )
        }
    }
}

/// Load the manifest and install logging with its verbosity.
fn setup(cwd: &Path, config: Option<&Path>, verbose: bool) -> anyhow::Result<CarconfManifest> {
    let manifest = load_manifest(cwd, config)?;
    logging::init_tracing(verbose || manifest.logging.verbose)?;
    Ok(manifest)
}

fn presentation(manifest: &CarconfManifest, instant: bool) -> PresentationConfig {
    if instant {
        manifest.presentation.immediate()
    } else {
        manifest.presentation.clone()
    }
}

/// Load the manifest from an explicit path, or search upward from `cwd`.
/// Falls back to defaults when none is found.
fn load_manifest(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<CarconfManifest> {
    if let Some(path) = explicit {
        return CarconfManifest::load(path);
    }
    match CarconfManifest::find_and_load(cwd)? {
        Some((manifest, _)) => Ok(manifest),
        None => Ok(CarconfManifest::default()),
    }
}
