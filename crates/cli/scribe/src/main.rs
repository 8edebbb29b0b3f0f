//! Scribe command-line entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use scribe::config::GeneratorChoice;
use scribe::generate::GenerateOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Greeting source generators for C# projects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log what the driver and generators are doing
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the generators and write their output
    Generate {
        /// Path to the project directory or a source file
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory (defaults to `[output] dir` of scribe.toml)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Configuration file to use instead of `<path>/scribe.toml`
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run a single generator
        #[arg(long, value_enum)]
        only: Option<GeneratorChoice>,
    },

    /// Report syntax errors and list what would be generated
    Check {
        /// Path to the project directory or a source file
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    scribe::init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            path,
            out,
            config,
            only,
        } => {
            scribe::generate::generate(&GenerateOptions {
                path,
                out,
                config,
                only,
            })?;
        }
        Commands::Check { path } => {
            scribe::check::check(&path)?;
        }
    }

    Ok(())
}
