//! cuemap CLI
//!
//! Command-line interface for cue index reconciliation

use clap::{Parser, Subcommand, ValueEnum};
use cuemap_core::logging_facility::{init, Profile};

mod commands;
mod error;

#[derive(Debug, Parser)]
#[command(name = "cuemap")]
#[command(about = "cuemap - Reconcile cue index tables across container layout changes", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rebuild the cue dictionary for a new container layout
    Reconcile(commands::reconcile::ReconcileArgs),
    /// Print the structural offset report only
    Structure(commands::structure::StructureArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_format.into());

    let result = match cli.command {
        Commands::Reconcile(args) => commands::reconcile::execute(args),
        Commands::Structure(args) => commands::structure::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
