//! Structure command
//!
//! Usage: cuemap structure --old <CSV> --map <CSV>

use crate::error::CliError;
use clap::Args;
use cuemap_engine::run_structure;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StructureArgs {
    /// Old cue dictionary (CueName,index,targetFile)
    #[arg(long)]
    pub old: PathBuf,

    /// New container map (AwbName,Tracks,...)
    #[arg(long)]
    pub map: PathBuf,
}

/// Execute structure command
pub fn execute(args: StructureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = run_structure(&args.old, &args.map).map_err(CliError::from)?;
    print!("{}", text);
    Ok(())
}
