use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "snaplaunch",
    version,
    about = "Snapshot the data volume and back it up from a read-only mount"
)]
pub struct Cli {
    /// Log to the console instead of a log file
    #[arg(long)]
    pub log: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print mutating commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, short = 'v')]
    pub verbose: bool,
}
