use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use keggmap_core::MAP_FILE_NAME;

#[derive(Parser)]
#[command(
    name = "keggmap",
    about = "Prepare KEGG Mapper color files from two MassTRIX annotated files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two annotated files and write map.txt
    Compare(CompareArgs),
    /// Start the upload service
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// First annotated file (exclusive compounds are blue)
    pub file1: PathBuf,
    /// Second annotated file (exclusive compounds are red)
    pub file2: PathBuf,
    #[arg(short, long, default_value = MAP_FILE_NAME)]
    pub output: PathBuf,
    /// Print the map to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML file with server settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}
