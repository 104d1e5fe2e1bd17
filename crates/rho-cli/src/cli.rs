use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rho",
    about = "Save, load, and inspect tabular and array data",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store directory (default: ./.rho-data)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List saved values
    Ls,
    /// Render a saved value
    Show(ShowArgs),
    /// Import a CSV file into the store
    Import(ImportArgs),
    /// Export a saved table or column to a CSV file
    Export(ExportArgs),
    /// Delete a saved value
    Rm(RmArgs),
    /// Summary statistics for the numeric columns of a saved value
    Describe(DescribeArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Name of the saved value
    pub name: String,

    /// Render every row instead of eliding the middle
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// CSV file to import
    pub path: PathBuf,

    /// Key to save under (default: the file stem)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Name of the saved value
    pub name: String,

    /// Destination CSV file
    pub path: PathBuf,
}

#[derive(Args)]
pub struct RmArgs {
    /// Name of the saved value
    pub name: String,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Name of the saved value
    pub name: String,
}
