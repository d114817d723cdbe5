//! CLI argument definitions for wrpl.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wrpl")]
#[command(about = "Replay result table decoder", version)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Load the replay layout from a JSON file
    #[arg(long, value_name = "FILE", global = true)]
    pub layout: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode one replay file or a folder of replay chunks
    Parse {
        /// Replay file, or folder of chunk files
        path: PathBuf,
        /// Vehicle to nation catalog
        #[arg(long, value_name = "FILE", env = "WRPL_NATION_CATALOG")]
        catalog: Option<PathBuf>,
        /// Only use chunk files whose numeric name has this parity
        #[arg(long, value_enum)]
        parity: Option<Parity>,
        /// Output format
        #[arg(long, short, value_enum, default_value = "console")]
        format: OutputFormat,
        /// Output file path (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Decode every replay in a directory
    Batch {
        /// Directory of replay files or chunk folders
        dir: PathBuf,
        /// Vehicle to nation catalog
        #[arg(long, value_name = "FILE", env = "WRPL_NATION_CATALOG")]
        catalog: Option<PathBuf>,
        /// Only use chunk files whose numeric name has this parity
        #[arg(long, value_enum)]
        parity: Option<Parity>,
        /// Output file path (JSON, defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Resolve the nation of one vehicle
    Nation {
        /// Internal vehicle name, e.g. us_p47
        vehicle: String,
        /// Vehicle to nation catalog
        #[arg(long, value_name = "FILE", env = "WRPL_NATION_CATALOG")]
        catalog: PathBuf,
    },
    /// Write the default replay layout as JSON
    Layout {
        /// Output file path (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn matches(self, number: u64) -> bool {
        match self {
            Self::Odd => number % 2 == 1,
            Self::Even => number % 2 == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}
