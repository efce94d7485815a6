//! RMS Log Outline - job outlines for RMS HTML logs
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rms_log_outline::commands::{self, Options};
use rms_log_outline::core::logging;

/// RMS Log Outline - job outlines for RMS HTML logs
#[derive(Parser, Debug)]
#[command(name = "rmslog")]
#[command(about = "Outline the job records of RMS HTML logs", long_about = None)]
struct Args {
    /// Write a log file (filter with RMSLOG_LOG)
    #[arg(long, global = true)]
    log: bool,

    /// Scan the raw text without closing deactivated records
    #[arg(long, global = true)]
    no_preprocess: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the job outline with elapsed times
    Outline {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the flat job block list as JSON
    Blocks {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Find jobs by title
    Search {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        query: String,

        /// Print the search outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default .rmslog/config.toml
    Init {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.log {
        if let Err(e) = logging::init() {
            eprintln!("Warning: {}", e);
        }
    }

    let options = Options {
        no_preprocess: args.no_preprocess,
    };

    let output = match args.command {
        Command::Outline { file, json } => commands::outline(&file, json, options)?,
        Command::Blocks { file } => commands::blocks(&file, options)?,
        Command::Search { file, query, json } => commands::search(&file, &query, json, options)?,
        Command::Init { dir } => commands::init(dir)?,
    };

    print!("{}", output);
    Ok(())
}
