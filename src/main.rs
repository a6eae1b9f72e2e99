// Joseph Prichard
// 1/5/2023
// Application to compress or decompress files

use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;
use huffzip::{compress, decompress, error, report};

#[derive(Parser, Debug)]
#[command(name = "huffzip")]
#[command(version)]
#[command(about = "Compress or decompress files with static huffman coding", long_about = None)]
struct Args {
    /// Files to compress, or compressed files with -d and -l
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Decompress each file into its path without the extension
    #[arg(short, long, conflicts_with = "list")]
    decompress: bool,

    /// Print the code table and summary of each compressed file
    #[arg(short, long)]
    list: bool,

    /// Print the code table after compressing or decompressing
    #[arg(short, long)]
    table: bool,

    /// Print the tree structure when listing
    #[arg(long, requires = "list")]
    tree: bool,

    /// Process files in parallel
    #[arg(long)]
    mt: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn run(args: &Args) -> error::Result<()> {
    // execute a different command based on flag
    if args.list {
        let reports = args.files.iter()
            .map(|file| decompress::list_file(file))
            .collect::<error::Result<Vec<_>>>()?;
        report::list_file_reports(&reports, true, args.tree);
    } else if args.decompress {
        let reports = decompress::decompress_files(&args.files, args.mt)?;
        report::list_file_reports(&reports, args.table, false);
    } else {
        let reports = compress::compress_files(&args.files, args.mt)?;
        report::list_file_reports(&reports, args.table, false);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.log_level))
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
