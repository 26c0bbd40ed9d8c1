//! # Stego Binary Entry Point
//!
//! Hides a file in an image, or recovers a hidden file from one.
//!
//! ## Usage
//!
//! ```bash
//! # Hide secret.txt in cover.bmp, writing secret.txt.bmp
//! cargo run --bin stego -- cover.bmp -i secret.txt
//!
//! # Recover the hidden file under its original name
//! cargo run --bin stego -- secret.txt.bmp
//!
//! # Recover to a chosen path, keeping the hidden file's extension
//! cargo run --bin stego -- secret.txt.bmp -o recovered -e
//! ```

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

use pixel_stash::config::StegoConfig;
use pixel_stash::logging::init_logger;
use pixel_stash::report::{Operation, OperationReport};
use pixel_stash::stego;

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// If --infile is given, the carrier image; otherwise the stego'd image to decode
    image: PathBuf,

    /// File to hide in IMAGE; without it IMAGE is decoded
    #[arg(short, long)]
    infile: Option<PathBuf>,

    /// Output path; defaults to INFILE plus IMAGE's extension when encoding,
    /// or the hidden file's own name when decoding
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// When decoding to OUTFILE, append the hidden file name's extension
    #[arg(short = 'e', long)]
    keep_extension: bool,

    /// Path to a configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to write a JSON report of the run (optional)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log at debug level regardless of the configuration
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = StegoConfig::load(args.config.as_deref())?;
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()?
    };
    init_logger(level, config.logging.file_location);

    let started = Instant::now();

    let (operation, summary) = match &args.infile {
        Some(infile) => {
            let summary = stego::embed_file(&args.image, infile, args.outfile.as_deref())?;
            println!(
                "Successfully saved stego'd image to {}",
                summary.output.display()
            );
            (Operation::Embed, summary)
        }
        None => {
            let output_dir = match config.decode.output_dir {
                Some(dir) => dir,
                None => std::env::current_dir().context("Cannot read current directory")?,
            };
            let summary = stego::extract_file(
                &args.image,
                args.outfile.as_deref(),
                args.keep_extension || config.decode.keep_extension,
                &output_dir,
            )?;
            println!(
                "Recovered {} to {}",
                summary.file_name,
                summary.output.display()
            );
            (Operation::Extract, summary)
        }
    };

    if let Some(path) = args.report {
        OperationReport::new(operation, summary, started.elapsed())
            .export_to_json(&path)
            .with_context(|| format!("Couldn't write report to {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}
