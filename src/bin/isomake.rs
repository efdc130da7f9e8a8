//! isomake - assemble a disc image from a list of files.
//!
//! Usage:
//!   isomake <output.iso> <input_file1> [input_file2] ...
//!
//! Examples:
//!   isomake output.iso file1.txt file2.jpg
//!   isomake -v system.iso kernel.bin initrd.img

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record};

use isomake::ImageBuilder;

/// ISO image creation utility
#[derive(Parser, Debug)]
#[command(name = "isomake", version)]
#[command(about = "Create a disc image from a list of files")]
struct Args {
    /// Image file to create
    output: PathBuf,

    /// Files to add, in placement order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Show sector placement details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report skipped files and errors
    #[arg(short, long)]
    quiet: bool,
}

const RESET: &str = "\x1b[0m";

/// Colored console logger
struct ConsoleLogger {
    level: LevelFilter,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let (color, tag) = match record.level() {
            Level::Error => ("\x1b[1;31m", "[✗]"),
            Level::Warn => ("\x1b[1;33m", "[!]"),
            Level::Info => ("\x1b[1;32m", "[✓]"),
            Level::Debug | Level::Trace => ("\x1b[1;34m", "[*]"),
        };

        if record.level() <= Level::Warn {
            eprintln!("{}{}{} {}", color, tag, RESET, record.args());
        } else {
            println!("{}{}{} {}", color, tag, RESET, record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logger(args: &Args) {
    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    // Only fails if a logger is already installed
    if log::set_boxed_logger(Box::new(ConsoleLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    init_logger(&args);

    let result = ImageBuilder::new()
        .inputs(args.inputs.iter().cloned())
        .build(&args.output);

    match result {
        Ok(report) => {
            if report.has_skipped() {
                log::warn!(
                    "{} of {} file(s) skipped",
                    report.skipped.len(),
                    report.skipped.len() + report.files.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(1)
        }
    }
}
