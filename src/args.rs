use clap::Parser;
use std::path::PathBuf;

use crate::date_codec::DateFields;

pub const DEFAULT_OUTPUT: &str = "output.csv";

/// Extracts taxed dividend payments from a VTB broker account operations
/// export and writes them, sorted by date, to a CSV report.
#[derive(Parser)]
#[command(version = "1.0")]
pub struct Opts {
    /// VTB Broker Account operations CSV document
    pub csvfile: PathBuf,

    /// Report file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// How the date columns are read and written
    #[arg(long, value_enum, default_value_t = DateFields::default())]
    pub date_fields: DateFields,

    #[arg(short, long)]
    pub quiet: bool,
    /// Verbose mode (-v for trace output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Timestamp (sec, ms, ns, none)
    #[arg(short, long)]
    pub ts: Option<stderrlog::Timestamp>,
}

pub fn parse_args() -> Opts {
    Opts::parse()
}
