use std::path::PathBuf;

use calc_core::units::UnitDomain;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(about = "Run Tally calculations from the terminal.", version)]
pub struct CommandLine {
    /// Engine settings JSON (precision per domain)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a calculation document (JSON with a "type" tag); `-` reads stdin
    #[command(alias = "r")]
    Run { file: PathBuf },
    /// Convert a value between two units
    #[command(alias = "c")]
    Convert {
        domain: UnitDomain,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// Convert a value into every unit of its domain
    ConvertAll {
        domain: UnitDomain,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
    },
    /// List the units of a domain
    #[command(alias = "u")]
    Units { domain: UnitDomain },
    /// Central tendency and dispersion of a typed dataset, e.g. "4, 8; 15 16"
    #[command(alias = "s")]
    Stats { dataset: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
