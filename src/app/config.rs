//! Command line and run configuration

use crate::core::record::RecordKind;
use clap::Parser;
use std::path::PathBuf;

/// Path argument that stands for standard input
pub const STDIN_PATH: &str = "-";

/// A lightweight commandline TFRecords processor
#[derive(Debug, Parser)]
#[command(name = "tfr", version, about, long_about = None)]
pub struct Args {
    /// Number of records to show (default: all)
    #[arg(short = 'n', long = "number", value_name = "N")]
    pub number: Option<usize>,

    /// Record type
    #[arg(short = 'r', long = "record", value_enum, default_value_t = RecordKind::Example)]
    pub record: RecordKind,

    /// Record files, read in order; `-` reads standard input
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// One record source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

impl ::core::fmt::Display for Input {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("requires argument or stdin")]
    NoInput,
}

/// Resolved run settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_records: usize,
    pub kind: RecordKind,
    /// Sources in reading order, standard input at most once
    pub inputs: Vec<Input>,
}

impl Config {
    /// Turn parsed arguments into a run plan
    ///
    /// # Parameters
    /// * `args` - parsed command line
    /// * `stdin_is_terminal` - whether standard input is interactive; piped input
    ///   is read first, before any file
    ///
    /// # Errors
    /// [`ConfigError::NoInput`] when there is neither a file argument nor piped input.
    pub fn resolve(args: Args, stdin_is_terminal: bool) -> Result<Self, ConfigError> {
        let mut inputs = Vec::with_capacity(args.files.len() + 1);
        if !stdin_is_terminal {
            inputs.push(Input::Stdin);
        }

        for path in args.files {
            if path.as_os_str() == STDIN_PATH {
                if !inputs.contains(&Input::Stdin) {
                    inputs.push(Input::Stdin);
                }
            } else {
                inputs.push(Input::Path(path));
            }
        }

        if inputs.is_empty() {
            return Err(ConfigError::NoInput);
        }

        Ok(Self { max_records: args.number.unwrap_or(usize::MAX), kind: args.record, inputs })
    }
}
