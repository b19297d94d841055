//! The single error type shared by every reader and lookup in this crate. Parsing errors carry the
//! 1-based line number they were found on, so a bad row in a survey file can be found by hand.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that can go wrong while loading WCS data or looking values up on a grid.
#[derive(Debug, Error)]
pub enum WcsError {
    /// A nearest-value lookup or grid construction was attempted on an empty sequence.
    #[error("grid is empty")]
    EmptyGrid,
    /// The grid is not sorted ascending: `values[index]` is smaller than its predecessor.
    #[error("grid is not sorted: element {index} is smaller than the one before it")]
    UnsortedGrid {
        /// Index of the first out-of-order element.
        index: usize,
    },
    /// The grid could not be built for some other reason, such as a NaN or a non-positive step.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    /// An I/O error, tagged with the path being read.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// The file or directory being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The csv reader failed on a tab-separated file.
    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),
    /// A line was read successfully but its contents do not match the expected format.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number within the file.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
    /// A standalone value, such as a chip code typed on the command line, is malformed.
    #[error("invalid {what} {value:?}")]
    InvalidValue {
        /// The kind of value expected.
        what: &'static str,
        /// The text given.
        value: String,
    },
    /// A directory that was supposed to hold data files had none.
    #[error("no data files found in {}", .0.display())]
    NoData(PathBuf),
    /// A language number outside the range covered by the survey.
    #[error("unknown language number {0}")]
    UnknownLanguage(u32),
    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// A configuration value parsed but is out of range.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

impl WcsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> WcsError {
        WcsError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(what: &'static str, value: &str) -> WcsError {
        WcsError::InvalidValue {
            what,
            value: value.to_string(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> WcsError {
        WcsError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, WcsError>;
