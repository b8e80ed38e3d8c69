//! Error types for the index and the tooling built around it.
use std::io;

use thiserror::Error;

/// Errors raised by the ordered index.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// No memory could be reserved for a new node.
    #[error("Failed to allocate memory for a new index node")]
    AllocationFailure,
}

/// Errors raised while generating or loading the synthetic workload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Day must be between 1 and 31, got {0}")]
    InvalidDay(u32),

    #[error("Number of days must be between 1 and {max}, got {requested}")]
    InvalidDayCount {
        /// Number of days the caller asked for.
        requested: u32,
        /// Largest accepted number of days.
        max: u32,
    },

    /// The start date does not exist in the requested year.
    #[error("{month:02}/{day:02}/{year} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// A generated day lies beyond the dates chrono can represent.
    #[error("Date range starting at {0} leaves the supported calendar")]
    CalendarOverflow(chrono::NaiveDate),

    /// Local midnight of a generated day falls into a daylight saving gap.
    #[error("Local midnight of {0} does not exist")]
    MissingMidnight(chrono::NaiveDate),

    #[error("Could not reserve memory for {0} generated records")]
    Reserve(usize),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Errors raised by the interactive query console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input format, please use 'MM,DD,NUM_DAYS': '{0}'")]
    MalformedRequest(String),

    #[error("No start request was entered")]
    MissingRequest,

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("Could not serialize the table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read the configuration file: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot deserialize the configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
