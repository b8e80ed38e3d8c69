//! In-memory ordered index of timestamped temperature and humidity samples.
//!
//! The core is [`bst::Index`], an unbalanced binary search tree keyed by timestamp. The other
//! modules generate synthetic samples, parse and format dates and run the interactive console.
pub mod bst;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod generator;
pub mod record;

pub use bst::{Index, Node};
pub use error::{ConfigError, ConsoleError, GeneratorError, IndexError};
pub use record::{Record, Timestamp};
