//! Module that contains the record type stored in the index.
use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch, used as the key of the index.
pub type Timestamp = i64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Struct representing a temperature and humidity sample taken at a specific timestamp.
///
/// The values are stored exactly as supplied, any scaling is left to the display layer.
pub struct Record
{
    /// Timestamp the sample was taken.
    pub timestamp: Timestamp,
    /// Temperature value in fahrenheit.
    pub temperature: u32,
    /// Relative humidity value in percent.
    pub humidity: u32,
}

impl Record {
    pub fn new(timestamp: Timestamp, temperature: u32, humidity: u32) -> Record {
        Record { timestamp, temperature, humidity }
    }
}
