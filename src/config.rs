//! Module for the configuration file of the application.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default location of the configuration file.
pub static DEFAULT_CONFIG_PATH: &'static str = "resources/envindex.yml";
/// Default location of the log4rs configuration file.
pub static DEFAULT_LOG_CONFIG_PATH: &'static str = "resources/log.yml";

fn default_year() -> i32 {
    2023
}

fn default_max_days() -> u32 {
    100
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Struct modeling the settings of the workload generator and the query console.
pub struct Configuration
{
    /// The year all generated samples belong to.
    #[serde(default = "default_year")]
    pub year: i32,
    /// Largest number of days a user may request.
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    /// Seed for the random number generator. Samples differ between runs if not set.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Print the final table as JSON in addition to the text table.
    #[serde(default)]
    pub json_table: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            year: default_year(),
            max_days: default_max_days(),
            seed: None,
            json_table: false,
        }
    }
}

impl Configuration {
    /// Parses a configuration from its YAML representation.
    pub fn from_yaml(yaml: &str) -> Result<Configuration, ConfigError> {
        Ok(serde_yaml::from_str::<Configuration>(yaml)?)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Io` - The file cannot be opened or read.
    ///
    /// * `ConfigError::Yaml` - The content is not a valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfigError> {
        let mut configuration_file = File::open(path)?;
        let mut configuration_string = String::new();
        configuration_file.read_to_string(&mut configuration_string)?;
        Configuration::from_yaml(configuration_string.as_str())
    }
}
