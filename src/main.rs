extern crate clap;
extern crate log;
extern crate log4rs;

use std::io;
use std::path::Path;
use std::process::exit;

use clap::App;

use envindex::config::{Configuration, DEFAULT_CONFIG_PATH, DEFAULT_LOG_CONFIG_PATH};
use envindex::console::Console;
use envindex::error::ConsoleError;
use envindex::generator::workload_rng;

fn load_configuration(path: Option<&str>) -> Configuration {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (DEFAULT_CONFIG_PATH, false),
    };

    if !explicit && !Path::new(path).exists() {
        log::warn!(target: "envindex", "No configuration file at \'{}\', using defaults", path);
        return Configuration::default();
    }

    match Configuration::load(path) {
        Ok(configuration) => {
            log::debug!(target: "envindex", "Loaded configuration from \'{}\'", path);
            configuration
        }
        Err(err) => {
            log::error!(target: "envindex", "Cannot load the configuration \'{}\': \'{}\'", path, err);
            exit(101);
        }
    }
}

fn main() {
    let cli_yaml = clap::load_yaml!("cli.yml");
    let matches = App::from(cli_yaml).get_matches();

    let log_config = matches.value_of("log-config").unwrap_or(DEFAULT_LOG_CONFIG_PATH);
    match log4rs::init_file(log_config, Default::default()) {
        Ok(_) => {},
        Err(err) => {
            eprintln!("Could not create logger from yaml configuration \'{}\': {}", log_config, err);
            exit(-100);
        }
    };

    let mut configuration = load_configuration(matches.value_of("config"));

    if let Some(seed) = matches.value_of("seed") {
        configuration.seed = match seed.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(err) => {
                log::error!(target: "envindex", "Invalid seed \'{}\': \'{}\'", seed, err);
                exit(102);
            }
        };
    }
    if matches.is_present("json") {
        configuration.json_table = true;
    }

    let mut rng = workload_rng(configuration.seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), configuration);

    match console.run(&mut rng) {
        Ok(_) => log::info!(target: "envindex", "Exiting"),
        Err(ConsoleError::Io(err)) => {
            log::error!(target: "envindex", "Console I/O failed: \'{}\'", err);
            exit(201);
        }
        Err(err @ ConsoleError::Generator(_)) => {
            log::error!(target: "envindex", "Could not build the index: \'{}\'", err);
            exit(202);
        }
        Err(err) => {
            log::error!(target: "envindex", "{}", err);
            exit(1);
        }
    };
    exit(0);
}
