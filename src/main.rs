//! helpboard server
//!
//! Loads the business and help request documents, then serves them over HTTP.

use clap::{Arg, ArgMatches, Command};
use helpboard::core::{create_app_state, logging, Config};
use helpboard::{api::start_server, system::metrics, Error, Result};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("helpboard")
        .version(helpboard::VERSION)
        .about("Business listings and help requests over HTTP.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
        )
        .arg(
            Arg::new("http-addr")
                .long("http-addr")
                .value_name("ADDR")
                .help("HTTP server bind address")
        )
        .arg(
            Arg::new("businesses")
                .long("businesses")
                .value_name("FILE")
                .help("Business listings JSON document")
        )
        .arg(
            Arg::new("requests")
                .long("requests")
                .value_name("FILE")
                .help("Help requests JSON document")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
        )
        .get_matches();

    // Load configuration
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    apply_cli_overrides(&mut config, &matches)?;
    config.validate()?;

    logging::init(&config.logging)?;
    info!("Starting {} v{}", helpboard::NAME, helpboard::VERSION);
    metrics::init_registry();

    let addr = config.server.http_addr;
    let state = match create_app_state(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(e);
        }
    };

    start_server(addr, state).await
}

/// Apply command line argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    if let Some(addr) = matches.get_one::<String>("http-addr") {
        config.server.http_addr = addr
            .parse()
            .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
    }

    if let Some(path) = matches.get_one::<String>("businesses") {
        config.data.businesses = path.into();
    }

    if let Some(path) = matches.get_one::<String>("requests") {
        config.data.help_requests = path.into();
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    Ok(())
}
