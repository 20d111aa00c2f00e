use anyhow::Result;
use clap::Parser;
use log::{error, info, warn};
use omnik_sens::config::AppConfig;
use omnik_sens::setup::{configure_all, Summary};
use omnik_sens_drivers::{catalogue_for, DriverFamily, Registry};
use omnik_sens_types::FieldMetadata;
use std::path::PathBuf;

/// omnik-sens - Field registry and sensor binding for Omnik inverters and loggers
#[derive(Parser, Debug, Clone)]
#[command(name = "omnik-sens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Print the field catalogue of a driver family and exit
    #[arg(long = "list-fields", value_name = "FAMILY")]
    list_fields: Option<DriverFamily>,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Some(family) = cli.list_fields {
        list_fields(family);
        return;
    }

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if config.drivers.is_empty() {
        warn!("No drivers configured");
    }

    let mut registry = Registry::new();
    let drivers = configure_all(&config, &mut registry)?;

    for driver in &drivers {
        driver.dump_config();
    }

    let summary = Summary::of(&drivers, &registry);
    info!("Configured {} driver(s)", summary.drivers);
    println!(
        "{} driver(s), {} sensor(s) registered, {} visible",
        summary.drivers, summary.registered, summary.visible
    );
    Ok(())
}

fn list_fields(family: DriverFamily) {
    let catalogue = catalogue_for(family);
    println!("Omnik {} fields ({}):", family, catalogue.len());
    for field in catalogue.iter() {
        let unit = match &field.defaults {
            FieldMetadata::Numeric(numeric) => numeric.unit.as_str(),
            FieldMetadata::Text(_) => "",
        };
        println!(
            "  {:<28} {:<8} {:<8} {:<40} {}",
            field.key,
            field.kind().to_string(),
            field.message.to_string(),
            field.defaults.name(),
            unit
        );
    }
}
