//! Command-line front end for CF grid mappings.
//!
//! Decodes and encodes PROJ angular values, prints the grid mapping catalog
//! and renders proj-strings for grid mappings described in a YAML file.

mod config;

use anyhow::Result;
use cf_common::{Data, Number};
use clap::{Parser, Subcommand};
use grid_mapping::{decode_proj_angle, encode_proj_angle, AngularContext, GridMappingKind};
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::GridmapConfig;

#[derive(Parser, Debug)]
#[command(name = "gridmap")]
#[command(about = "CF grid mapping and PROJ angular value tools")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Write results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log level
    #[arg(long, env = "GRIDMAP_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Write logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a PROJ angular value such as "45", "-12.5d" or "0.5R"
    Decode {
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Latitude/longitude context: lat, lon or none
        #[arg(long, default_value = "none")]
        context: AngularContext,
    },

    /// Encode an angle as a PROJ angular value
    Encode {
        #[arg(allow_hyphen_values = true)]
        value: Number,

        /// CF units of the value, e.g. degrees_north or radians
        #[arg(short, long)]
        units: String,
    },

    /// Print the proj-string of each grid mapping in a config file
    ProjString {
        /// Grid mapping config file path
        #[arg(short, long, env = "GRIDMAP_CONFIG")]
        config: String,
    },

    /// List the supported grid mappings
    Catalog,
}

#[derive(Serialize)]
struct ProjStringRecord<'a> {
    name: &'a str,
    grid_mapping_name: &'static str,
    proj_string: String,
}

#[derive(Serialize)]
struct CatalogRecord {
    grid_mapping_name: &'static str,
    proj_id: &'static str,
    category: &'static str,
    parameters: Vec<&'static str>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(&args.log_level, args.log_json)?;

    match args.command {
        Command::Decode { text, context } => {
            let data = decode_proj_angle(&text, context)?;
            debug!(input = %text, %context, output = %data, "Decoded angle");
            print_result(args.json, &data, || data.to_string())
        }
        Command::Encode { value, units } => {
            let data = Data::new(value, units);
            let text = encode_proj_angle(&data)?;
            print_result(args.json, &text, || text.clone())
        }
        Command::ProjString { config } => {
            let config = GridmapConfig::from_yaml(&config)?;
            info!(grid_mappings = config.grid_mappings.len(), "Rendering proj-strings");

            let mut records = Vec::with_capacity(config.grid_mappings.len());
            for entry in &config.grid_mappings {
                let mapping = entry.build()?;
                records.push(ProjStringRecord {
                    name: &entry.name,
                    grid_mapping_name: mapping.grid_mapping_name(),
                    proj_string: mapping.proj_string().to_string(),
                });
            }

            print_result(args.json, &records, || {
                records
                    .iter()
                    .map(|r| format!("{}: {}", r.name, r.proj_string))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::Catalog => {
            let records: Vec<CatalogRecord> = GridMappingKind::ALL
                .iter()
                .map(|kind| CatalogRecord {
                    grid_mapping_name: kind.grid_mapping_name(),
                    proj_id: kind.proj_id(),
                    category: kind.category().label(),
                    parameters: kind.parameters().iter().map(|(p, _)| p.cf_name()).collect(),
                })
                .collect();

            print_result(args.json, &records, || {
                records
                    .iter()
                    .map(|r| {
                        format!(
                            "{:<32} {:<8} {:<24} {}",
                            r.grid_mapping_name,
                            r.proj_id,
                            r.category,
                            r.parameters.join(",")
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn print_result<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
