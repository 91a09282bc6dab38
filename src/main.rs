use anyhow::{Context, Result};
use clap::Parser;
use hours_normalizer::cli::{Cli, Commands};
use hours_normalizer::config::Config;
use hours_normalizer::pipeline::{normalize_batch, revalidate_statuses, RawExtraction};
use hours_normalizer::slots::convert_to_time_slots_with;
use hours_normalizer::status::{ApiStatus, HoursFields, UiStatus};
use hours_normalizer::{init_logger, order_days_of_week, parse_time_string};
use log::{debug, info};
use serde::Serialize;
use serde_json::json;
use std::fs;

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Parse { text } => print_json(&parse_time_string(&text)),
        Commands::Days { days } => print_json(&order_days_of_week(&days)),
        Commands::Slots {
            time,
            days,
            location,
            comments,
        } => {
            let slots = convert_to_time_slots_with(
                &config.slots.office_defaults(),
                &days,
                &time,
                location.as_deref(),
                comments.as_deref(),
            );
            print_json(&slots)
        }
        Commands::Status {
            office_time,
            office_location,
            teaching_time,
            teaching_location,
        } => {
            let fields = HoursFields {
                office_time: office_time.as_deref(),
                office_location: office_location.as_deref(),
                teaching_time: teaching_time.as_deref(),
                teaching_location: teaching_location.as_deref(),
            };
            let status = config.status.classifier().classify(&fields);
            print_json(&json!({
                "status": status,
                "uiStatus": UiStatus::from(status),
                "apiStatus": ApiStatus::from(status),
            }))
        }
        Commands::Batch { file, revalidate } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let raws: Vec<RawExtraction> =
                serde_json::from_str(&content).context("Failed to parse extraction file")?;

            let mut records = normalize_batch(&raws, &config);
            if revalidate {
                info!("Revalidating statuses from slot lists");
                revalidate_statuses(&mut records);
            }
            print_json(&records)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
