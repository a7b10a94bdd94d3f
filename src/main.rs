/// CLI front end for the forecast advisory pipeline.
///
/// Usage: forecast_service <city>
///
/// Reads non-secret settings from `forecast.toml` (or `$FORECAST_CONFIG`),
/// credentials from the environment / `.env`:
///   - OPENWEATHER_API_KEY  (required)
///   - DATABASE_URL         (optional; persistence is skipped without it)
///
/// Prints the normalized forecast table and the activity advisory; this
/// printing is the presentation boundary of the pipeline.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use forecast_service::ingest::openweather;
use forecast_service::logging::{self, DataSource};
use forecast_service::model::ForecastRecord;
use forecast_service::{advisory, config, db, normalize};

fn main() -> ExitCode {
    let Some(city) = env::args().nth(1) else {
        eprintln!("Usage: forecast_service <city>");
        return ExitCode::FAILURE;
    };

    dotenv::dotenv().ok();

    let config_path =
        env::var("FORECAST_CONFIG").unwrap_or_else(|_| "forecast.toml".to_string());
    let config = match config::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_file = (!config.general.log_path.is_empty()).then_some(config.general.log_path.as_str());
    logging::init_logger(logging::LogLevel::from_config(&config.general.log_level), log_file);

    let Ok(api_key) = env::var("OPENWEATHER_API_KEY") else {
        logging::error(DataSource::System, None, "OPENWEATHER_API_KEY is not set");
        return ExitCode::FAILURE;
    };

    run_pipeline(&config, &city, &api_key)
}

/// Fetch, normalize, advise, persist, present. Each stage runs to
/// completion before the next; a fetch or persist failure aborts with a
/// non-zero exit, row drops only shorten the table.
fn run_pipeline(config: &config::Config, city: &str, api_key: &str) -> ExitCode {
    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.provider.timeout_secs))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            logging::error(DataSource::System, None, &format!("HTTP client setup failed: {}", e));
            return ExitCode::FAILURE;
        }
    };

    logging::info(DataSource::Provider, Some(city), "Fetching hourly forecast");
    let entries =
        match openweather::fetch_hourly(&client, &config.provider.base_url, city, api_key) {
            Ok(entries) => entries,
            Err(e) => {
                logging::log_provider_failure(city, &e);
                return ExitCode::FAILURE;
            }
        };

    let records = normalize::normalize(&entries);
    let dropped = entries.len() - records.len();
    logging::info(
        DataSource::Provider,
        Some(city),
        &format!("{} entries received, {} normalized, {} dropped", entries.len(), records.len(), dropped),
    );

    let advisory = match advisory::advise(&records) {
        Ok(a) => a,
        Err(e) => {
            // Every entry was dropped (or the provider sent an empty list);
            // there is nothing to classify or persist.
            logging::error(DataSource::System, Some(city), &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    print_forecast_table(city, &records);
    println!("\n{}", advisory.suggestion());

    persist_records(config, city, &records)
}

fn persist_records(config: &config::Config, city: &str, records: &[ForecastRecord]) -> ExitCode {
    let Ok(database_url) = env::var("DATABASE_URL") else {
        logging::info(DataSource::Database, Some(city), "DATABASE_URL not set, skipping persistence");
        return ExitCode::SUCCESS;
    };

    let mut client = match db::connect_and_verify(&database_url) {
        Ok(c) => c,
        Err(e) => {
            logging::error(DataSource::Database, Some(city), &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match db::replace_dataset(&mut client, &config.store.dataset_name, records) {
        Ok(written) => {
            logging::info(
                DataSource::Database,
                Some(city),
                &format!("{} rows written to dataset '{}'", written, config.store.dataset_name),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            logging::error(DataSource::Database, Some(city), &e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Presentation boundary: render the normalized set as a fixed-width table.
fn print_forecast_table(city: &str, records: &[ForecastRecord]) {
    println!("\nHourly forecast for {}:", city);
    println!(
        "{:<20} {:<24} {:>8} {:>6} {:>6}",
        "time", "description", "temp °C", "hum %", "wind"
    );
    for record in records {
        println!(
            "{:<20} {:<24} {:>8.2} {:>6} {:>6}",
            record.time.format("%Y-%m-%d %H:%M:%S"),
            record.description,
            record.temperature,
            record.humidity,
            record.wind_speed
        );
    }
}
