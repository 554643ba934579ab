use price_insight::config::{load_config, AppConfig};
use price_insight::loader::load_csv;
use price_insight::render::render_report;
use price_insight::{run, AnalysisError, FilterOptions};
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    let dataset = match load_csv(&config.dataset_path) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to load dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = FilterOptions::from_dataset(&dataset);
    info!(
        "Dataset: {} models, years {:?}, transmissions {:?}",
        options.models.len(),
        options.years,
        options.transmission_counts
    );

    let report = match run(&dataset, &config.selection) {
        Ok(r) => r,
        Err(AnalysisError::EmptyResult) => {
            warn!("⚠️ No data matches the selected filters.");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.output_json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_report(&report, config.currency));
    }

    ExitCode::SUCCESS
}
