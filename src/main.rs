use clap::Parser;
use recruit_funnel::config::{AppConfig, TelemetryConfig};
use recruit_funnel::error::AppError;
use recruit_funnel::telemetry;
use recruit_funnel::workflows::recruitment::{
    CsvDirectoryGateway, ExportOutcome, FunnelExportJob,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "store-recruit-metrics",
    about = "Append this month's recruitment funnel counts for every opened, recruiting store",
    version
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            let fallback = TelemetryConfig {
                log_level: "info".to_string(),
            };
            if telemetry::init(&fallback).is_err() {
                eprintln!("application error: {err}");
                return;
            }
            error!(error = %AppError::from(err), "recruitment funnel export failed");
            return;
        }
    };

    if let Err(err) = telemetry::init(&config.telemetry) {
        eprintln!("application error: {err}");
        return;
    }

    if let Err(err) = run(&config) {
        error!(error = %err, "recruitment funnel export failed");
    }
}

fn run(config: &AppConfig) -> Result<ExportOutcome, AppError> {
    info!(environment = ?config.environment, "starting recruitment funnel export");
    let gateway = CsvDirectoryGateway::new(config.window.utc_offset);
    let job = FunnelExportJob::new(config, Box::new(gateway));
    Ok(job.run()?)
}
