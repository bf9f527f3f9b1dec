use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use record_pipeline::pipeline::{
    CompositeObserver, ConfigOverrides, FileObserver, LogObserver, Pipeline, PipelineConfig,
    PipelineObserver, PipelineOptions, RunReport, Severity,
};
use record_pipeline::PipelineResult;

/// Load records from one source, clean them, transform them, and write them to one sink.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// TOML config file; other options override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source adapter: csv, json, sqlite, zip_csv, api, parquet
    #[arg(long, value_name = "KIND")]
    source_kind: Option<String>,

    /// Source file path, or URL for the api source
    #[arg(long, value_name = "PATH_OR_URL")]
    source: Option<String>,

    /// Cleaning strategy: drop_nulls, fill_nulls, cast_types, standardize_case, remove_duplicates
    #[arg(long = "clean", value_name = "STRATEGY")]
    cleaning: Option<String>,

    /// Transformation strategy: filter_future_dates, flag_outliers, aggregate_by_category
    #[arg(long = "transform", value_name = "STRATEGY")]
    transformation: Option<String>,

    /// Output format: csv, json, sqlite, print
    #[arg(long, env = "OUTPUT_FORMAT", value_name = "FORMAT")]
    output_format: Option<String>,

    /// Output path for file formats
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also append run events to this file
    #[arg(long, value_name = "FILE")]
    event_log: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_kind: self.source_kind.clone(),
            locator: self.source.clone(),
            cleaning: self.cleaning.clone(),
            transformation: self.transformation.clone(),
            sink_format: self.output_format.clone(),
            destination: self.output.clone(),
        }
    }

    fn resolve_config(&self) -> PipelineResult<PipelineConfig> {
        let base = match &self.config {
            Some(path) => Some(PipelineConfig::from_path(path)?),
            None => None,
        };
        PipelineConfig::resolve(base, self.overrides())
    }

    fn options(&self) -> PipelineOptions {
        let mut observers: Vec<Arc<dyn PipelineObserver>> = vec![Arc::new(LogObserver)];
        if let Some(path) = &self.event_log {
            observers.push(Arc::new(FileObserver::new(path)));
        }
        PipelineOptions {
            observer: Some(Arc::new(CompositeObserver::new(observers))),
            alert_at_or_above: Severity::Critical,
        }
    }
}

fn run(cli: &Cli) -> PipelineResult<RunReport> {
    let config = cli.resolve_config()?;
    Pipeline::new(config).with_options(cli.options()).run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) => {
            info!(
                "wrote {} of {} loaded records",
                report.records_written(),
                report.records_loaded()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("pipeline failed: {err}");
            ExitCode::FAILURE
        }
    }
}
