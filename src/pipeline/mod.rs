//! Pipeline orchestration: load, clean, transform, write.
//!
//! A [`Pipeline`] runs the four stages strictly in order on a single thread. The first failing
//! stage aborts the run, so nothing is written when loading, cleaning or transformation fails.
//! Observers registered through [`PipelineOptions`] receive one callback per finished stage,
//! and a failure/alert callback when a stage fails.
//!
//! # Examples
//!
//! ```no_run
//! use record_pipeline::pipeline::{Pipeline, PipelineConfig};
//!
//! # fn main() -> Result<(), record_pipeline::PipelineError> {
//! let config = PipelineConfig::from_names(
//!     "csv",
//!     "input/test.csv",
//!     "standardize_case",
//!     "aggregate_by_category",
//!     "json",
//!     Some("output/result.json".into()),
//! )?;
//! let report = Pipeline::new(config).run()?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod observer;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use log::{debug, info};

use crate::cleaning::clean;
use crate::error::PipelineResult;
use crate::sink;
use crate::source;
use crate::transform::transform_at;
use crate::types::Records;

pub use config::{ConfigOverrides, PipelineConfig, SinkConfig, SourceConfig};
pub use observer::{
    severity_for_error, CompositeObserver, FileObserver, LogObserver, PipelineObserver, RunContext,
    RunReport, Severity, Stage, StageStats,
};

/// Options that control observation and alerting for a run.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Optional observer for stage events and failures.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Failures at or above this severity also trigger `on_alert`.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// A configured load → clean → transform → write run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run all stages, using the local clock for date filtering.
    pub fn run(&self) -> PipelineResult<RunReport> {
        self.run_at(Local::now().naive_local())
    }

    /// Run all stages with an explicit "now" for date filtering.
    ///
    /// The transformed records (not the cleaned ones) are what reaches the sink.
    pub fn run_at(&self, now: NaiveDateTime) -> PipelineResult<RunReport> {
        let started = Instant::now();
        let ctx = RunContext::from(&self.config);
        info!("pipeline run: {ctx}");

        let mut report = RunReport::default();
        let input = &self.config.source;
        let output = &self.config.sink;

        let loaded = self.stage(&ctx, &mut report, Stage::Load, 0, record_count, || {
            source::load(input.kind, &input.locator)
        })?;

        let cleaned = self.stage(&ctx, &mut report, Stage::Clean, loaded.len(), record_count, || {
            Ok(clean(&loaded, self.config.cleaning))
        })?;
        drop(loaded);

        let transformed =
            self.stage(&ctx, &mut report, Stage::Transform, cleaned.len(), record_count, || {
                Ok(transform_at(cleaned, self.config.transformation, now))
            })?;

        let written = transformed.len();
        self.stage(&ctx, &mut report, Stage::Write, written, |_| written, || {
            sink::write(&transformed, output.format, output.destination.as_deref())
        })?;

        report.elapsed = started.elapsed();
        if let Some(obs) = &self.options.observer {
            obs.on_run_finished(&ctx, &report);
        }
        Ok(report)
    }

    fn stage<T>(
        &self,
        ctx: &RunContext,
        report: &mut RunReport,
        stage: Stage,
        input_records: usize,
        output_records: impl FnOnce(&T) -> usize,
        f: impl FnOnce() -> PipelineResult<T>,
    ) -> PipelineResult<T> {
        let started = Instant::now();
        match f() {
            Ok(out) => {
                let stats = StageStats {
                    stage,
                    input_records,
                    output_records: output_records(&out),
                    elapsed: started.elapsed(),
                };
                debug!("stage {stage}: {input_records} -> {} records", stats.output_records);
                if let Some(obs) = &self.options.observer {
                    obs.on_stage_finished(ctx, &stats);
                }
                report.stages.push(stats);
                Ok(out)
            }
            Err(e) => {
                if let Some(obs) = &self.options.observer {
                    let sev = severity_for_error(&e);
                    obs.on_failure(ctx, stage, sev, &e);
                    if sev >= self.options.alert_at_or_above {
                        obs.on_alert(ctx, stage, sev, &e);
                    }
                }
                Err(e)
            }
        }
    }
}

fn record_count(records: &Records) -> usize {
    records.len()
}
