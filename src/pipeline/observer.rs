use std::error::Error as StdError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use log::{error, info, warn};

use crate::cleaning::CleaningStrategy;
use crate::error::PipelineError;
use crate::sink::SinkFormat;
use crate::source::SourceKind;
use crate::transform::TransformStrategy;

use super::config::PipelineConfig;

/// The four steps of a pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Load,
    Clean,
    Transform,
    Write,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Clean => "clean",
            Stage::Transform => "transform",
            Stage::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the run failed).
    Error,
    /// Critical error (I/O, unreachable sources and other infrastructure failures).
    Critical,
}

/// What a run is doing, passed to every observer callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub source: SourceKind,
    pub locator: String,
    pub cleaning: CleaningStrategy,
    pub transformation: TransformStrategy,
    pub sink: SinkFormat,
    pub destination: Option<PathBuf>,
}

impl From<&PipelineConfig> for RunContext {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            source: config.source.kind,
            locator: config.source.locator.clone(),
            cleaning: config.cleaning,
            transformation: config.transformation,
            sink: config.sink.format,
            destination: config.sink.destination.clone(),
        }
    }
}

impl fmt::Display for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source={}:{} cleaning={} transformation={} sink={}",
            self.source, self.locator, self.cleaning, self.transformation, self.sink
        )?;
        if let Some(dest) = &self.destination {
            write!(f, ":{}", dest.display())?;
        }
        Ok(())
    }
}

/// Record counts and timing for one finished stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    pub stage: Stage,
    pub input_records: usize,
    pub output_records: usize,
    pub elapsed: Duration,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub stages: Vec<StageStats>,
    pub elapsed: Duration,
}

impl RunReport {
    /// Stats for `stage`, if it finished.
    pub fn stage(&self, stage: Stage) -> Option<&StageStats> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn records_loaded(&self) -> usize {
        self.stage(Stage::Load).map_or(0, |s| s.output_records)
    }

    pub fn records_written(&self) -> usize {
        self.stage(Stage::Write).map_or(0, |s| s.output_records)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elapsed={:?}", self.elapsed)?;
        for s in &self.stages {
            write!(
                f,
                ", {}={}->{} ({:?})",
                s.stage, s.input_records, s.output_records, s.elapsed
            )?;
        }
        Ok(())
    }
}

/// Observer interface for pipeline runs.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called after each stage succeeds.
    fn on_stage_finished(&self, _ctx: &RunContext, _stats: &StageStats) {}

    /// Called when a stage fails. The run stops after this.
    fn on_failure(&self, _ctx: &RunContext, _stage: Stage, _severity: Severity, _error: &PipelineError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &RunContext, stage: Stage, severity: Severity, error: &PipelineError) {
        self.on_failure(ctx, stage, severity, error)
    }

    /// Called once all four stages succeeded.
    fn on_run_finished(&self, _ctx: &RunContext, _report: &RunReport) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_stage_finished(&self, ctx: &RunContext, stats: &StageStats) {
        for o in &self.observers {
            o.on_stage_finished(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &RunContext, stage: Stage, severity: Severity, error: &PipelineError) {
        for o in &self.observers {
            o.on_failure(ctx, stage, severity, error);
        }
    }

    fn on_alert(&self, ctx: &RunContext, stage: Stage, severity: Severity, error: &PipelineError) {
        for o in &self.observers {
            o.on_alert(ctx, stage, severity, error);
        }
    }

    fn on_run_finished(&self, ctx: &RunContext, report: &RunReport) {
        for o in &self.observers {
            o.on_run_finished(ctx, report);
        }
    }
}

/// Forwards pipeline events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_stage_finished(&self, _ctx: &RunContext, stats: &StageStats) {
        info!(
            "[pipeline][{}] records {} -> {} in {:?}",
            stats.stage, stats.input_records, stats.output_records, stats.elapsed
        );
    }

    fn on_failure(&self, ctx: &RunContext, stage: Stage, severity: Severity, err: &PipelineError) {
        if severity >= Severity::Error {
            error!("[pipeline][{stage}][{severity:?}] {ctx} err={err}");
        } else {
            warn!("[pipeline][{stage}][{severity:?}] {ctx} err={err}");
        }
    }

    fn on_alert(&self, ctx: &RunContext, stage: Stage, severity: Severity, err: &PipelineError) {
        error!("[ALERT][pipeline][{stage}][{severity:?}] {ctx} err={err}");
    }

    fn on_run_finished(&self, _ctx: &RunContext, report: &RunReport) {
        info!("[pipeline][done] {report}");
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{} {line}", Utc::now().format("%Y-%m-%dT%H:%M:%SZ"));
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_stage_finished(&self, _ctx: &RunContext, stats: &StageStats) {
        self.append_line(&format!(
            "ok stage={} in={} out={} elapsed_ms={}",
            stats.stage,
            stats.input_records,
            stats.output_records,
            stats.elapsed.as_millis()
        ));
    }

    fn on_failure(&self, ctx: &RunContext, stage: Stage, severity: Severity, err: &PipelineError) {
        self.append_line(&format!("fail stage={stage} severity={severity:?} {ctx} err={err}"));
    }

    fn on_alert(&self, ctx: &RunContext, stage: Stage, severity: Severity, err: &PipelineError) {
        self.append_line(&format!("ALERT stage={stage} severity={severity:?} {ctx} err={err}"));
    }

    fn on_run_finished(&self, _ctx: &RunContext, report: &RunReport) {
        self.append_line(&format!("done {report}"));
    }
}

/// Classify a failure for alerting.
///
/// Failures to reach or read the underlying storage are [`Severity::Critical`]; bad names,
/// bad data and remote client errors are [`Severity::Error`].
pub fn severity_for_error(e: &PipelineError) -> Severity {
    match e {
        PipelineError::Io(_) | PipelineError::SourceUnavailable { .. } => Severity::Critical,
        PipelineError::RemoteStatus { status, .. } if *status >= 500 => Severity::Critical,
        PipelineError::RemoteStatus { .. } => Severity::Error,
        PipelineError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        PipelineError::Json(err) if err.is_io() => Severity::Critical,
        PipelineError::Zip(zip::result::ZipError::Io(_)) => Severity::Critical,
        PipelineError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            Severity::Critical
        }
        PipelineError::Parquet(err) => {
            if error_chain_contains_io(err) {
                Severity::Critical
            } else {
                Severity::Error
            }
        }
        PipelineError::UnknownStrategy { .. }
        | PipelineError::UnsupportedSourceKind { .. }
        | PipelineError::UnsupportedSinkFormat { .. }
        | PipelineError::SchemaMismatch { .. }
        | PipelineError::Config { .. }
        | PipelineError::Json(_)
        | PipelineError::Zip(_)
        | PipelineError::Sqlite(_)
        | PipelineError::Toml(_) => Severity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}
