use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by sources, sinks, cleaning and pipeline configuration.
///
/// Transformation strategies never fail: numeric and date coercion problems are absorbed into
/// conservative field values instead of surfacing here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A cleaning strategy name did not match any known strategy.
    #[error("unknown cleaning strategy: {name}")]
    UnknownStrategy { name: String },

    /// A source kind name did not match any supported adapter.
    #[error("unsupported source kind: {kind}")]
    UnsupportedSourceKind { kind: String },

    /// A sink format name did not match any supported adapter.
    #[error("unsupported output format: {format}")]
    UnsupportedSinkFormat { format: String },

    /// The source could not be reached or read.
    #[error("source '{locator}' is unavailable: {reason}")]
    SourceUnavailable { locator: String, reason: String },

    /// A remote endpoint answered with something other than `200 OK`.
    #[error("api call to '{url}' failed with status {status}")]
    RemoteStatus { url: String, status: u16 },

    /// Input or output records do not have the shape an adapter requires.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// Invalid pipeline configuration.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse/serialize error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Zip archive error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Parquet read error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// TOML configuration parse error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
