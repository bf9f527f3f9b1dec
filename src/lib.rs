//! `record-pipeline` is a small batch ETL library for loosely-typed records: a run loads a
//! sequence of [`types::Record`]s from one source, applies one cleaning strategy and one
//! transformation strategy, and writes the result to one sink.
//!
//! The primary entrypoint is [`pipeline::Pipeline`], configured by a
//! [`pipeline::PipelineConfig`] (built in code, from strategy/adapter names, or from TOML).
//!
//! ## Sources
//!
//! [`source::load`] dispatches on a [`source::SourceKind`]:
//!
//! - **CSV** (`csv`): header row gives field names; every cell is text
//! - **JSON** (`json`): array of objects, a single object, or newline-delimited objects
//! - **SQLite** (`sqlite`): every row of the `raw_data` table
//! - **Zipped CSV** (`zip_csv`): every `.csv` member of a zip archive, concatenated
//! - **HTTP JSON** (`api`): `GET` a URL; anything but `200 OK` is an error
//! - **Parquet** (`parquet`): every row, with primitive columns mapped to [`types::Value`]
//!
//! ## Cleaning and transformation
//!
//! - [`cleaning::CleaningStrategy`]: `drop_nulls`, `fill_nulls`, `cast_types`,
//!   `standardize_case`, `remove_duplicates`. Unknown names are an error.
//! - [`transform::TransformStrategy`]: `filter_future_dates`, `flag_outliers`,
//!   `aggregate_by_category`, `identity`. Unknown names fall back to identity.
//!
//! ## Sinks
//!
//! [`sink::write`] dispatches on a [`sink::SinkFormat`]: `csv`, `json`, `sqlite` (table
//! `results`) or `print` (JSON lines on stdout). File formats without a destination write nothing.
//!
//! ## Quick example: clean and transform in memory
//!
//! ```rust
//! use record_pipeline::cleaning::{clean, CleaningStrategy};
//! use record_pipeline::transform::{transform, TransformStrategy};
//! use record_pipeline::types::{Record, Value};
//!
//! let records = vec![
//!     Record::new().with("Category", " A ").with("id", 1),
//!     Record::new().with("Category", "a").with("id", 2),
//!     Record::new().with("id", 3),
//! ];
//! let cleaned = clean(&records, CleaningStrategy::StandardizeCase);
//! let counts = transform(cleaned, TransformStrategy::AggregateByCategory);
//!
//! assert_eq!(counts.len(), 2);
//! assert_eq!(counts[0].get("category"), Some(&Value::from("a")));
//! assert_eq!(counts[0].get("count"), Some(&Value::Int64(2)));
//! assert_eq!(counts[1].get("category"), Some(&Value::from("unknown")));
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`]: run orchestration, configuration and observers
//! - [`source`]: source adapters
//! - [`cleaning`]: cleaning strategies
//! - [`transform`]: transformation strategies
//! - [`sink`]: sink adapters
//! - [`types`]: record and value types
//! - [`stats`]: numeric coercion and summary statistics
//! - [`error`]: error types used across the crate

pub mod cleaning;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod stats;
pub mod transform;
pub mod types;

pub use error::{PipelineError, PipelineResult};
