//! Source adapters: produce a [`crate::types::Records`] sequence from a file, database, archive
//! or network endpoint.
//!
//! Most callers should use [`load`] (from [`unified`]), which dispatches on a [`SourceKind`].
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`sqlite`]
//! - [`archive`]
//! - [`remote`]
//! - [`parquet`]

pub mod archive;
pub mod csv;
pub mod json;
pub mod parquet;
pub mod remote;
pub mod sqlite;
pub mod unified;

pub use unified::{load, load_by_name, SourceKind};
