//! Sink adapters: persist or display a record sequence.
//!
//! Most callers should use [`write()`] (from [`unified`]), which dispatches on a [`SinkFormat`].
//! The tabular sinks ([`csv`], [`sqlite`]) take their columns from the first record and do
//! nothing for an empty sequence.

pub mod console;
pub mod csv;
pub mod json;
pub mod sqlite;
pub mod unified;

pub use unified::{write, write_by_name, SinkFormat};
