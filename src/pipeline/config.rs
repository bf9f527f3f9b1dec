//! Pipeline configuration.
//!
//! A [`PipelineConfig`] can be built in code, parsed from TOML, or resolved from an optional
//! base config plus name-based overrides (the command line).
//!
//! ```toml
//! cleaning = "standardize_case"
//! transformation = "aggregate_by_category"
//!
//! [source]
//! kind = "csv"
//! locator = "input/test.csv"
//!
//! [sink]
//! format = "json"
//! destination = "output/result.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cleaning::CleaningStrategy;
use crate::error::{PipelineError, PipelineResult};
use crate::sink::SinkFormat;
use crate::source::SourceKind;
use crate::transform::TransformStrategy;

/// Where records are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Adapter to use.
    pub kind: SourceKind,
    /// File path, or URL for [`SourceKind::Api`].
    pub locator: String,
}

/// Where records are written to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SinkConfig {
    /// Adapter to use. Defaults to console output.
    pub format: SinkFormat,
    /// Output path for file formats.
    pub destination: Option<PathBuf>,
}

/// Full description of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Source adapter and locator.
    pub source: SourceConfig,
    /// Cleaning strategy. Unknown names fail at parse time.
    pub cleaning: CleaningStrategy,
    /// Transformation strategy. Unknown names resolve to identity.
    pub transformation: TransformStrategy,
    /// Sink adapter and destination.
    pub sink: SinkConfig,
}

/// TOML layout. Names stay strings here so they go through the same parsing, and produce the
/// same error variants, as [`PipelineConfig::from_names`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    source: SourceSection,
    cleaning: String,
    #[serde(default)]
    transformation: Option<String>,
    #[serde(default)]
    sink: SinkSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceSection {
    kind: String,
    locator: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SinkSection {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    destination: Option<PathBuf>,
}

/// Name-based values that take precedence over a base [`PipelineConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub source_kind: Option<String>,
    pub locator: Option<String>,
    pub cleaning: Option<String>,
    pub transformation: Option<String>,
    pub sink_format: Option<String>,
    pub destination: Option<PathBuf>,
}

impl PipelineConfig {
    /// Build a config from strategy/adapter names.
    ///
    /// Fails with [`PipelineError::UnsupportedSourceKind`], [`PipelineError::UnknownStrategy`]
    /// or [`PipelineError::UnsupportedSinkFormat`] for unknown names. An unknown transformation
    /// name is accepted and resolves to identity.
    pub fn from_names(
        source_kind: &str,
        locator: &str,
        cleaning: &str,
        transformation: &str,
        sink_format: &str,
        destination: Option<PathBuf>,
    ) -> PipelineResult<Self> {
        let config = Self {
            source: SourceConfig {
                kind: source_kind.parse()?,
                locator: locator.to_string(),
            },
            cleaning: cleaning.parse()?,
            transformation: TransformStrategy::from_name(transformation),
            sink: SinkConfig {
                format: sink_format.parse()?,
                destination,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document.
    ///
    /// Malformed TOML and unknown keys are [`PipelineError::Toml`]; unknown names fail exactly as
    /// in [`Self::from_names`].
    pub fn from_toml_str(input: &str) -> PipelineResult<Self> {
        let file: ConfigFile = toml::from_str(input)?;
        Self::from_names(
            &file.source.kind,
            &file.source.locator,
            &file.cleaning,
            file.transformation
                .as_deref()
                .unwrap_or(TransformStrategy::Identity.name()),
            file.sink.format.as_deref().unwrap_or(SinkFormat::Console.name()),
            file.sink.destination,
        )
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Combine an optional base config with overrides. Every override that is set wins.
    ///
    /// Without a base, the source kind, locator and cleaning strategy must all be given;
    /// transformation defaults to identity and the sink to console output.
    pub fn resolve(base: Option<Self>, overrides: ConfigOverrides) -> PipelineResult<Self> {
        let mut config = match base {
            Some(config) => config,
            None => Self {
                source: SourceConfig {
                    kind: required(overrides.source_kind.as_deref(), "source kind")?.parse()?,
                    locator: required(overrides.locator.as_deref(), "source locator")?.to_string(),
                },
                cleaning: required(overrides.cleaning.as_deref(), "cleaning strategy")?.parse()?,
                transformation: TransformStrategy::default(),
                sink: SinkConfig::default(),
            },
        };

        if let Some(kind) = overrides.source_kind {
            config.source.kind = kind.parse()?;
        }
        if let Some(locator) = overrides.locator {
            config.source.locator = locator;
        }
        if let Some(cleaning) = overrides.cleaning {
            config.cleaning = cleaning.parse()?;
        }
        if let Some(transformation) = overrides.transformation {
            config.transformation = TransformStrategy::from_name(&transformation);
        }
        if let Some(format) = overrides.sink_format {
            config.sink.format = format.parse()?;
        }
        if let Some(destination) = overrides.destination {
            config.sink.destination = Some(destination);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values that parsing alone does not catch.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.source.locator.trim().is_empty() {
            return Err(PipelineError::Config {
                message: "source locator is empty".to_string(),
            });
        }
        Ok(())
    }
}

fn required<'a>(value: Option<&'a str>, what: &str) -> PipelineResult<&'a str> {
    value.ok_or_else(|| PipelineError::Config {
        message: format!("missing {what} (pass it as an option or in the config file)"),
    })
}
