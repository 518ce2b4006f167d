//! Configuration for building mora strings and counting

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{SegmentConfig, SegmentMode};
use crate::error::Result;
use crate::table::config::MappingConfig;
use crate::table::{loader, PatternTable};

/// Segmentation policy plus the table used for normalization
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) segment: SegmentConfig,
    /// `None` means the active table at the time of use
    pub(crate) table: Option<Arc<PatternTable>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segment: SegmentConfig::strict(),
            table: None,
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Strict segmentation with the active table
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient segmentation with the active table
    pub fn lenient() -> Self {
        Self {
            segment: SegmentConfig::lenient(),
            table: None,
        }
    }

    /// Strict when `validate` is set
    pub fn from_validate(validate: bool) -> Self {
        Self {
            segment: SegmentConfig::from_validate(validate),
            table: None,
        }
    }

    /// Segmentation settings
    pub fn segment_config(&self) -> &SegmentConfig {
        &self.segment
    }

    /// Whether ill-formed input is rejected
    pub fn validate(&self) -> bool {
        self.segment.is_strict()
    }

    /// Table used for normalization
    pub fn table(&self) -> Arc<PatternTable> {
        match &self.table {
            Some(table) => Arc::clone(table),
            None => loader::active_table(),
        }
    }
}

/// Fluent builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    validate: Option<bool>,
    allow_other: Option<bool>,
    table: Option<Arc<PatternTable>>,
    mappings: Vec<MappingConfig>,
    mapping_files: Vec<PathBuf>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject ill-formed input (default) or drop offending characters
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Inverse of [`validate`](Self::validate)
    pub fn ignore(self, ignore: bool) -> Self {
        self.validate(!ignore)
    }

    /// Whether non-Japanese content is tolerated in strict mode
    pub fn allow_other(mut self, allow: bool) -> Self {
        self.allow_other = Some(allow);
        self
    }

    /// Use this table instead of the active one
    pub fn table(mut self, table: impl Into<Arc<PatternTable>>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Register an extra mapping on top of the base table
    pub fn mapping(mut self, mapping: MappingConfig) -> Self {
        self.mappings.push(mapping);
        self
    }

    /// Load an extra mapping from a TOML file when building
    pub fn mapping_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_files.push(path.into());
        self
    }

    /// Build the configuration
    ///
    /// Extra mappings are applied in insertion order, files after inline
    /// mappings, and yield a private table. The active table is unchanged.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(validate) = self.validate {
            config.segment.mode = if validate {
                SegmentMode::Strict
            } else {
                SegmentMode::Lenient
            };
        }
        if let Some(allow) = self.allow_other {
            config.segment.allow_other = allow;
        }

        let mut mappings = self.mappings;
        for path in &self.mapping_files {
            mappings.push(loader::load_mapping_file(path)?);
        }

        config.table = match (self.table, mappings.is_empty()) {
            (table, true) => table,
            (table, false) => {
                let mut table = table.unwrap_or_else(loader::active_table);
                for mapping in mappings {
                    let (next, _) = table.register(mapping.entries);
                    table = Arc::new(next);
                }
                Some(table)
            }
        };

        Ok(config)
    }
}
