//! Configuration for flatdb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::codec::EncodingKind;

/// Main configuration for a flatdb database
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding one file per table
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── Animal.tbl       (text encoding)
    ///     └── Person.ser       (native encoding)
    pub data_dir: PathBuf,

    /// Which on-disk encoding table files are read and written with
    pub encoding: EncodingKind,

    /// fsync every table file before it replaces the previous version
    pub sync_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./flatdb_data"),
            encoding: EncodingKind::Text,
            sync_writes: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (one file per table)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the table file encoding
    pub fn encoding(mut self, encoding: EncodingKind) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Enable or disable fsync on table writes
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.config.sync_writes = sync;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
