//! # Configuration
//!
//! Optional TOML settings for the `stego` binary. Every field has a default,
//! so a missing file, an empty file and a partial file are all accepted.
//!
//! ```toml
//! [logging]
//! level = "info"
//! file_location = false
//!
//! [decode]
//! keep_extension = false
//! output_dir = "recovered"
//! ```

use anyhow::{anyhow, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Errors
/// - File I/O or parsing error
pub fn load_config<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub logging: LoggingConfig,
    pub decode: DecodeConfig,
}

impl StegoConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
    /// Prefix each line with the source `file:line`
    pub file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Unknown log level {:?}", self.level))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Append the hidden name's extension to an explicit output path
    pub keep_extension: bool,
    /// Directory for recovered files when no output path is given
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StegoConfig::load(None).unwrap();
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Info);
        assert!(!config.decode.keep_extension);
        assert!(config.decode.output_dir.is_none());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[decode]\nkeep_extension = true").unwrap();

        let config = StegoConfig::load(Some(file.path())).unwrap();
        assert!(config.decode.keep_extension);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[logging]\nlevel = \"DEBUG\"\nfile_location = true\n\n[decode]\noutput_dir = \"out\""
        )
        .unwrap();

        let config: StegoConfig = load_config(file.path()).unwrap();
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Debug);
        assert!(config.logging.file_location);
        assert_eq!(config.decode.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_bad_level() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            file_location: false,
        };
        assert!(config.level_filter().is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(StegoConfig::load(Some(Path::new("/nonexistent/stego.toml"))).is_err());
    }
}
