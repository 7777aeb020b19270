use crate::convert::ConvertOptions;
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds added to every timecode. May be negative.
    pub time_offset_ms: i64,
    pub output_dir: Option<PathBuf>,
    pub recursive: bool,
    pub quiet: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                config = Self::from_toml(&contents)?;
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConvertError::Config(e.to_string()))
    }

    /// Override fields from environment variables, read through `lookup`.
    /// Unparseable values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(offset) = lookup("SRT2VTT_OFFSET_MS") {
            if let Ok(ms) = offset.trim().parse() {
                self.time_offset_ms = ms;
            }
        }
        if let Some(dir) = lookup("SRT2VTT_OUTPUT_DIR") {
            if !dir.is_empty() {
                self.output_dir = Some(PathBuf::from(dir));
            }
        }
        if let Some(recursive) = lookup("SRT2VTT_RECURSIVE") {
            if let Some(b) = parse_flag(&recursive) {
                self.recursive = b;
            }
        }
        if let Some(quiet) = lookup("SRT2VTT_QUIET") {
            if let Some(b) = parse_flag(&quiet) {
                self.quiet = b;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConvertError::Config(
                    "Output directory must not be empty".to_string(),
                ));
            }
            if dir.exists() && !dir.is_dir() {
                return Err(ConvertError::Config(format!(
                    "Output directory {} exists and is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            offset_ms: self.time_offset_ms,
            output_dir: self.output_dir.clone(),
            quiet: self.quiet,
        }
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("srt2vtt").join("config.toml"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
