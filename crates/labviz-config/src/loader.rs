//! Configuration loading and persistence with atomic file operations.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::schema::Config;
use labviz_common::{LabVizError, Result};
use tracing::{debug, info};

/// Overrides the output directory.
pub const ENV_OUTPUT_DIR: &str = "LABVIZ_OUTPUT_DIR";
/// Overrides the output format (`png` or `svg`).
pub const ENV_OUTPUT_FORMAT: &str = "LABVIZ_OUTPUT_FORMAT";
/// Overrides the display mode (`file` or `viewer`).
pub const ENV_DISPLAY: &str = "LABVIZ_DISPLAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(LabVizError::Config(format!(
                "unsupported configuration file '{}', expected .toml, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

/// Configuration loader with atomic file operations.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file, applies environment overrides, and validates it.
    pub fn load(&self) -> Result<Config> {
        let format = FileFormat::from_path(&self.path)?;
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            LabVizError::Config(format!("cannot read '{}': {e}", self.path.display()))
        })?;

        let mut config = parse(&content, format)?;
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;

        info!("Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Loads configuration from file, or the validated defaults when the file does not exist.
    pub fn load_or_default(&self) -> Result<Config> {
        if self.path.exists() {
            return self.load();
        }
        debug!(
            "No configuration at {}, using defaults",
            self.path.display()
        );
        let mut config = Config::default();
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to file atomically.
    pub fn save(&self, config: &Config) -> Result<()> {
        let format = FileFormat::from_path(&self.path)?;
        let content = match format {
            FileFormat::Toml => toml::to_string_pretty(config)
                .map_err(|e| LabVizError::Serialization(e.to_string()))?,
            FileFormat::Yaml => serde_yaml::to_string(config)
                .map_err(|e| LabVizError::Serialization(e.to_string()))?,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| LabVizError::Io(e.error))?;

        info!("Saved configuration to {}", self.path.display());
        Ok(())
    }
}

fn parse(content: &str, format: FileFormat) -> Result<Config> {
    match format {
        FileFormat::Toml => {
            toml::from_str(content).map_err(|e| LabVizError::Serialization(e.to_string()))
        }
        FileFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| LabVizError::Serialization(e.to_string()))
        }
    }
}

/// Applies `LABVIZ_*` overrides read through `lookup`.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
        debug!("{ENV_OUTPUT_DIR} overrides output directory with {dir}");
        config.output.directory = PathBuf::from(dir);
    }
    if let Some(format) = lookup(ENV_OUTPUT_FORMAT) {
        config.output.format = format
            .parse()
            .map_err(|e| LabVizError::Config(format!("{ENV_OUTPUT_FORMAT}: {e}")))?;
    }
    if let Some(display) = lookup(ENV_DISPLAY) {
        config.output.display = display
            .parse()
            .map_err(|e| LabVizError::Config(format!("{ENV_DISPLAY}: {e}")))?;
    }
    Ok(())
}
