use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::batch::ExportFormat;
use crate::config::traits::{Configuration, MergeableConfiguration, PathConfiguration};
use crate::path_utils;
use crate::units::{ParseMode, Parser, UnitScale};

/// Application configuration loaded from statnorm.yml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Treatment of unknown unit suffixes
    #[serde(default)]
    pub mode: ParseMode,
    /// Multiplier table
    #[serde(default)]
    pub scale: UnitScale,
    /// Format for batch reports
    #[serde(default)]
    pub format: ExportFormat,
    /// Directory batch reports are written to when no output file is given
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Path to the config file (set during loading)
    #[serde(skip)]
    pub path: PathBuf,
}

/// Values given on the command line, each overriding the file when set
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mode: Option<ParseMode>,
    pub scale: Option<UnitScale>,
    pub format: Option<ExportFormat>,
    pub output_dir: Option<PathBuf>,
}

impl Configuration for AppConfig {
    fn config_path(&self) -> &PathBuf {
        &self.path
    }

    fn config_type(&self) -> &str {
        "application"
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                anyhow::bail!("Invalid output_dir path (not a directory): {}", dir.display());
            }
        }

        if self.scale == UnitScale::Legacy {
            warn!("Using legacy unit scale: kilo suffixes multiply by 10,000");
        }

        Ok(())
    }
}

impl PathConfiguration for AppConfig {
    fn with_expanded_paths(&self, config_dir: &Path) -> anyhow::Result<Self> {
        let mut config = self.clone();
        if let Some(dir) = config.output_dir.as_mut() {
            let expanded = path_utils::expand_path_buf(dir);
            *dir = if expanded.is_absolute() {
                expanded
            } else {
                config_dir.join(expanded)
            };
        }
        Ok(config)
    }
}

impl MergeableConfiguration<ConfigOverrides> for AppConfig {
    fn merge_with(&self, other: &ConfigOverrides) -> anyhow::Result<Self> {
        let mut merged = self.clone();
        if let Some(mode) = other.mode {
            merged.mode = mode;
        }
        if let Some(scale) = other.scale {
            merged.scale = scale;
        }
        if let Some(format) = other.format {
            merged.format = format;
        }
        if let Some(dir) = &other.output_dir {
            merged.output_dir = Some(path_utils::expand_path_buf(dir));
        }
        merged.validate()?;
        Ok(merged)
    }
}

impl From<&AppConfig> for Parser {
    fn from(config: &AppConfig) -> Self {
        Parser::new(config.mode, config.scale)
    }
}

/// Load application configuration from a YAML file
pub fn load_app_config(app_config_path: &Path) -> Result<AppConfig> {
    let app_config_path = path_utils::expand_path_buf(app_config_path);
    if !app_config_path.exists() {
        anyhow::bail!("App config file not found: {:?}", app_config_path);
    }

    let config_dir = app_config_path
        .parent()
        .context("Failed to get app config directory")?;

    let contents = std::fs::read_to_string(&app_config_path)
        .with_context(|| format!("Failed to read app config file: {:?}", app_config_path))?;

    let mut config: AppConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse YAML from file: {:?}", app_config_path))?;

    // Set the configuration path
    config.path = app_config_path.clone();

    let config = config.with_expanded_paths(config_dir)?;

    config.validate()?;

    debug!("Using {} configuration\n{:?}", config.config_type(), config);
    Ok(config)
}

/// Load the requested config file, or the default one if it exists
///
/// An explicitly requested file must exist. Without one, a missing default
/// file falls back to built-in settings.
pub fn load_or_default(requested: Option<&Path>, default_path: &Path) -> Result<AppConfig> {
    match requested {
        Some(path) => load_app_config(path),
        None if default_path.exists() => load_app_config(default_path),
        None => {
            debug!(
                "No config file at {:?}, using built-in settings",
                default_path
            );
            Ok(AppConfig::default())
        }
    }
}
