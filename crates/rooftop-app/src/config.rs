//! Configuration management for rooftop-solar
//!
//! Config stored at: ~/.config/rooftop-solar/config.json

use rooftop_domain::{ModelParameters, PanelCatalog, ReportGenerator};
use rooftop_types::{ConfigError, Error, OutputFormat, Result};
use rooftop_vision::{
    CommandAnalyzer, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MAX_IMAGE_SIZE, DEFAULT_PIXEL_AREA_M2,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::load_catalog_file;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// External command that describes roofs (see `CommandAnalyzer`)
    #[serde(default)]
    pub analyzer_command: Option<String>,

    /// Minimum confidence for an AI description to be accepted
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Ground area of one image pixel (m²)
    #[serde(default = "default_pixel_area")]
    pub pixel_area_m2: f64,

    /// Longest image side sent to the analyzer (px)
    #[serde(default = "default_max_image_size")]
    pub max_image_size: u32,

    #[serde(default = "default_panel_type")]
    pub default_panel_type: String,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// TOML panel catalog; the built-in catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Production and financial assumptions
    #[serde(default)]
    pub model: ModelParameters,
}

fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_pixel_area() -> f64 {
    DEFAULT_PIXEL_AREA_M2
}

fn default_max_image_size() -> u32 {
    DEFAULT_MAX_IMAGE_SIZE
}

fn default_panel_type() -> String {
    "standard".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyzer_command: None,
            confidence_threshold: default_confidence_threshold(),
            pixel_area_m2: default_pixel_area(),
            max_image_size: default_max_image_size(),
            default_panel_type: default_panel_type(),
            output_format: OutputFormat::default(),
            catalog_path: None,
            model: ModelParameters::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("rooftop-solar");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, or defaults if there is none
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Configuration(ConfigError::ParseError(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Check every value that is not covered by the model parameters
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::invalid_config(format!(
                "confidence_threshold must lie in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if !(self.pixel_area_m2.is_finite() && self.pixel_area_m2 > 0.0) {
            return Err(Error::invalid_config(format!(
                "pixel_area_m2 must be positive, got {}",
                self.pixel_area_m2
            )));
        }
        if self.max_image_size == 0 {
            return Err(Error::invalid_config("max_image_size must be at least 1"));
        }
        self.model.validate()
    }

    /// Panel catalog from `catalog_path`, or the built-in one
    pub fn catalog(&self) -> Result<PanelCatalog> {
        match self.catalog_path {
            Some(ref path) => load_catalog_file(path),
            None => Ok(PanelCatalog::builtin()),
        }
    }

    /// Validated report generator; call once at startup
    pub fn report_generator(&self) -> Result<ReportGenerator> {
        self.validate()?;
        let catalog = self.catalog()?;
        if !catalog.contains(&self.default_panel_type) {
            return Err(Error::invalid_config(format!(
                "default_panel_type '{}' is not in the panel catalog",
                self.default_panel_type
            )));
        }
        ReportGenerator::new(self.model.clone(), catalog)
    }

    /// Analyzer for the configured command, if any
    pub fn analyzer(&self) -> Result<Option<CommandAnalyzer>> {
        match self.analyzer_command.as_deref() {
            Some(cmd) if !cmd.trim().is_empty() => Ok(Some(CommandAnalyzer::from_command_line(
                cmd,
                self.max_image_size,
            )?)),
            _ => Ok(None),
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Rooftop Solar Configuration")?;
        writeln!(f, "===========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Analyzer command:     {}",
            self.analyzer_command.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(f, "Confidence threshold: {:.2}", self.confidence_threshold)?;
        writeln!(f, "Pixel area:           {} m²", self.pixel_area_m2)?;
        writeln!(f, "Max image size:       {} px", self.max_image_size)?;
        writeln!(f, "Default panel type:   {}", self.default_panel_type)?;
        writeln!(f, "Output format:        {}", self.output_format)?;
        writeln!(
            f,
            "Panel catalog:        {}",
            self.catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f)?;
        writeln!(f, "--- Model ---")?;
        writeln!(f, "Sun hours per day:    {}", self.model.sun_hours_per_day)?;
        writeln!(f, "System losses:        {:.0}%", self.model.system_loss_ratio * 100.0)?;
        writeln!(
            f,
            "Electricity rate:     ${}/kWh",
            self.model.electricity_rate_usd_per_kwh
        )?;
        writeln!(
            f,
            "Rate increase:        {:.1}%/yr",
            self.model.annual_rate_increase * 100.0
        )?;
        writeln!(f, "System lifetime:      {} years", self.model.system_lifetime_years)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:          {}", path.display())?;
        }

        Ok(())
    }
}
