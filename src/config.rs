//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the predictor program
pub const PREDICTOR_ENV: &str = "WYCENA_PREDICTOR";

/// How to reach the price model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorSettings {
    /// Program spawned for each prediction
    pub program: String,
    /// Arguments passed to `program`
    pub args: Vec<String>,
    /// Model artifact handed to the predictor
    pub artifact_path: String,
    /// Model mode handed to the predictor
    pub mode: String,
    /// Currency label appended to the price
    pub currency: String,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["-m".to_string(), "src.predict".to_string()],
            artifact_path: "models/xgb_final.pkl".to_string(),
            mode: "xgb".to_string(),
            currency: "PLN".to_string(),
        }
    }
}

/// User configuration for the TUI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TuiConfig {
    pub predictor: PredictorSettings,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("pl", "wycena", "wycena-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config directory, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        if let Ok(program) = std::env::var(PREDICTOR_ENV) {
            config.apply_program_override(program);
        }
        Ok(config)
    }

    /// Load configuration from a specific file, defaulting when it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration to the user config directory unless a file
    /// is already there, so the defaults can be edited after the first run
    pub fn save_if_missing(&self) -> Result<Option<PathBuf>> {
        match Self::config_path() {
            Some(path) if !path.exists() => {
                self.save_to(&path)?;
                Ok(Some(path))
            }
            _ => Ok(None),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn apply_program_override(&mut self, program: String) {
        let program = program.trim();
        if !program.is_empty() {
            self.predictor.program = program.to_string();
        }
    }
}
