//! Settings file and environment overrides.

use std::path::Path;

use anyhow::{Context, Result};
use bp_core::ExportConfig;
use bp_graph::GraphConfig;
use serde::Deserialize;

/// Web server bind address.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Everything the binary reads from `bp.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub graph: GraphConfig,
    pub server: ServerSettings,
    pub export: ExportConfig,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid settings file")
    }

    /// Load from `path` when given, otherwise defaults; then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings from {}", path.display()))?;
                Self::from_toml(&text)?
            }
            None => Self::default(),
        };

        settings.graph.apply_env();
        settings.export.apply_env()?;
        Ok(settings)
    }
}
