//! Configuration for the dashboard surface.
//!
//! Supports JSON and TOML files stored in platform-specific directories.
//! Configuration is validated on load and save so the engine never sees a
//! degenerate grid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use touchline_core::constants::{
    DEFAULT_CELL_GAP, DEFAULT_CELL_SIZE, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS,
};
use touchline_core::{Error, Result};

/// Grid dimensions and cell spacing of the dashboard surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Number of columns on the surface.
    pub columns: u32,
    /// Number of rows on the surface.
    pub rows: u32,
    /// Edge length of a cell, in pixels.
    pub cell_size: f64,
    /// Gap between adjacent cells, in pixels.
    pub cell_gap: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            rows: DEFAULT_GRID_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
            cell_gap: DEFAULT_CELL_GAP,
        }
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Grid settings for every dashboard screen.
    #[serde(default)]
    pub grid: GridSettings,
    /// Override for the layout file location.
    #[serde(default)]
    pub layout_path: Option<PathBuf>,
}

impl BoardConfig {
    /// Loads configuration from a `.json` or `.toml` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::config("Config file must be .json or .toml"));
        };

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a `.json` or `.toml` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::config("Config file must be .json or .toml"));
        };

        std::fs::write(path, content)
            .map_err(|e| Error::config(format!("Failed to write config file: {}", e)))?;
        Ok(())
    }

    /// Checks that the grid is usable.
    pub fn validate(&self) -> Result<()> {
        if self.grid.columns == 0 {
            return Err(Error::config("grid.columns must be at least 1"));
        }
        if self.grid.rows == 0 {
            return Err(Error::config("grid.rows must be at least 1"));
        }
        if !self.grid.cell_size.is_finite() || self.grid.cell_size <= 0.0 {
            return Err(Error::config("grid.cell_size must be positive and finite"));
        }
        if !self.grid.cell_gap.is_finite() || self.grid.cell_gap < 0.0 {
            return Err(Error::config(
                "grid.cell_gap must be non-negative and finite",
            ));
        }
        Ok(())
    }
}
