//! Startup configuration.
//!
//! Loaded once before the simulation starts and never reloaded mid-run.
//! Every field is optional in the TOML source and falls back to the values
//! in [`super::constants`].

use std::path::Path;

use bevy::ecs::prelude::Resource;
use serde::Deserialize;

use crate::error::ConfigError;

use super::{CELL_SIZE, ENERGY_THRESHOLD, FRUIT_LIFETIME, GRID_HEIGHT, GRID_WIDTH, Position};

/// Grid, timing and RNG settings for one simulation run.
#[derive(Resource, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Side of one grid cell, in pixels.
    pub cell_size: i32,
    /// Grid width, in cells.
    pub grid_width: i32,
    /// Grid height, in cells.
    pub grid_height: i32,
    /// Ticks a moving entity waits between steps.
    pub energy_threshold: u32,
    /// Ticks a fruit survives before it expires.
    pub fruit_lifetime: i32,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            energy_threshold: ENERGY_THRESHOLD,
            fruit_lifetime: FRUIT_LIFETIME,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::Invalid("cell_size must be positive".into()));
        }
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ConfigError::Invalid(
                "grid_width and grid_height must be positive".into(),
            ));
        }
        if self.grid_width.checked_mul(self.cell_size).is_none()
            || self.grid_height.checked_mul(self.cell_size).is_none()
        {
            return Err(ConfigError::Invalid("grid size overflows pixel range".into()));
        }
        if self.fruit_lifetime <= 0 {
            return Err(ConfigError::Invalid("fruit_lifetime must be positive".into()));
        }
        Ok(())
    }

    /// Grid width in pixels.
    pub fn width(&self) -> i32 {
        self.grid_width * self.cell_size
    }

    /// Grid height in pixels.
    pub fn height(&self) -> i32 {
        self.grid_height * self.cell_size
    }

    /// Pixel position of the cell at column `col`, row `row`.
    pub fn cell(&self, col: i32, row: i32) -> Position {
        Position::new(col * self.cell_size, row * self.cell_size)
    }

    /// Whether `pos` is grid-aligned and inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x < self.width()
            && pos.y < self.height()
            && pos.x % self.cell_size == 0
            && pos.y % self.cell_size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = GameConfig::default();
        assert_eq!(config.width(), 600);
        assert_eq!(config.height(), 450);
        assert_eq!(config.fruit_lifetime, 900);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = GameConfig::from_toml_str("grid_width = 8\nseed = 42\n").unwrap();
        assert_eq!(config.grid_width, 8);
        assert_eq!(config.grid_height, GRID_HEIGHT);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_unknown_and_invalid_fields() {
        assert!(matches!(
            GameConfig::from_toml_str("speed = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("cell_size = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn loads_example_file_and_reports_missing_ones() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/snake.example.toml");
        assert_eq!(GameConfig::load(path).unwrap(), GameConfig::default());
        assert!(matches!(
            GameConfig::load("does/not/exist.toml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn contains_checks_alignment_and_bounds() {
        let config = GameConfig::default();
        assert!(config.contains(Position::new(0, 0)));
        assert!(config.contains(config.cell(19, 14)));
        assert!(!config.contains(config.cell(20, 0)));
        assert!(!config.contains(Position::new(15, 0)));
        assert!(!config.contains(Position::new(-30, 0)));
    }
}
