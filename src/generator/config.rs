// src/generator/config.rs

use crate::error::{PathError, Result};
use crate::grid::Terrain;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Side length used when nothing else is asked for.
pub const DEFAULT_SIZE: usize = 8;
/// Carve iterations allowed per grid cell before giving up.
pub const DEFAULT_STALL_FACTOR: usize = 100;

/// What the walk does after painting itself into a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktrackStrategy {
    /// Resume from a frontier cell and revert everything carved after it,
    /// so the finished route is one unbranched thread.
    #[default]
    Retract,
    /// Resume from a frontier cell and leave the dead-end branch painted.
    ///
    /// The junction check only looks at the cell being carved, so resuming
    /// from a frontier cell that already has two `Path` neighbours gives it a
    /// third. Routes built this way can contain T and X junctions; they are
    /// still connected and free of 2×2 blocks.
    Jump,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub size: usize,
    /// Terrain for every cell the walk does not touch. `Open` or `Obstacle`.
    pub fill: Terrain,
    /// The carve gives up after `stall_factor * size * size` iterations.
    pub stall_factor: usize,
    pub backtrack: BacktrackStrategy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            size: DEFAULT_SIZE,
            fill: Terrain::Obstacle,
            stall_factor: DEFAULT_STALL_FACTOR,
            backtrack: BacktrackStrategy::Retract,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(size: usize) -> Self {
        GeneratorConfig {
            size,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 3 {
            return Err(PathError::InvalidArgument(format!(
                "a carved grid needs size >= 3, got {}",
                self.size
            )));
        }
        if !self.fill.is_fill() {
            return Err(PathError::InvalidArgument(format!(
                "{:?} cannot be used as a fill terrain",
                self.fill
            )));
        }
        if self.stall_factor == 0 {
            return Err(PathError::InvalidArgument(
                "stall_factor must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Iteration budget for one carve.
    pub fn max_steps(&self) -> usize {
        self.stall_factor
            .saturating_mul(self.size)
            .saturating_mul(self.size)
    }
}
