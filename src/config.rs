//! Planner Configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! `from_env` mirrors the server-style configuration: an optional file named
//! by `GARDEN_PLANNER_CONFIG`, then individual variable overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::data::PlanningMethod;
use crate::error::{PlannerError, Result};

pub const DEFAULT_GRID_GRANULARITY_INCHES: f64 = 12.0;
pub const MAX_SUCCESSIONS: u32 = 8;

/// How a quantity is divided into parts (bed shares, succession plantings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantitySplit {
    /// Plain floating division: 25 over 4 gives 6.25 each.
    #[default]
    Fractional,
    /// Whole parts, remainder one unit each to the first parts in input order.
    WholeUnits,
}

impl std::str::FromStr for QuantitySplit {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fractional" => Ok(QuantitySplit::Fractional),
            "whole_units" | "whole" => Ok(QuantitySplit::WholeUnits),
            other => Err(PlannerError::InvalidConfig(format!("Unknown quantity split: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Side of one grid cell in inches (12 = one square foot).
    pub grid_granularity_inches: f64,
    /// Overrides the spacing tables' value when set.
    pub default_linear_feet_per_plant: Option<f64>,
    /// Overrides the spacing tables' value when set.
    pub dense_fallback_multiplier: Option<f64>,
    /// Method charged for line items with no bed assignment.
    pub default_method: PlanningMethod,
    pub max_successions: u32,
    pub quantity_split: QuantitySplit,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid_granularity_inches: DEFAULT_GRID_GRANULARITY_INCHES,
            default_linear_feet_per_plant: None,
            dense_fallback_multiplier: None,
            default_method: PlanningMethod::SquareFoot,
            max_successions: MAX_SUCCESSIONS,
            quantity_split: QuantitySplit::Fractional,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration from environment variables.
    ///
    /// - `GARDEN_PLANNER_CONFIG`: path to a JSON config file
    /// - `GRID_GRANULARITY_INCHES`: cell side in inches
    /// - `QUANTITY_SPLIT`: `fractional` or `whole_units`
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// As `from_env`, reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("GARDEN_PLANNER_CONFIG") {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(raw) = lookup("GRID_GRANULARITY_INCHES") {
            config.grid_granularity_inches = raw.trim().parse().map_err(|_| {
                PlannerError::InvalidConfig(format!("GRID_GRANULARITY_INCHES is not a number: {}", raw))
            })?;
        }
        if let Some(raw) = lookup("QUANTITY_SPLIT") {
            config.quantity_split = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.grid_granularity_inches.is_finite() && self.grid_granularity_inches > 0.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "grid_granularity_inches must be positive, got {}",
                self.grid_granularity_inches
            )));
        }
        if let Some(feet) = self.default_linear_feet_per_plant {
            if !(feet.is_finite() && feet > 0.0) {
                return Err(PlannerError::InvalidConfig(format!(
                    "default_linear_feet_per_plant must be positive, got {}",
                    feet
                )));
            }
        }
        if let Some(multiplier) = self.dense_fallback_multiplier {
            if !(multiplier > 0.0 && multiplier <= 1.0) {
                return Err(PlannerError::InvalidConfig(format!(
                    "dense_fallback_multiplier must be in (0, 1], got {}",
                    multiplier
                )));
            }
        }
        if self.max_successions == 0 {
            return Err(PlannerError::InvalidConfig("max_successions must be at least 1".to_string()));
        }
        Ok(())
    }
}
