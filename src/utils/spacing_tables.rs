//! Spacing Tables and Plant Catalog
//!
//! Immutable keyed lookups built once (from the embedded tables or a JSON
//! fixture) and passed by reference into every calculation. Lookups never
//! fail: a missing or unusable entry is simply `None`, and the calculator
//! applies its documented fallback.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use super::lookup_tables::{DENSE_ROW_SEEDED, INTENSIVE_ON_CENTER, SQUARE_FOOT_PLANTS_PER_CELL, STANDARD_PROFILES};
use crate::error::{PlannerError, Result};

/// Quarter of standard spacing in both dimensions for unlisted dense-method plants.
pub const DEFAULT_DENSE_FALLBACK_MULTIPLIER: f64 = 0.25;

/// Trellis footage charged when a trellis-style plant has no override.
pub const DEFAULT_LINEAR_FEET_PER_PLANT: f64 = 5.0;

/// Standard spacing assumed for plants missing from the catalog.
pub const FALLBACK_SPACING_INCHES: f64 = 12.0;

fn usable(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn default_dense_multiplier() -> f64 {
    DEFAULT_DENSE_FALLBACK_MULTIPLIER
}

fn default_linear_feet() -> f64 {
    DEFAULT_LINEAR_FEET_PER_PLANT
}

/// Dense row-seeded override for one plant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DenseSpacing {
    /// None for broadcast crops.
    #[serde(default)]
    pub row_spacing_inches: Option<f64>,
    /// 0 when absent; seeded crops may leave it out.
    #[serde(default)]
    pub plant_spacing_inches: f64,
    #[serde(default)]
    pub seeds_per_inch: Option<f64>,
}

impl DenseSpacing {
    pub fn row_spacing(&self) -> Option<f64> {
        self.row_spacing_inches.and_then(usable)
    }

    pub fn seeds_per_inch(&self) -> Option<f64> {
        self.seeds_per_inch.and_then(usable)
    }
}

/// The three per-method override tables plus generic fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacingTables {
    #[serde(default)]
    square_foot: FxHashMap<String, f64>,
    #[serde(default)]
    intensive: FxHashMap<String, f64>,
    #[serde(default)]
    dense: FxHashMap<String, DenseSpacing>,
    #[serde(default = "default_dense_multiplier")]
    dense_fallback_multiplier: f64,
    #[serde(default = "default_linear_feet")]
    default_linear_feet_per_plant: f64,
}

impl Default for SpacingTables {
    fn default() -> Self {
        Self {
            square_foot: FxHashMap::default(),
            intensive: FxHashMap::default(),
            dense: FxHashMap::default(),
            dense_fallback_multiplier: DEFAULT_DENSE_FALLBACK_MULTIPLIER,
            default_linear_feet_per_plant: DEFAULT_LINEAR_FEET_PER_PLANT,
        }
    }
}

impl SpacingTables {
    /// Tables compiled into the crate.
    pub fn builtin() -> Self {
        let mut tables = Self::default();
        for row in SQUARE_FOOT_PLANTS_PER_CELL {
            tables.square_foot.insert(row.plant_id.to_string(), row.plants_per_cell);
        }
        for row in INTENSIVE_ON_CENTER {
            tables.intensive.insert(row.plant_id.to_string(), row.on_center_inches);
        }
        for row in DENSE_ROW_SEEDED {
            tables.dense.insert(
                row.plant_id.to_string(),
                DenseSpacing {
                    row_spacing_inches: row.row_spacing_inches,
                    plant_spacing_inches: row.plant_spacing_inches,
                    seeds_per_inch: row.seeds_per_inch,
                },
            );
        }
        tables
    }

    /// Load fixture tables from JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let tables: SpacingTables = serde_json::from_str(&contents)?;
        tables.validate()?;
        tracing::info!(
            "Loaded spacing tables from {:?} ({} square-foot, {} intensive, {} dense)",
            path,
            tables.square_foot.len(),
            tables.intensive.len(),
            tables.dense.len()
        );
        Ok(tables)
    }

    fn validate(&self) -> Result<()> {
        if !(self.dense_fallback_multiplier > 0.0 && self.dense_fallback_multiplier <= 1.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "dense_fallback_multiplier must be in (0, 1], got {}",
                self.dense_fallback_multiplier
            )));
        }
        if usable(self.default_linear_feet_per_plant).is_none() {
            return Err(PlannerError::InvalidConfig(format!(
                "default_linear_feet_per_plant must be positive, got {}",
                self.default_linear_feet_per_plant
            )));
        }
        Ok(())
    }

    pub fn with_square_foot(mut self, plant_id: impl Into<String>, plants_per_cell: f64) -> Self {
        self.square_foot.insert(plant_id.into(), plants_per_cell);
        self
    }

    pub fn with_intensive(mut self, plant_id: impl Into<String>, on_center_inches: f64) -> Self {
        self.intensive.insert(plant_id.into(), on_center_inches);
        self
    }

    pub fn with_dense(mut self, plant_id: impl Into<String>, spacing: DenseSpacing) -> Self {
        self.dense.insert(plant_id.into(), spacing);
        self
    }

    pub fn with_dense_fallback_multiplier(mut self, multiplier: f64) -> Self {
        self.dense_fallback_multiplier = multiplier;
        self
    }

    pub fn with_default_linear_feet_per_plant(mut self, feet: f64) -> Self {
        self.default_linear_feet_per_plant = feet;
        self
    }

    pub fn plants_per_cell(&self, plant_id: &str) -> Option<f64> {
        self.square_foot.get(plant_id).copied().and_then(usable)
    }

    pub fn on_center_inches(&self, plant_id: &str) -> Option<f64> {
        self.intensive.get(plant_id).copied().and_then(usable)
    }

    /// Raw dense override, whatever its plant spacing.
    pub fn dense_entry(&self, plant_id: &str) -> Option<&DenseSpacing> {
        self.dense.get(plant_id)
    }

    /// Dense override usable for per-plant costing (positive plant spacing).
    pub fn dense(&self, plant_id: &str) -> Option<&DenseSpacing> {
        self.dense
            .get(plant_id)
            .filter(|d| usable(d.plant_spacing_inches).is_some())
    }

    pub fn dense_fallback_multiplier(&self) -> f64 {
        self.dense_fallback_multiplier
    }

    pub fn default_linear_feet_per_plant(&self) -> f64 {
        self.default_linear_feet_per_plant
    }
}

/// Standard spacing attributes for one plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpacingProfile {
    pub plant_id: String,
    pub standard_spacing_inches: f64,
    #[serde(default)]
    pub standard_row_spacing_inches: Option<f64>,
    #[serde(default)]
    pub trellis_style: bool,
    #[serde(default)]
    pub linear_feet_per_plant: Option<f64>,
}

impl PlantSpacingProfile {
    pub fn new(plant_id: impl Into<String>, standard_spacing_inches: f64) -> Self {
        Self {
            plant_id: plant_id.into(),
            standard_spacing_inches,
            standard_row_spacing_inches: None,
            trellis_style: false,
            linear_feet_per_plant: None,
        }
    }

    /// Conservative profile for an unknown plant: one 12-inch cell per plant.
    pub fn fallback(plant_id: &str) -> Self {
        Self::new(plant_id, FALLBACK_SPACING_INCHES)
    }

    pub fn with_row_spacing(mut self, inches: f64) -> Self {
        self.standard_row_spacing_inches = Some(inches);
        self
    }

    pub fn trellised(mut self, linear_feet_per_plant: Option<f64>) -> Self {
        self.trellis_style = true;
        self.linear_feet_per_plant = linear_feet_per_plant;
        self
    }

    pub fn spacing(&self) -> f64 {
        usable(self.standard_spacing_inches).unwrap_or(FALLBACK_SPACING_INCHES)
    }

    /// Row spacing, falling back to within-row spacing.
    pub fn row_spacing(&self) -> f64 {
        self.standard_row_spacing_inches
            .and_then(usable)
            .unwrap_or_else(|| self.spacing())
    }

    pub fn linear_feet(&self, default_feet: f64) -> f64 {
        self.linear_feet_per_plant.and_then(usable).unwrap_or(default_feet)
    }
}

/// Plant profiles keyed by plant id.
#[derive(Debug, Clone, Default)]
pub struct PlantCatalog {
    profiles: FxHashMap<String, PlantSpacingProfile>,
}

impl PlantCatalog {
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for row in STANDARD_PROFILES {
            catalog.insert(PlantSpacingProfile {
                plant_id: row.plant_id.to_string(),
                standard_spacing_inches: row.spacing_inches,
                standard_row_spacing_inches: row.row_spacing_inches,
                trellis_style: row.trellis_style,
                linear_feet_per_plant: row.linear_feet_per_plant,
            });
        }
        catalog
    }

    /// Load a JSON array of profiles.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let rows: Vec<PlantSpacingProfile> = serde_json::from_str(&contents)?;
        let mut catalog = Self::default();
        for row in rows {
            catalog.insert(row);
        }
        tracing::info!("Loaded {} plant profiles from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn insert(&mut self, profile: PlantSpacingProfile) {
        self.profiles.insert(profile.plant_id.clone(), profile);
    }

    /// Stored profile, or the conservative fallback for unknown ids.
    pub fn profile(&self, plant_id: &str) -> Cow<'_, PlantSpacingProfile> {
        match self.profiles.get(plant_id) {
            Some(p) => Cow::Borrowed(p),
            None => {
                tracing::debug!("No profile for '{}', using fallback spacing", plant_id);
                Cow::Owned(PlantSpacingProfile::fallback(plant_id))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
