//! Planting-style classification and cost-model precedence.
//!
//! Three structurally different cost families exist:
//! - per-plant area cost (depends on the bed's planning method)
//! - seed density (user enters seeds; area follows from seeding rate)
//! - linear trellis footage (never consumes bed cells)
//!
//! Precedence: trellis-style plant > seed-density plant > bed method.

use serde::{Deserialize, Serialize};

use super::spacing_tables::{PlantSpacingProfile, SpacingTables};
use crate::data::PlanningMethod;

/// Plant-level style, independent of the bed it is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantingStyle {
    Area,
    SeedDensity,
    Trellis,
}

/// User-facing unit of a line item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    Plants,
    Seeds,
    LinearFeet,
}

impl QuantityUnit {
    pub fn label(&self) -> &'static str {
        match self {
            QuantityUnit::Plants => "plants",
            QuantityUnit::Seeds => "seeds",
            QuantityUnit::LinearFeet => "linear feet",
        }
    }
}

/// Resolved cost route for one plant in one bed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostModel {
    /// Linear feet per plant on a trellis.
    LinearFeet { feet_per_plant: f64 },
    /// Seeds convert to area via seeding density.
    SeedDensity { seeds_per_square_foot: f64 },
    /// Per-plant cell cost under the given method.
    PerPlant { method: PlanningMethod },
}

/// (12 / row spacing) rows per foot × (12 × seeds per inch) seeds per row-foot.
pub fn seeds_per_square_foot(row_spacing_inches: f64, seeds_per_inch: f64) -> f64 {
    if row_spacing_inches <= 0.0 || !row_spacing_inches.is_finite() {
        return 0.0;
    }
    (12.0 / row_spacing_inches) * (12.0 * seeds_per_inch)
}

/// Seed density for a plant, if it is a seed-density plant.
///
/// Requires both a positive seeding rate and a positive row spacing in the
/// dense-method override; either alone is not enough.
pub fn seed_density(plant_id: &str, tables: &SpacingTables) -> Option<f64> {
    let dense = tables.dense_entry(plant_id)?;
    let row = dense.row_spacing()?;
    let spi = dense.seeds_per_inch()?;
    Some(seeds_per_square_foot(row, spi))
}

pub fn is_seed_density(plant_id: &str, tables: &SpacingTables) -> bool {
    seed_density(plant_id, tables).is_some()
}

pub fn is_trellis_style(profile: &PlantSpacingProfile) -> bool {
    profile.trellis_style
}

pub fn planting_style(profile: &PlantSpacingProfile, tables: &SpacingTables) -> PlantingStyle {
    if is_trellis_style(profile) {
        PlantingStyle::Trellis
    } else if is_seed_density(&profile.plant_id, tables) {
        PlantingStyle::SeedDensity
    } else {
        PlantingStyle::Area
    }
}

pub fn quantity_unit(profile: &PlantSpacingProfile, tables: &SpacingTables) -> QuantityUnit {
    match planting_style(profile, tables) {
        PlantingStyle::Area | PlantingStyle::Trellis => QuantityUnit::Plants,
        PlantingStyle::SeedDensity => QuantityUnit::Seeds,
    }
}

/// Decide how a plant is costed in a bed of the given method.
pub fn resolve_cost_model(
    profile: &PlantSpacingProfile,
    tables: &SpacingTables,
    bed_method: PlanningMethod,
) -> CostModel {
    if is_trellis_style(profile) {
        return CostModel::LinearFeet {
            feet_per_plant: profile.linear_feet(tables.default_linear_feet_per_plant()),
        };
    }
    if let Some(seeds_per_square_foot) = seed_density(&profile.plant_id, tables) {
        return CostModel::SeedDensity { seeds_per_square_foot };
    }
    CostModel::PerPlant { method: bed_method }
}
