//! SPACE REQUIREMENT CALCULATOR
//!
//! Maps a plant's spacing attributes, the grid granularity and a planning
//! method to the space one plant (or one seed) consumes.
//!
//! Units:
//!   - cells for every area method (a cell is g × g inches; 12" = 1 sq ft)
//!   - linear feet for trellis-style plants, whatever the bed method
//!
//! Per-method formulas (inches, divided by the cell area g²):
//!   1. square-foot     (1 / plants_per_cell) × (144 / g²); unknown plants 1 per cell
//!   2. row             row_spacing × plant_spacing
//!   3. intensive       on_center² (override, else standard spacing)
//!   4. dense           row × plant from override; broadcast plant²;
//!                      unlisted (0.25 × standard)²
//!   5. permaculture    standard²
//!
//! The intensive formula is an equal-area square of the on-center distance,
//! not true hexagonal packing. Keep it that way; results must match other
//! consumers of these numbers exactly.

use serde::{Deserialize, Serialize};

use crate::data::{PlanningMethod, SQUARE_FOOT_INCHES};
use crate::utils::classify::{resolve_cost_model, CostModel};
use crate::utils::spacing_tables::{PlantSpacingProfile, SpacingTables};
use crate::config::DEFAULT_GRID_GRANULARITY_INCHES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceUnit {
    Cells,
    LinearFeet,
}

/// An amount of space with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpaceCost {
    pub amount: f64,
    pub unit: SpaceUnit,
}

impl SpaceCost {
    pub fn cells(amount: f64) -> Self {
        Self { amount, unit: SpaceUnit::Cells }
    }

    pub fn linear_feet(amount: f64) -> Self {
        Self { amount, unit: SpaceUnit::LinearFeet }
    }
}

/// Area of one grid cell in square inches.
pub fn cell_area(grid_granularity_inches: f64) -> f64 {
    let g = if grid_granularity_inches.is_finite() && grid_granularity_inches > 0.0 {
        grid_granularity_inches
    } else {
        DEFAULT_GRID_GRANULARITY_INCHES
    };
    g * g
}

/// Cells per square foot at this granularity (1.0 at 12").
pub fn cells_per_square_foot(grid_granularity_inches: f64) -> f64 {
    SQUARE_FOOT_INCHES / cell_area(grid_granularity_inches)
}

/// Cells one plant occupies under an area method.
///
/// Does not look at planting style; use `space_cost` for the full precedence.
pub fn per_plant_cells(
    profile: &PlantSpacingProfile,
    tables: &SpacingTables,
    method: PlanningMethod,
    grid_granularity_inches: f64,
) -> f64 {
    let area = cell_area(grid_granularity_inches);
    let id = profile.plant_id.as_str();

    match method {
        PlanningMethod::SquareFoot => {
            let plants_per_cell = tables.plants_per_cell(id).unwrap_or(1.0);
            (1.0 / plants_per_cell) * cells_per_square_foot(grid_granularity_inches)
        }
        PlanningMethod::Row => profile.row_spacing() * profile.spacing() / area,
        PlanningMethod::Intensive => {
            let on_center = tables.on_center_inches(id).unwrap_or_else(|| profile.spacing());
            on_center * on_center / area
        }
        PlanningMethod::MigardenerDense => match tables.dense(id) {
            Some(dense) => match dense.row_spacing() {
                Some(row) => row * dense.plant_spacing_inches / area,
                // Broadcast
                None => dense.plant_spacing_inches * dense.plant_spacing_inches / area,
            },
            None => {
                let reduced = profile.spacing() * tables.dense_fallback_multiplier();
                reduced * reduced / area
            }
        },
        PlanningMethod::Permaculture | PlanningMethod::Trellis => {
            profile.spacing() * profile.spacing() / area
        }
    }
}

/// Cells needed for `seed_count` seeds at the given density. Zero density needs no space.
pub fn seed_density_space(seed_count: f64, seeds_per_square_foot: f64, grid_granularity_inches: f64) -> f64 {
    if !(seeds_per_square_foot > 0.0) || !seeds_per_square_foot.is_finite() {
        return 0.0;
    }
    (seed_count / seeds_per_square_foot) * cells_per_square_foot(grid_granularity_inches)
}

/// Space one unit of the plant's quantity costs in a bed of `bed_method`.
///
/// One plant for area and trellis plants, one seed for seed-density plants.
pub fn space_cost(
    profile: &PlantSpacingProfile,
    tables: &SpacingTables,
    grid_granularity_inches: f64,
    bed_method: PlanningMethod,
) -> SpaceCost {
    space_for_quantity(profile, tables, grid_granularity_inches, bed_method, 1.0)
}

/// Space for `quantity` units of the plant, routed by its cost model.
pub fn space_for_quantity(
    profile: &PlantSpacingProfile,
    tables: &SpacingTables,
    grid_granularity_inches: f64,
    bed_method: PlanningMethod,
    quantity: f64,
) -> SpaceCost {
    match resolve_cost_model(profile, tables, bed_method) {
        CostModel::LinearFeet { feet_per_plant } => SpaceCost::linear_feet(quantity * feet_per_plant),
        CostModel::SeedDensity { seeds_per_square_foot } => SpaceCost::cells(seed_density_space(
            quantity,
            seeds_per_square_foot,
            grid_granularity_inches,
        )),
        CostModel::PerPlant { method } => SpaceCost::cells(
            quantity * per_plant_cells(profile, tables, method, grid_granularity_inches),
        ),
    }
}

/// How many units (plants, or seeds) fit into `capacity`.
///
/// `capacity` is in cells for area plants and linear feet for trellis plants.
pub fn plants_that_fit(
    profile: &PlantSpacingProfile,
    tables: &SpacingTables,
    grid_granularity_inches: f64,
    bed_method: PlanningMethod,
    capacity: f64,
) -> f64 {
    if !(capacity > 0.0) {
        return 0.0;
    }
    let per_unit = match resolve_cost_model(profile, tables, bed_method) {
        CostModel::LinearFeet { feet_per_plant } => feet_per_plant,
        CostModel::SeedDensity { seeds_per_square_foot } => {
            if !(seeds_per_square_foot > 0.0) {
                return 0.0;
            }
            return capacity / cells_per_square_foot(grid_granularity_inches) * seeds_per_square_foot;
        }
        CostModel::PerPlant { method } => per_plant_cells(profile, tables, method, grid_granularity_inches),
    };
    if per_unit > 0.0 {
        capacity / per_unit
    } else {
        0.0
    }
}
