//! Embedded Spacing Tables
//!
//! Per-plant spacing reference data compiled into the crate. These rows seed
//! `SpacingTables::builtin()` and `PlantCatalog::builtin()`; callers that need
//! different data load JSON fixtures instead.
//!
//! Data sources:
//! - Square-foot plants-per-cell: published square-foot gardening charts
//! - Intensive on-center spacing: bio-intensive hexagonal spacing charts (inches)
//! - Dense row-seeded spacing: row × plant spacing and seeding rate (inches)

/// Square-foot method: plants per 12"×12" cell.
#[derive(Debug, Clone, Copy)]
pub struct PlantsPerCellRow {
    pub plant_id: &'static str,
    pub plants_per_cell: f64,
}

/// Intensive method: hexagonal on-center spacing.
#[derive(Debug, Clone, Copy)]
pub struct OnCenterRow {
    pub plant_id: &'static str,
    pub on_center_inches: f64,
}

/// Dense row-seeded method. `row_spacing_inches = None` marks a broadcast crop.
#[derive(Debug, Clone, Copy)]
pub struct DenseRow {
    pub plant_id: &'static str,
    pub row_spacing_inches: Option<f64>,
    pub plant_spacing_inches: f64,
    pub seeds_per_inch: Option<f64>,
}

/// Standard per-plant attributes.
#[derive(Debug, Clone, Copy)]
pub struct ProfileRow {
    pub plant_id: &'static str,
    pub spacing_inches: f64,
    pub row_spacing_inches: Option<f64>,
    pub trellis_style: bool,
    pub linear_feet_per_plant: Option<f64>,
}

// ============================================================================
// SQUARE-FOOT PLANTS PER CELL
// ============================================================================

pub static SQUARE_FOOT_PLANTS_PER_CELL: &[PlantsPerCellRow] = &[
    PlantsPerCellRow { plant_id: "tomato", plants_per_cell: 1.0 },
    PlantsPerCellRow { plant_id: "pepper", plants_per_cell: 1.0 },
    PlantsPerCellRow { plant_id: "eggplant", plants_per_cell: 1.0 },
    PlantsPerCellRow { plant_id: "broccoli", plants_per_cell: 1.0 },
    PlantsPerCellRow { plant_id: "cabbage", plants_per_cell: 1.0 },
    PlantsPerCellRow { plant_id: "kale", plants_per_cell: 1.0 },
    PlantsPerCellRow { plant_id: "potato", plants_per_cell: 1.0 },
    PlantsPerCellRow { plant_id: "corn", plants_per_cell: 1.0 },
    PlantsPerCellRow { plant_id: "lettuce", plants_per_cell: 4.0 },
    PlantsPerCellRow { plant_id: "chard", plants_per_cell: 4.0 },
    PlantsPerCellRow { plant_id: "basil", plants_per_cell: 4.0 },
    PlantsPerCellRow { plant_id: "strawberry", plants_per_cell: 4.0 },
    PlantsPerCellRow { plant_id: "pea", plants_per_cell: 8.0 },
    PlantsPerCellRow { plant_id: "bush-bean", plants_per_cell: 9.0 },
    PlantsPerCellRow { plant_id: "beet", plants_per_cell: 9.0 },
    PlantsPerCellRow { plant_id: "onion", plants_per_cell: 9.0 },
    PlantsPerCellRow { plant_id: "garlic", plants_per_cell: 9.0 },
    PlantsPerCellRow { plant_id: "spinach", plants_per_cell: 9.0 },
    PlantsPerCellRow { plant_id: "carrot", plants_per_cell: 16.0 },
    PlantsPerCellRow { plant_id: "radish", plants_per_cell: 16.0 },
    PlantsPerCellRow { plant_id: "summer-squash", plants_per_cell: 0.5 },
    PlantsPerCellRow { plant_id: "watermelon", plants_per_cell: 0.5 },
];

// ============================================================================
// INTENSIVE ON-CENTER SPACING
// ============================================================================

pub static INTENSIVE_ON_CENTER: &[OnCenterRow] = &[
    OnCenterRow { plant_id: "tomato", on_center_inches: 18.0 },
    OnCenterRow { plant_id: "pepper", on_center_inches: 12.0 },
    OnCenterRow { plant_id: "eggplant", on_center_inches: 18.0 },
    OnCenterRow { plant_id: "broccoli", on_center_inches: 15.0 },
    OnCenterRow { plant_id: "cabbage", on_center_inches: 15.0 },
    OnCenterRow { plant_id: "kale", on_center_inches: 15.0 },
    OnCenterRow { plant_id: "potato", on_center_inches: 9.0 },
    OnCenterRow { plant_id: "corn", on_center_inches: 15.0 },
    OnCenterRow { plant_id: "lettuce", on_center_inches: 9.0 },
    OnCenterRow { plant_id: "chard", on_center_inches: 8.0 },
    OnCenterRow { plant_id: "pea", on_center_inches: 3.0 },
    OnCenterRow { plant_id: "bush-bean", on_center_inches: 6.0 },
    OnCenterRow { plant_id: "beet", on_center_inches: 4.0 },
    OnCenterRow { plant_id: "onion", on_center_inches: 4.0 },
    OnCenterRow { plant_id: "garlic", on_center_inches: 6.0 },
    OnCenterRow { plant_id: "spinach", on_center_inches: 6.0 },
    OnCenterRow { plant_id: "carrot", on_center_inches: 3.0 },
    OnCenterRow { plant_id: "radish", on_center_inches: 2.0 },
    OnCenterRow { plant_id: "summer-squash", on_center_inches: 24.0 },
    OnCenterRow { plant_id: "watermelon", on_center_inches: 24.0 },
];

// ============================================================================
// DENSE ROW-SEEDED SPACING
// ============================================================================

pub static DENSE_ROW_SEEDED: &[DenseRow] = &[
    DenseRow { plant_id: "carrot", row_spacing_inches: Some(4.0), plant_spacing_inches: 1.0, seeds_per_inch: Some(1.0) },
    DenseRow { plant_id: "radish", row_spacing_inches: Some(4.0), plant_spacing_inches: 2.0, seeds_per_inch: Some(1.0) },
    DenseRow { plant_id: "spinach", row_spacing_inches: Some(4.0), plant_spacing_inches: 2.0, seeds_per_inch: Some(0.5) },
    DenseRow { plant_id: "beet", row_spacing_inches: Some(4.0), plant_spacing_inches: 3.0, seeds_per_inch: Some(0.5) },
    DenseRow { plant_id: "lettuce", row_spacing_inches: None, plant_spacing_inches: 4.0, seeds_per_inch: None },
    DenseRow { plant_id: "arugula", row_spacing_inches: None, plant_spacing_inches: 2.0, seeds_per_inch: Some(2.0) },
    DenseRow { plant_id: "pea", row_spacing_inches: Some(4.0), plant_spacing_inches: 2.0, seeds_per_inch: None },
    DenseRow { plant_id: "bush-bean", row_spacing_inches: Some(6.0), plant_spacing_inches: 3.0, seeds_per_inch: None },
    DenseRow { plant_id: "onion", row_spacing_inches: Some(4.0), plant_spacing_inches: 4.0, seeds_per_inch: None },
    DenseRow { plant_id: "garlic", row_spacing_inches: Some(4.0), plant_spacing_inches: 4.0, seeds_per_inch: None },
    DenseRow { plant_id: "tomato", row_spacing_inches: Some(24.0), plant_spacing_inches: 12.0, seeds_per_inch: None },
    DenseRow { plant_id: "pepper", row_spacing_inches: Some(12.0), plant_spacing_inches: 12.0, seeds_per_inch: None },
    DenseRow { plant_id: "kale", row_spacing_inches: Some(12.0), plant_spacing_inches: 12.0, seeds_per_inch: None },
];

// ============================================================================
// STANDARD PROFILES
// ============================================================================

pub static STANDARD_PROFILES: &[ProfileRow] = &[
    ProfileRow { plant_id: "tomato", spacing_inches: 24.0, row_spacing_inches: Some(36.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "pepper", spacing_inches: 18.0, row_spacing_inches: Some(24.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "eggplant", spacing_inches: 24.0, row_spacing_inches: Some(30.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "broccoli", spacing_inches: 18.0, row_spacing_inches: Some(30.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "cabbage", spacing_inches: 18.0, row_spacing_inches: Some(30.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "kale", spacing_inches: 18.0, row_spacing_inches: Some(24.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "potato", spacing_inches: 12.0, row_spacing_inches: Some(30.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "corn", spacing_inches: 12.0, row_spacing_inches: Some(30.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "lettuce", spacing_inches: 6.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "chard", spacing_inches: 9.0, row_spacing_inches: Some(18.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "basil", spacing_inches: 6.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "strawberry", spacing_inches: 12.0, row_spacing_inches: Some(24.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "pea", spacing_inches: 2.0, row_spacing_inches: Some(18.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "bush-bean", spacing_inches: 4.0, row_spacing_inches: Some(18.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "beet", spacing_inches: 3.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "onion", spacing_inches: 4.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "garlic", spacing_inches: 4.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "spinach", spacing_inches: 4.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "carrot", spacing_inches: 3.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "radish", spacing_inches: 2.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "arugula", spacing_inches: 4.0, row_spacing_inches: Some(12.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "summer-squash", spacing_inches: 36.0, row_spacing_inches: Some(48.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "watermelon", spacing_inches: 36.0, row_spacing_inches: Some(72.0), trellis_style: false, linear_feet_per_plant: None },
    ProfileRow { plant_id: "cucumber", spacing_inches: 12.0, row_spacing_inches: Some(36.0), trellis_style: true, linear_feet_per_plant: Some(2.0) },
    ProfileRow { plant_id: "pole-bean", spacing_inches: 6.0, row_spacing_inches: Some(30.0), trellis_style: true, linear_feet_per_plant: Some(0.5) },
    ProfileRow { plant_id: "cantaloupe", spacing_inches: 24.0, row_spacing_inches: Some(60.0), trellis_style: true, linear_feet_per_plant: None },
];
