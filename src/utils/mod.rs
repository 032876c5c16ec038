//! Utility modules for space planning
//!
//! Contains shared reference data and classification used across calculations:
//! - Lookup tables: embedded per-plant spacing data
//! - Spacing tables: keyed, injectable lookups and the plant catalog
//! - Classify: planting style and cost-model precedence

pub mod lookup_tables;
pub mod spacing_tables;
pub mod classify;

// Re-export commonly used types
pub use spacing_tables::{DenseSpacing, PlantCatalog, PlantSpacingProfile, SpacingTables};
pub use classify::{
    is_seed_density, is_trellis_style, planting_style, quantity_unit, resolve_cost_model,
    seeds_per_square_foot, CostModel, PlantingStyle, QuantityUnit,
};
