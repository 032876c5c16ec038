//! Garden Planner Rust Implementation
//!
//! Space allocation and succession planting calculations for garden plans.
//!
//! Module layout:
//! - `utils/`: Embedded spacing tables, keyed lookups and plant classification
//! - `space/`: Per-plant cost, per-method usage reports, per-bed allocation
//! - `succession`: Dated succession series with shared group tokens
//! - `planner`: Coordinator bundling config, tables and catalog
//!
//! Everything is a pure function of its inputs (apart from fresh group
//! tokens), so calculations can be re-run freely on every edit.

pub mod config;
pub mod data;
pub mod error;
pub mod planner;
pub mod space;
pub mod succession;
pub mod utils;

// Re-export commonly used types
pub use config::{PlannerConfig, QuantitySplit};
pub use data::{Bed, BedAllocation, BedShare, GardenPlan, PlanLineItem, PlanningMethod, TrellisStructure};
pub use error::{PlannerError, Result};
pub use planner::GardenPlanner;
pub use space::{
    AllocationSummary, BedOptimization, SpaceContext, SpaceCost, SpaceUnit, SpaceUsageReport, Usage,
};
pub use succession::{SuccessionPlanting, TargetSeries};
pub use utils::{PlantCatalog, PlantSpacingProfile, PlantingStyle, QuantityUnit, SpacingTables};
