//! Space calculations
//!
//! One module per question the planner answers:
//! - calculator: space one plant (or seed) costs
//! - aggregator: space needed vs available per method (peak concurrent)
//! - allocation: per-bed shares, season-committed space, bed minimization

pub mod calculator;
pub mod aggregator;
pub mod allocation;

pub use calculator::{
    cell_area, per_plant_cells, plants_that_fit, seed_density_space, space_cost, space_for_quantity,
    SpaceCost, SpaceUnit,
};
pub use aggregator::{aggregate, utilization_percent, LinearUsage, MethodUsage, SpaceUsageReport, Usage};
pub use allocation::{
    allocate, greedy_required_prefix, minimize_beds, peak_concurrent_space, per_planting_quantity,
    season_committed_space, split_quantity, summarize_allocations, summarize_line_item, summarize_trellis_allocations,
    AllocationSummary, BedOptimization, GreedyPrefix, OptimizationSkip,
};

use crate::config::{PlannerConfig, QuantitySplit};
use crate::data::{PlanLineItem, PlanningMethod};
use crate::utils::spacing_tables::{PlantCatalog, SpacingTables};

/// Everything a space calculation reads besides its direct inputs.
#[derive(Debug, Clone, Copy)]
pub struct SpaceContext<'a> {
    pub tables: &'a SpacingTables,
    pub catalog: &'a PlantCatalog,
    pub grid_granularity_inches: f64,
    pub default_method: PlanningMethod,
    pub quantity_split: QuantitySplit,
    pub max_successions: u32,
}

impl<'a> SpaceContext<'a> {
    pub fn new(tables: &'a SpacingTables, catalog: &'a PlantCatalog, config: &PlannerConfig) -> Self {
        Self {
            tables,
            catalog,
            grid_granularity_inches: config.grid_granularity_inches,
            default_method: config.default_method,
            quantity_split: config.quantity_split,
            max_successions: config.max_successions,
        }
    }

    pub fn cell_area(&self) -> f64 {
        cell_area(self.grid_granularity_inches)
    }

    /// The item's succession count after the configured cap.
    pub fn succession_count(&self, item: &PlanLineItem) -> u32 {
        item.effective_succession_count(self.max_successions)
    }
}
