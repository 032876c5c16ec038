//! Garden Planner - main coordinator for space planning
//!
//! Owns the configuration, spacing tables and plant catalog, and exposes the
//! calculations with the configured grid, default method and split policy
//! applied consistently at every call site.

use std::path::Path;

use crate::config::PlannerConfig;
use crate::data::{Bed, GardenPlan, PlanLineItem, PlanningMethod, TrellisStructure};
use crate::error::Result;
use crate::space::{
    aggregate, minimize_beds, plants_that_fit, space_cost, summarize_allocations, summarize_line_item,
    summarize_trellis_allocations,
    AllocationSummary, BedOptimization, SpaceContext, SpaceCost, SpaceUsageReport,
};
use crate::succession::{expand_line_item, TargetSeries};
use crate::utils::classify::{planting_style, quantity_unit, PlantingStyle, QuantityUnit};
use crate::utils::spacing_tables::{PlantCatalog, SpacingTables};

/// Main space planner
pub struct GardenPlanner {
    config: PlannerConfig,
    tables: SpacingTables,
    catalog: PlantCatalog,
}

impl GardenPlanner {
    /// Planner over the given tables and catalog.
    ///
    /// A fallback multiplier or default trellis footage set in the config
    /// replaces the tables' own; unset, the tables keep theirs.
    pub fn new(config: PlannerConfig, tables: SpacingTables, catalog: PlantCatalog) -> Result<Self> {
        config.validate()?;
        let mut tables = tables;
        if let Some(multiplier) = config.dense_fallback_multiplier {
            tables = tables.with_dense_fallback_multiplier(multiplier);
        }
        if let Some(feet) = config.default_linear_feet_per_plant {
            tables = tables.with_default_linear_feet_per_plant(feet);
        }

        tracing::info!(
            "Garden planner ready: {}\" grid, {} plants in catalog, split {:?}",
            config.grid_granularity_inches,
            catalog.len(),
            config.quantity_split
        );

        Ok(Self { config, tables, catalog })
    }

    /// Planner over the embedded tables.
    pub fn builtin(config: PlannerConfig) -> Result<Self> {
        Self::new(config, SpacingTables::builtin(), PlantCatalog::builtin())
    }

    /// Planner with optional fixture overrides for tables and catalog.
    pub fn from_paths(config: PlannerConfig, tables: Option<&Path>, catalog: Option<&Path>) -> Result<Self> {
        let tables = match tables {
            Some(path) => SpacingTables::load(path)?,
            None => SpacingTables::builtin(),
        };
        let catalog = match catalog {
            Some(path) => PlantCatalog::load(path)?,
            None => PlantCatalog::builtin(),
        };
        Self::new(config, tables, catalog)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn tables(&self) -> &SpacingTables {
        &self.tables
    }

    pub fn catalog(&self) -> &PlantCatalog {
        &self.catalog
    }

    fn context(&self) -> SpaceContext<'_> {
        SpaceContext::new(&self.tables, &self.catalog, &self.config)
    }

    /// Space one plant (or seed) costs in a bed of `method`.
    pub fn space_cost(&self, plant_id: &str, method: PlanningMethod) -> SpaceCost {
        tracing::debug!("Space cost for '{}' under {}", plant_id, method.label());
        let profile = self.catalog.profile(plant_id);
        space_cost(&profile, &self.tables, self.config.grid_granularity_inches, method)
    }

    pub fn planting_style(&self, plant_id: &str) -> PlantingStyle {
        planting_style(&self.catalog.profile(plant_id), &self.tables)
    }

    pub fn quantity_unit(&self, plant_id: &str) -> QuantityUnit {
        quantity_unit(&self.catalog.profile(plant_id), &self.tables)
    }

    /// Units of the plant that fit into `capacity` (cells, or feet for trellis plants).
    pub fn plants_that_fit(&self, plant_id: &str, method: PlanningMethod, capacity: f64) -> f64 {
        tracing::debug!("Fitting '{}' into {:.2} under {}", plant_id, capacity, method.label());
        let profile = self.catalog.profile(plant_id);
        plants_that_fit(&profile, &self.tables, self.config.grid_granularity_inches, method, capacity)
    }

    /// Peak-concurrent usage per method for a set of line items.
    pub fn space_report(
        &self,
        line_items: &[PlanLineItem],
        beds: &[Bed],
        trellises: &[TrellisStructure],
    ) -> SpaceUsageReport {
        tracing::info!(
            "Space report for {} line items over {} beds and {} trellises",
            line_items.len(),
            beds.len(),
            trellises.len()
        );
        aggregate(line_items, beds, trellises, &self.context())
    }

    pub fn plan_report(&self, plan: &GardenPlan) -> SpaceUsageReport {
        self.space_report(&plan.line_items, &plan.beds, &plan.trellises)
    }

    /// Season-committed allocation per target, dispatched on planting style.
    pub fn allocations(&self, item: &PlanLineItem, beds: &[Bed], trellises: &[TrellisStructure]) -> Vec<AllocationSummary> {
        tracing::info!("Allocations for line item '{}' ({})", item.id, item.plant_id);
        summarize_line_item(item, beds, trellises, &self.context())
    }

    pub fn bed_allocations(&self, item: &PlanLineItem, beds: &[Bed]) -> Vec<AllocationSummary> {
        tracing::info!("Bed allocations for line item '{}' ({})", item.id, item.plant_id);
        summarize_allocations(item, beds, &self.context())
    }

    pub fn trellis_allocations(&self, item: &PlanLineItem, trellises: &[TrellisStructure]) -> Vec<AllocationSummary> {
        tracing::info!("Trellis allocations for line item '{}' ({})", item.id, item.plant_id);
        summarize_trellis_allocations(item, trellises, &self.context())
    }

    /// Advisory bed minimization for one line item.
    pub fn minimize_beds(&self, item: &PlanLineItem, beds: &[Bed]) -> BedOptimization {
        let result = minimize_beds(item, beds, &self.context());
        if let BedOptimization::Suggested { prefix, .. } = &result {
            tracing::info!(
                "Line item '{}' needs {} of its beds, {:?} could be freed",
                item.id,
                prefix.min_beds_needed,
                prefix.extra_bed_ids
            );
        }
        result
    }

    /// Dated plantings for export, one series per assigned target.
    pub fn export_successions(&self, item: &PlanLineItem) -> Vec<TargetSeries> {
        tracing::info!(
            "Exporting line item '{}' ({} x{} successions)",
            item.id,
            item.plant_id,
            item.succession_count
        );
        expand_line_item(item, self.config.quantity_split, self.config.max_successions)
    }
}
