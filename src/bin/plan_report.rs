// Plan report binary
//
// Purpose: Print the space usage, per-target allocations, bed suggestions and
// succession exports for a JSON garden plan
// Usage: cargo run --features cli --bin plan_report -- plan.json

use anyhow::Context;
use garden_planner_rust::{
    AllocationSummary, BedOptimization, GardenPlan, GardenPlanner, PlannerConfig, SpaceUsageReport, TargetSeries,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Serialize)]
struct LineItemReport {
    line_item_id: String,
    plant_id: String,
    quantity_unit: &'static str,
    allocations: Vec<AllocationSummary>,
    bed_optimization: BedOptimization,
    successions: Vec<TargetSeries>,
}

#[derive(Serialize)]
struct PlanReport {
    usage: SpaceUsageReport,
    line_items: Vec<LineItemReport>,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "garden_planner_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let plan_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: plan_report <plan.json>")?;

    // Optional fixture overrides, embedded tables otherwise
    let tables_path = std::env::var("SPACING_TABLES").ok().map(PathBuf::from);
    let catalog_path = std::env::var("PLANT_CATALOG").ok().map(PathBuf::from);

    tracing::info!("Configuration:");
    tracing::info!("  PLAN: {:?}", plan_path);
    tracing::info!("  SPACING_TABLES: {:?}", tables_path);
    tracing::info!("  PLANT_CATALOG: {:?}", catalog_path);

    let config = PlannerConfig::from_env().context("Failed to load planner configuration")?;
    let planner = GardenPlanner::from_paths(config, tables_path.as_deref(), catalog_path.as_deref())
        .context("Failed to load spacing tables or plant catalog")?;

    let plan = GardenPlan::load(Path::new(&plan_path))
        .with_context(|| format!("Failed to load plan from {:?}", plan_path))?;

    let line_items = plan
        .line_items
        .iter()
        .map(|item| LineItemReport {
            line_item_id: item.id.clone(),
            plant_id: item.plant_id.clone(),
            quantity_unit: planner.quantity_unit(&item.plant_id).label(),
            allocations: planner.allocations(item, &plan.beds, &plan.trellises),
            bed_optimization: planner.minimize_beds(item, &plan.beds),
            successions: planner.export_successions(item),
        })
        .collect();

    let report = PlanReport { usage: planner.plan_report(&plan), line_items };

    if report.usage.overall.is_over_capacity() {
        tracing::warn!(
            "Plan needs {:.1} cells but beds hold {:.1}",
            report.usage.overall.needed,
            report.usage.overall.available
        );
    }
    if report.usage.trellis.is_over_capacity() {
        tracing::warn!(
            "Plan needs {:.1} trellis feet but structures provide {:.1}",
            report.usage.trellis.needed_feet,
            report.usage.trellis.available_feet
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
