//! MULTI-BED SPACE AGGREGATOR
//!
//! Space needed vs available across a whole plan, per planning method and
//! overall, with trellis footage kept in its own pool.
//!
//! Quantities here are per planting instant: each share is divided by the
//! succession count, because successive plantings reuse the same ground.
//! The per-bed season-committed view lives in `allocation`.
//!
//! This is also the only place bed minimization gets its required space
//! from, so feasibility and "how many beds" never disagree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::allocation::allocate;
use super::calculator::{space_for_quantity, SpaceUnit};
use super::SpaceContext;
use crate::data::{Bed, PlanLineItem, PlanningMethod, TrellisStructure};

/// `needed / available × 100`, or 0 when nothing is available.
pub fn utilization_percent(needed: f64, available: f64) -> f64 {
    if available > 0.0 && available.is_finite() && needed.is_finite() {
        needed / available * 100.0
    } else {
        0.0
    }
}

/// Area usage for one pool, in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub needed: f64,
    pub available: f64,
    pub utilization_percent: f64,
}

impl Usage {
    fn new(needed: f64, available: f64) -> Self {
        Self { needed, available, utilization_percent: utilization_percent(needed, available) }
    }

    /// Demand exceeds capacity; true for any demand against a zero pool.
    pub fn is_over_capacity(&self) -> bool {
        self.needed > self.available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodUsage {
    pub method: PlanningMethod,
    #[serde(flatten)]
    pub usage: Usage,
}

/// Trellis usage in linear feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearUsage {
    pub needed_feet: f64,
    pub available_feet: f64,
    pub utilization_percent: f64,
}

impl LinearUsage {
    fn new(needed_feet: f64, available_feet: f64) -> Self {
        Self {
            needed_feet,
            available_feet,
            utilization_percent: utilization_percent(needed_feet, available_feet),
        }
    }

    pub fn is_over_capacity(&self) -> bool {
        self.needed_feet > self.available_feet
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceUsageReport {
    /// Methods with beds or demand, in `PlanningMethod` order.
    pub by_method: Vec<MethodUsage>,
    /// All area methods together (trellis footage excluded).
    pub overall: Usage,
    pub trellis: LinearUsage,
}

impl SpaceUsageReport {
    pub fn method(&self, method: PlanningMethod) -> Option<&Usage> {
        self.by_method.iter().find(|m| m.method == method).map(|m| &m.usage)
    }

    /// Cells needed under a method, 0 when the method is absent.
    pub fn needed(&self, method: PlanningMethod) -> f64 {
        self.method(method).map(|u| u.needed).unwrap_or(0.0)
    }
}

#[derive(Default)]
struct Bucket {
    needed: f64,
    available: f64,
}

/// Aggregate peak-concurrent space for a set of line items over beds and trellises.
///
/// Every supplied bed adds capacity to its method's pool and every supplied
/// trellis adds to the footage pool. Line items without any assignment are
/// charged to their own method, else `ctx.default_method`.
pub fn aggregate(
    line_items: &[PlanLineItem],
    beds: &[Bed],
    trellises: &[TrellisStructure],
    ctx: &SpaceContext<'_>,
) -> SpaceUsageReport {
    let cell_area = ctx.cell_area();
    let mut buckets: BTreeMap<PlanningMethod, Bucket> = BTreeMap::new();

    for bed in beds {
        buckets.entry(bed.method).or_default().available += bed.capacity_cells(cell_area);
    }

    let trellis_available: f64 = trellises
        .iter()
        .map(|t| t.total_length_feet)
        .filter(|len| len.is_finite() && *len > 0.0)
        .sum();
    let mut trellis_needed = 0.0;

    for item in line_items {
        let profile = ctx.catalog.profile(&item.plant_id);
        let divisor = item.succession_divisor(ctx.max_successions);
        let fallback_method = item.method.unwrap_or(ctx.default_method);

        let charges: Vec<(PlanningMethod, f64)> = if item.allocation.is_empty() {
            vec![(fallback_method, item.target_quantity / divisor)]
        } else {
            allocate(item, ctx.quantity_split)
                .into_iter()
                .map(|share| {
                    let method = match beds.iter().find(|b| b.id == share.target_id) {
                        Some(bed) => bed.method,
                        None => {
                            if !profile.trellis_style {
                                tracing::warn!(
                                    "Line item '{}' assigned to unknown bed '{}', charging {}",
                                    item.id,
                                    share.target_id,
                                    fallback_method.label()
                                );
                            }
                            fallback_method
                        }
                    };
                    (method, share.quantity / divisor)
                })
                .collect()
        };

        for (method, quantity) in charges {
            let space = space_for_quantity(&profile, ctx.tables, ctx.grid_granularity_inches, method, quantity);
            match space.unit {
                SpaceUnit::LinearFeet => trellis_needed += space.amount,
                SpaceUnit::Cells => buckets.entry(method).or_default().needed += space.amount,
            }
        }
    }

    let by_method: Vec<MethodUsage> = buckets
        .into_iter()
        .map(|(method, b)| MethodUsage { method, usage: Usage::new(b.needed, b.available) })
        .collect();

    let overall_needed: f64 = by_method.iter().map(|m| m.usage.needed).sum();
    let overall_available: f64 = by_method.iter().map(|m| m.usage.available).sum();

    let report = SpaceUsageReport {
        by_method,
        overall: Usage::new(overall_needed, overall_available),
        trellis: LinearUsage::new(trellis_needed, trellis_available),
    };

    tracing::debug!(
        "Aggregated {} line items: {:.2}/{:.2} cells, {:.2}/{:.2} trellis feet",
        line_items.len(),
        report.overall.needed,
        report.overall.available,
        report.trellis.needed_feet,
        report.trellis.available_feet
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::data::{BedAllocation, BedShare};
    use crate::utils::spacing_tables::{PlantCatalog, SpacingTables};
    use approx::assert_relative_eq;

    fn even(ids: &[&str]) -> BedAllocation {
        BedAllocation::Even { target_ids: ids.iter().map(|s| s.to_string()).collect() }
    }

    #[test]
    fn test_utilization_guards() {
        assert_eq!(utilization_percent(5.0, 0.0), 0.0);
        assert_eq!(utilization_percent(0.0, 0.0), 0.0);
        assert_eq!(utilization_percent(5.0, f64::INFINITY), 0.0);
        assert_relative_eq!(utilization_percent(5.0, 20.0), 25.0);
    }

    #[test]
    fn test_groups_beds_by_method() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());

        let beds = vec![
            Bed::new("sfg-1", 4.0, 4.0, PlanningMethod::SquareFoot),
            Bed::new("sfg-2", 4.0, 8.0, PlanningMethod::SquareFoot),
            Bed::new("row-1", 3.0, 10.0, PlanningMethod::Row),
        ];
        let items = vec![
            PlanLineItem::new("a", "tomato", 8.0).with_allocation(even(&["sfg-1", "sfg-2"])),
            PlanLineItem::new("b", "lettuce", 40.0).with_allocation(even(&["sfg-2"])),
            PlanLineItem::new("c", "pepper", 5.0).with_allocation(even(&["row-1"])),
        ];

        let report = aggregate(&items, &beds, &[], &ctx);
        let sfg = report.method(PlanningMethod::SquareFoot).unwrap();
        assert_relative_eq!(sfg.needed, 8.0 + 10.0);
        assert_relative_eq!(sfg.available, 48.0);
        assert_relative_eq!(sfg.utilization_percent, 37.5);

        // pepper row: 24 × 18 / 144 = 3 cells each
        let row = report.method(PlanningMethod::Row).unwrap();
        assert_relative_eq!(row.needed, 15.0);
        assert_relative_eq!(row.available, 30.0);

        assert_relative_eq!(report.overall.needed, 33.0);
        assert_relative_eq!(report.overall.available, 78.0);
        assert_eq!(report.by_method[0].method, PlanningMethod::SquareFoot);
    }

    #[test]
    fn test_succession_divides_peak_space() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());
        let beds = vec![Bed::new("b", 4.0, 4.0, PlanningMethod::SquareFoot)];

        let item = PlanLineItem::new("a", "lettuce", 48.0)
            .with_succession(4, 14, None)
            .with_allocation(even(&["b"]));
        let report = aggregate(&[item], &beds, &[], &ctx);
        // 48 / 4 = 12 lettuce at 0.25 cells
        assert_relative_eq!(report.needed(PlanningMethod::SquareFoot), 3.0);
    }

    #[test]
    fn test_trellis_plants_never_use_cells() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());
        let beds = vec![Bed::new("b", 4.0, 8.0, PlanningMethod::SquareFoot)];
        let trellises = vec![
            TrellisStructure { id: "t1".into(), total_length_feet: 8.0 },
            TrellisStructure { id: "t2".into(), total_length_feet: 4.0 },
        ];

        for method in PlanningMethod::ALL {
            let item = PlanLineItem::new("cuke", "cucumber", 6.0)
                .with_succession(2, 21, None)
                .with_allocation(even(&["t1"]))
                .with_method(method);
            let report = aggregate(&[item.clone()], &beds, &trellises, &ctx);
            assert_eq!(report.needed(method), 0.0);
            assert_eq!(report.overall.needed, 0.0);
            // 6 / 2 successions × 2 ft
            assert_relative_eq!(report.trellis.needed_feet, 6.0);
            assert_relative_eq!(report.trellis.available_feet, 12.0);
            assert_relative_eq!(report.trellis.utilization_percent, 50.0);
        }
    }

    #[test]
    fn test_zero_trellis_capacity() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());
        let trellises = vec![TrellisStructure { id: "t".into(), total_length_feet: 0.0 }];
        let item = PlanLineItem::new("p", "pole-bean", 10.0).with_allocation(even(&["t"]));

        let report = aggregate(&[item], &[], &trellises, &ctx);
        assert_eq!(report.trellis.utilization_percent, 0.0);
        assert!(report.trellis.is_over_capacity());
        assert!(report.trellis.utilization_percent.is_finite());
    }

    #[test]
    fn test_seed_density_routing() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());
        let beds = vec![Bed::new("b", 4.0, 4.0, PlanningMethod::MigardenerDense)];
        let item = PlanLineItem::new("c", "carrot", 360.0).with_allocation(even(&["b"]));

        let report = aggregate(&[item], &beds, &[], &ctx);
        assert_eq!(report.needed(PlanningMethod::MigardenerDense), 10.0);
    }

    #[test]
    fn test_unassigned_items_estimate_up_front() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());

        let items = vec![
            PlanLineItem::new("a", "tomato", 4.0),
            PlanLineItem::new("b", "tomato", 4.0).with_method(PlanningMethod::Row),
        ];
        let report = aggregate(&items, &[], &[], &ctx);
        assert_relative_eq!(report.needed(PlanningMethod::SquareFoot), 4.0);
        assert_relative_eq!(report.needed(PlanningMethod::Row), 24.0);
        assert_eq!(report.overall.utilization_percent, 0.0);
        assert!(report.overall.is_over_capacity());
    }

    #[test]
    fn test_custom_allocation_across_methods() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());
        let beds = vec![
            Bed::new("x", 4.0, 4.0, PlanningMethod::SquareFoot),
            Bed::new("y", 4.0, 4.0, PlanningMethod::Intensive),
        ];
        let item = PlanLineItem::new("a", "tomato", 10.0).with_allocation(BedAllocation::Custom {
            shares: vec![BedShare::new("x", 6.0), BedShare::new("y", 4.0), BedShare::new("z", 0.0)],
        });
        let report = aggregate(&[item], &beds, &[], &ctx);
        assert_relative_eq!(report.needed(PlanningMethod::SquareFoot), 6.0);
        assert_relative_eq!(report.needed(PlanningMethod::Intensive), 4.0 * 2.25);
    }

    #[test]
    fn test_unknown_bed_charged_to_item_or_default_method() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let beds = vec![Bed::new("known", 4.0, 4.0, PlanningMethod::SquareFoot)];
        let ghost = || BedAllocation::Custom { shares: vec![BedShare::new("ghost", 4.0)] };

        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());
        let items = vec![PlanLineItem::new("a", "tomato", 4.0).with_allocation(ghost()).with_method(PlanningMethod::Row)];
        let report = aggregate(&items, &beds, &[], &ctx);
        assert_relative_eq!(report.needed(PlanningMethod::Row), 24.0);
        assert_eq!(report.needed(PlanningMethod::SquareFoot), 0.0);
        assert_eq!(report.method(PlanningMethod::Row).unwrap().available, 0.0);

        // No item method: configured default, here intensive at 18" on center
        let config = PlannerConfig { default_method: PlanningMethod::Intensive, ..Default::default() };
        let ctx = SpaceContext::new(&tables, &catalog, &config);
        let items = vec![PlanLineItem::new("b", "tomato", 4.0).with_allocation(ghost())];
        let report = aggregate(&items, &beds, &[], &ctx);
        assert_relative_eq!(report.needed(PlanningMethod::Intensive), 9.0);
        assert_relative_eq!(report.overall.available, 16.0);
    }

    #[test]
    fn test_succession_cap_applies_to_peak() {
        let tables = SpacingTables::builtin();
        let catalog = PlantCatalog::builtin();
        let ctx = SpaceContext::new(&tables, &catalog, &PlannerConfig::default());
        let beds = vec![Bed::new("b", 4.0, 4.0, PlanningMethod::SquareFoot)];
        let item = PlanLineItem::new("t", "tomato", 24.0)
            .with_succession(12, 7, None)
            .with_allocation(even(&["b"]));

        let report = aggregate(&[item], &beds, &[], &ctx);
        // Capped at 8 waves of 3
        assert_relative_eq!(report.needed(PlanningMethod::SquareFoot), 3.0);
    }
}
