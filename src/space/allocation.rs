//! PER-BED / PER-TRELLIS ALLOCATION
//!
//! Splits a line item's quantity over its assigned beds or trellises and
//! answers two distinct space questions per bed:
//!   - `season_committed_space`: capacity earmarked for the crop across the
//!     whole season (season-total quantity, NOT divided by successions)
//!   - `peak_concurrent_space`: capacity occupied by one succession wave
//!
//! Both are needed. Do not fold one into the other.
//!
//! Also hosts the advisory bed-minimization ("how many of my beds do I need").

use serde::{Deserialize, Serialize};
use std::slice;

use super::aggregator::{aggregate, utilization_percent};
use super::calculator::{space_for_quantity, SpaceCost};
use super::SpaceContext;
use crate::config::QuantitySplit;
use crate::data::{Bed, BedAllocation, BedShare, PlanLineItem, PlanningMethod, TrellisStructure};
use crate::utils::classify::{is_seed_density, is_trellis_style};
use crate::utils::spacing_tables::PlantSpacingProfile;

/// Largest total split in whole units (2^53).
const MAX_EXACT_WHOLE_UNITS: f64 = 9_007_199_254_740_992.0;

/// Divide `total` into `parts` quantities under the given policy.
///
/// Both policies conserve the total. `WholeUnits` hands the remainder out one
/// unit at a time from the front, in input order; any fractional residue of a
/// non-integral total stays with the first part. Totals beyond 2^53, where
/// whole-unit arithmetic stops being exact, are split fractionally.
pub fn split_quantity(total: f64, parts: usize, policy: QuantitySplit) -> Vec<f64> {
    if parts == 0 {
        return Vec::new();
    }
    let n = parts as f64;

    match policy {
        QuantitySplit::WholeUnits if total > 0.0 && total < MAX_EXACT_WHOLE_UNITS => {
            let whole = total.floor();
            let residue = total - whole;
            let base = (whole / n).floor();
            let remainder = (whole - base * n) as usize;

            let mut out: Vec<f64> = (0..parts)
                .map(|i| if i < remainder { base + 1.0 } else { base })
                .collect();
            out[0] += residue;
            out
        }
        _ => vec![total / n; parts],
    }
}

/// Season-total share per assigned target, in caller order.
///
/// Even: target split over every assigned id. Custom: explicit shares, with
/// non-positive quantities skipped.
pub fn allocate(item: &PlanLineItem, policy: QuantitySplit) -> Vec<BedShare> {
    match &item.allocation {
        BedAllocation::Even { target_ids } => split_quantity(item.target_quantity, target_ids.len(), policy)
            .into_iter()
            .zip(target_ids)
            .map(|(quantity, id)| BedShare::new(id.clone(), quantity))
            .collect(),
        BedAllocation::Custom { shares } => shares
            .iter()
            .filter(|s| s.quantity.is_finite() && s.quantity > 0.0)
            .cloned()
            .collect(),
    }
}

/// What one succession wave puts in the ground, for display only.
pub fn per_planting_quantity(bed_quantity: f64, succession_count: u32) -> f64 {
    if succession_count > 1 {
        bed_quantity / succession_count as f64
    } else {
        bed_quantity
    }
}

/// Capacity earmarked for the season-total quantity in one bed.
pub fn season_committed_space(
    profile: &PlantSpacingProfile,
    bed_quantity: f64,
    method: PlanningMethod,
    ctx: &SpaceContext<'_>,
) -> SpaceCost {
    space_for_quantity(profile, ctx.tables, ctx.grid_granularity_inches, method, bed_quantity)
}

/// Capacity occupied by a single succession wave in one bed.
pub fn peak_concurrent_space(
    profile: &PlantSpacingProfile,
    bed_quantity: f64,
    succession_count: u32,
    method: PlanningMethod,
    ctx: &SpaceContext<'_>,
) -> SpaceCost {
    let quantity = per_planting_quantity(bed_quantity, succession_count);
    space_for_quantity(profile, ctx.tables, ctx.grid_granularity_inches, method, quantity)
}

/// Per-target allocation view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub target_id: String,
    /// Bed method; None for trellises and unknown beds.
    pub method: Option<PlanningMethod>,
    /// Season total committed to this target.
    pub quantity: f64,
    pub per_planting_quantity: f64,
    pub season_committed_space: SpaceCost,
    pub peak_concurrent_space: SpaceCost,
    /// Cells for beds, linear feet for trellises.
    pub capacity: f64,
    /// Season-committed space against capacity.
    pub utilization_percent: f64,
}

/// Allocation summaries for a line item over beds.
///
/// Unknown bed ids are costed under the item's method (or the default) with
/// zero capacity. Trellis-style plants occupy no bed cells and get no bed
/// summaries; `summarize_line_item` routes them to their trellises.
pub fn summarize_allocations(item: &PlanLineItem, beds: &[Bed], ctx: &SpaceContext<'_>) -> Vec<AllocationSummary> {
    let profile = ctx.catalog.profile(&item.plant_id);
    if is_trellis_style(&profile) {
        tracing::debug!("Line item '{}' is trellis-grown, no bed summaries", item.id);
        return Vec::new();
    }
    let cell_area = ctx.cell_area();
    let fallback_method = item.method.unwrap_or(ctx.default_method);
    let succession_count = ctx.succession_count(item);

    allocate(item, ctx.quantity_split)
        .into_iter()
        .map(|share| {
            let bed = beds.iter().find(|b| b.id == share.target_id);
            let method = bed.map(|b| b.method).unwrap_or(fallback_method);
            let capacity = bed.map(|b| b.capacity_cells(cell_area)).unwrap_or(0.0);
            let committed = season_committed_space(&profile, share.quantity, method, ctx);
            let peak = peak_concurrent_space(&profile, share.quantity, succession_count, method, ctx);

            AllocationSummary {
                method: bed.map(|b| b.method),
                quantity: share.quantity,
                per_planting_quantity: per_planting_quantity(share.quantity, succession_count),
                season_committed_space: committed,
                peak_concurrent_space: peak,
                capacity,
                utilization_percent: utilization_percent(committed.amount, capacity),
                target_id: share.target_id,
            }
        })
        .collect()
}

/// Trellis utilization: a zero-length trellis with demand has no capacity and
/// reports 100.
pub fn trellis_utilization_percent(needed_feet: f64, length_feet: f64) -> f64 {
    if length_feet > 0.0 && length_feet.is_finite() {
        needed_feet / length_feet * 100.0
    } else if needed_feet > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Allocation summaries for a trellis-style line item over trellis structures.
pub fn summarize_trellis_allocations(
    item: &PlanLineItem,
    trellises: &[TrellisStructure],
    ctx: &SpaceContext<'_>,
) -> Vec<AllocationSummary> {
    let profile = ctx.catalog.profile(&item.plant_id);
    let method = PlanningMethod::Trellis;
    let succession_count = ctx.succession_count(item);

    allocate(item, ctx.quantity_split)
        .into_iter()
        .map(|share| {
            let length = trellises
                .iter()
                .find(|t| t.id == share.target_id)
                .map(|t| t.total_length_feet)
                .unwrap_or(0.0);
            let committed = season_committed_space(&profile, share.quantity, method, ctx);
            let peak = peak_concurrent_space(&profile, share.quantity, succession_count, method, ctx);

            AllocationSummary {
                method: None,
                quantity: share.quantity,
                per_planting_quantity: per_planting_quantity(share.quantity, succession_count),
                season_committed_space: committed,
                peak_concurrent_space: peak,
                capacity: length.max(0.0),
                utilization_percent: trellis_utilization_percent(committed.amount, length),
                target_id: share.target_id,
            }
        })
        .collect()
}

/// Allocation summaries over beds or trellises, by the plant's planting style.
pub fn summarize_line_item(
    item: &PlanLineItem,
    beds: &[Bed],
    trellises: &[TrellisStructure],
    ctx: &SpaceContext<'_>,
) -> Vec<AllocationSummary> {
    if is_trellis_style(&ctx.catalog.profile(&item.plant_id)) {
        summarize_trellis_allocations(item, trellises, ctx)
    } else {
        summarize_allocations(item, beds, ctx)
    }
}

/// Result of the greedy prefix walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedyPrefix {
    pub min_beds_needed: usize,
    pub required_bed_ids: Vec<String>,
    pub extra_bed_ids: Vec<String>,
}

/// Accumulate capacities in the given order until `required` is reached.
///
/// Order is the caller's and is never sorted. If the total never reaches
/// `required`, every bed is required. None for an empty list.
pub fn greedy_required_prefix(capacities: &[(&str, f64)], required: f64) -> Option<GreedyPrefix> {
    if capacities.is_empty() {
        return None;
    }

    let mut running = 0.0;
    let mut count = capacities.len();
    for (i, (_, capacity)) in capacities.iter().enumerate() {
        running += capacity;
        if running >= required {
            count = i + 1;
            break;
        }
    }

    let (required_part, extra_part) = capacities.split_at(count);
    Some(GreedyPrefix {
        min_beds_needed: count,
        required_bed_ids: required_part.iter().map(|(id, _)| id.to_string()).collect(),
        extra_bed_ids: extra_part.iter().map(|(id, _)| id.to_string()).collect(),
    })
}

/// Why bed minimization made no suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationSkip {
    TrellisPlant,
    SeedDensityPlant,
    SingleBed,
    NonPositiveQuantity,
    MissingBedDimensions,
    NonSquareFootBed,
    NoExtraBeds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BedOptimization {
    NotSuggested {
        reason: OptimizationSkip,
    },
    Suggested {
        required_space: f64,
        #[serde(flatten)]
        prefix: GreedyPrefix,
    },
}

/// Advisory: the fewest assigned beds, in assigned order, that hold the item.
///
/// Applies only to area plants with more than one assigned bed, all of them
/// square-foot beds with known dimensions.
pub fn minimize_beds(item: &PlanLineItem, beds: &[Bed], ctx: &SpaceContext<'_>) -> BedOptimization {
    let skip = |reason| BedOptimization::NotSuggested { reason };
    let profile = ctx.catalog.profile(&item.plant_id);

    if is_trellis_style(&profile) {
        return skip(OptimizationSkip::TrellisPlant);
    }
    if is_seed_density(&item.plant_id, ctx.tables) {
        return skip(OptimizationSkip::SeedDensityPlant);
    }
    if !(item.target_quantity > 0.0) {
        return skip(OptimizationSkip::NonPositiveQuantity);
    }

    let assigned_ids = item.allocation.target_ids();
    if assigned_ids.len() <= 1 {
        return skip(OptimizationSkip::SingleBed);
    }

    let mut assigned: Vec<Bed> = Vec::with_capacity(assigned_ids.len());
    for id in &assigned_ids {
        match beds.iter().find(|b| b.id == *id) {
            Some(bed) if bed.area_square_feet().is_some() => assigned.push(bed.clone()),
            _ => return skip(OptimizationSkip::MissingBedDimensions),
        }
    }
    if assigned.iter().any(|b| b.method != PlanningMethod::SquareFoot) {
        return skip(OptimizationSkip::NonSquareFootBed);
    }

    let report = aggregate(slice::from_ref(item), &assigned, &[], ctx);
    let required_space = report.needed(PlanningMethod::SquareFoot);

    let cell_area = ctx.cell_area();
    let capacities: Vec<(&str, f64)> = assigned
        .iter()
        .map(|b| (b.id.as_str(), b.capacity_cells(cell_area)))
        .collect();

    match greedy_required_prefix(&capacities, required_space) {
        Some(prefix) if !prefix.extra_bed_ids.is_empty() => {
            tracing::debug!(
                "Line item '{}' fits in {} of {} beds ({:.2} cells)",
                item.id,
                prefix.min_beds_needed,
                capacities.len(),
                required_space
            );
            BedOptimization::Suggested { required_space, prefix }
        }
        _ => skip(OptimizationSkip::NoExtraBeds),
    }
}
