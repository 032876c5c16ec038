//! Succession Expansion
//!
//! Turns a quantity into N dated plantings sharing one group token.
//!
//! Quantities are divided by the configured `QuantitySplit` (plain floating
//! division by default: 25 over 4 is 6.25 each). Instance `i` is planted on
//! `first_plant_date + i × interval_days`; without a first date every
//! instance is dateless. An interval of 0 puts every instance on one date.
//!
//! For line items split over several beds or trellises, each target gets its
//! own independent series: outer loop over targets, inner loop over
//! successions. 90 plants over 3 beds with 4 successions is 3 series of 4
//! (7.5 each), not one series of 12.
//!
//! Idempotency of repeated exports belongs to the persistence layer; this
//! module only guarantees identical quantities and dates for identical input.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::config::QuantitySplit;
use crate::data::PlanLineItem;
use crate::space::allocation::{allocate, split_quantity};

/// One dated planting of a succession series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessionPlanting {
    /// Bed or trellis id; None when the line item has no assignment.
    pub target_id: Option<String>,
    pub quantity: f64,
    pub plant_date: Option<NaiveDate>,
    /// Shared by every instance of one expansion; None without succession.
    pub succession_group_id: Option<Uuid>,
    pub succession_index: u32,
}

/// Instances of one series (at most eight in practice).
pub type SuccessionSeries = SmallVec<[SuccessionPlanting; 8]>;

/// All plantings of one line item on one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSeries {
    pub target_id: Option<String>,
    pub succession_group_id: Option<Uuid>,
    pub plantings: SuccessionSeries,
}

/// `first + index × interval` days; None without a first date or on overflow.
pub fn planting_date(first_plant_date: Option<NaiveDate>, index: u32, interval_days: u32) -> Option<NaiveDate> {
    let offset = u64::from(index) * u64::from(interval_days);
    first_plant_date?.checked_add_days(Days::new(offset))
}

fn build_series(
    target_id: Option<&str>,
    quantity: f64,
    succession_count: u32,
    interval_days: u32,
    first_plant_date: Option<NaiveDate>,
    group_id: Option<Uuid>,
    policy: QuantitySplit,
) -> SuccessionSeries {
    if succession_count <= 1 {
        let mut single = SuccessionSeries::new();
        single.push(SuccessionPlanting {
            target_id: target_id.map(str::to_string),
            quantity,
            plant_date: first_plant_date,
            succession_group_id: None,
            succession_index: 0,
        });
        return single;
    }

    let shares = split_quantity(quantity, succession_count as usize, policy);
    (0..succession_count)
        .zip(shares)
        .map(|(index, share)| SuccessionPlanting {
            target_id: target_id.map(str::to_string),
            quantity: share,
            plant_date: planting_date(first_plant_date, index, interval_days),
            succession_group_id: group_id,
            succession_index: index,
        })
        .collect()
}

/// Expand with a fresh group token and fractional division.
///
/// A count of 0 or 1 yields a single instance with the full quantity.
pub fn expand(
    target_quantity: f64,
    succession_count: u32,
    interval_days: u32,
    first_plant_date: Option<NaiveDate>,
) -> SuccessionSeries {
    expand_with_group(
        target_quantity,
        succession_count,
        interval_days,
        first_plant_date,
        Uuid::new_v4(),
        QuantitySplit::Fractional,
    )
}

/// Expand using a caller-supplied group token and split policy.
pub fn expand_with_group(
    target_quantity: f64,
    succession_count: u32,
    interval_days: u32,
    first_plant_date: Option<NaiveDate>,
    group_id: Uuid,
    policy: QuantitySplit,
) -> SuccessionSeries {
    let group = (succession_count > 1).then_some(group_id);
    build_series(None, target_quantity, succession_count, interval_days, first_plant_date, group, policy)
}

/// Expand a line item into one series per assigned target, each with its own token.
pub fn expand_line_item(item: &PlanLineItem, policy: QuantitySplit, max_successions: u32) -> Vec<TargetSeries> {
    expand_line_item_with(item, policy, max_successions, Uuid::new_v4)
}

/// As `expand_line_item`, drawing group tokens from `next_group_id`.
pub fn expand_line_item_with(
    item: &PlanLineItem,
    policy: QuantitySplit,
    max_successions: u32,
    mut next_group_id: impl FnMut() -> Uuid,
) -> Vec<TargetSeries> {
    let count = item.effective_succession_count(max_successions);
    if count < item.succession_count {
        tracing::warn!(
            "Line item '{}' asks for {} successions, clamping to {}",
            item.id,
            item.succession_count,
            count
        );
    }
    if let Some(diff) = item.allocation_discrepancy() {
        tracing::warn!(
            "Line item '{}' custom allocation differs from target by {}",
            item.id,
            diff
        );
    }

    let targets: Vec<(Option<String>, f64)> = if item.allocation.is_empty() {
        vec![(None, item.target_quantity)]
    } else {
        allocate(item, policy)
            .into_iter()
            .map(|share| (Some(share.target_id), share.quantity))
            .collect()
    };

    let mut out = Vec::with_capacity(targets.len());
    for (target_id, quantity) in targets {
        let group = (count > 1).then(&mut next_group_id);
        let plantings = build_series(
            target_id.as_deref(),
            quantity,
            count,
            item.succession_interval_days,
            item.first_plant_date,
            group,
            policy,
        );
        out.push(TargetSeries { target_id, succession_group_id: group, plantings });
    }

    tracing::debug!(
        "Expanded line item '{}' into {} series ({} plantings)",
        item.id,
        out.len(),
        out.iter().map(|s| s.plantings.len()).sum::<usize>()
    );
    out
}
