//! Plan Records
//!
//! Serde-facing records handed to the planner by the surrounding application:
//! beds, trellis structures, and the gardener's desired line items.
//!
//! The planner never fetches these and checks little beyond unique ids; a
//! bed with a missing dimension simply has no capacity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::{PlannerError, Result};

/// Square inches in one square foot.
pub const SQUARE_FOOT_INCHES: f64 = 144.0;

/// Planning method of a bed.
///
/// `Trellis` is listed for completeness: trellis accounting is normally
/// driven by the plant's planting style, not by the bed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanningMethod {
    #[default]
    SquareFoot,
    Row,
    Intensive,
    #[serde(rename = "migardener-style-dense", alias = "migardener")]
    MigardenerDense,
    Permaculture,
    Trellis,
}

impl PlanningMethod {
    /// All methods in report order.
    pub const ALL: [PlanningMethod; 6] = [
        PlanningMethod::SquareFoot,
        PlanningMethod::Row,
        PlanningMethod::Intensive,
        PlanningMethod::MigardenerDense,
        PlanningMethod::Permaculture,
        PlanningMethod::Trellis,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlanningMethod::SquareFoot => "square-foot",
            PlanningMethod::Row => "row",
            PlanningMethod::Intensive => "intensive",
            PlanningMethod::MigardenerDense => "migardener-style-dense",
            PlanningMethod::Permaculture => "permaculture",
            PlanningMethod::Trellis => "trellis",
        }
    }
}

/// A garden bed as seen by the space calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bed {
    pub id: String,
    pub width_feet: Option<f64>,
    pub length_feet: Option<f64>,
    #[serde(default)]
    pub method: PlanningMethod,
}

impl Bed {
    pub fn new(id: impl Into<String>, width_feet: f64, length_feet: f64, method: PlanningMethod) -> Self {
        Self {
            id: id.into(),
            width_feet: Some(width_feet),
            length_feet: Some(length_feet),
            method,
        }
    }

    /// Width × length, or None when either dimension is missing or invalid.
    pub fn area_square_feet(&self) -> Option<f64> {
        match (self.width_feet, self.length_feet) {
            (Some(w), Some(l)) if w.is_finite() && l.is_finite() && w >= 0.0 && l >= 0.0 => Some(w * l),
            _ => None,
        }
    }

    /// Capacity in grid cells of `cell_area_sq_in` square inches.
    pub fn capacity_cells(&self, cell_area_sq_in: f64) -> f64 {
        self.area_square_feet()
            .map(|area| area * (SQUARE_FOOT_INCHES / cell_area_sq_in))
            .unwrap_or(0.0)
    }
}

/// A trellis structure; only its length matters here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrellisStructure {
    pub id: String,
    pub total_length_feet: f64,
}

/// Explicit quantity for one bed or trellis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedShare {
    pub target_id: String,
    pub quantity: f64,
}

impl BedShare {
    pub fn new(target_id: impl Into<String>, quantity: f64) -> Self {
        Self { target_id: target_id.into(), quantity }
    }
}

/// How a line item's quantity is spread over its beds or trellises.
///
/// Target order is caller-supplied and preserved everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BedAllocation {
    Even { target_ids: Vec<String> },
    Custom { shares: Vec<BedShare> },
}

impl Default for BedAllocation {
    fn default() -> Self {
        BedAllocation::Even { target_ids: Vec::new() }
    }
}

impl BedAllocation {
    /// Assigned target ids in caller order.
    pub fn target_ids(&self) -> Vec<&str> {
        match self {
            BedAllocation::Even { target_ids } => target_ids.iter().map(String::as_str).collect(),
            BedAllocation::Custom { shares } => shares.iter().map(|s| s.target_id.as_str()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            BedAllocation::Even { target_ids } => target_ids.is_empty(),
            BedAllocation::Custom { shares } => shares.is_empty(),
        }
    }
}

/// A gardener's request for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanLineItem {
    pub id: String,
    pub plant_id: String,
    #[serde(default)]
    pub variety_name: Option<String>,
    /// Plants for most crops, seeds for seed-density crops.
    pub target_quantity: f64,
    /// 0 = disabled, otherwise the number of plantings (1-8).
    #[serde(default)]
    pub succession_count: u32,
    #[serde(default)]
    pub first_plant_date: Option<NaiveDate>,
    #[serde(default)]
    pub succession_interval_days: u32,
    #[serde(default)]
    pub allocation: BedAllocation,
    /// Method charged when no bed is assigned yet.
    #[serde(default)]
    pub method: Option<PlanningMethod>,
}

impl PlanLineItem {
    pub fn new(id: impl Into<String>, plant_id: impl Into<String>, target_quantity: f64) -> Self {
        Self {
            id: id.into(),
            plant_id: plant_id.into(),
            variety_name: None,
            target_quantity,
            succession_count: 0,
            first_plant_date: None,
            succession_interval_days: 0,
            allocation: BedAllocation::default(),
            method: None,
        }
    }

    pub fn with_succession(mut self, count: u32, interval_days: u32, first_plant_date: Option<NaiveDate>) -> Self {
        self.succession_count = count;
        self.succession_interval_days = interval_days;
        self.first_plant_date = first_plant_date;
        self
    }

    pub fn with_allocation(mut self, allocation: BedAllocation) -> Self {
        self.allocation = allocation;
        self
    }

    pub fn with_method(mut self, method: PlanningMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Succession count capped at `max_successions`.
    ///
    /// Every calculation that divides by successions uses this count.
    pub fn effective_succession_count(&self, max_successions: u32) -> u32 {
        self.succession_count.min(max_successions)
    }

    /// Divisor for per-planting-instant quantities: the capped succession
    /// count when it is above 1, else 1.
    pub fn succession_divisor(&self, max_successions: u32) -> f64 {
        match self.effective_succession_count(max_successions) {
            count if count > 1 => count as f64,
            _ => 1.0,
        }
    }

    /// `Some(sum - target)` when a custom allocation does not add up.
    ///
    /// Advisory only; the calculations use the explicit shares as given.
    pub fn allocation_discrepancy(&self) -> Option<f64> {
        let BedAllocation::Custom { shares } = &self.allocation else {
            return None;
        };
        let sum: f64 = shares.iter().map(|s| s.quantity).sum();
        let diff = sum - self.target_quantity;
        if diff.abs() > 1e-9 {
            Some(diff)
        } else {
            None
        }
    }
}

/// A whole plan as exchanged with the command-line report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GardenPlan {
    #[serde(default)]
    pub beds: Vec<Bed>,
    #[serde(default)]
    pub trellises: Vec<TrellisStructure>,
    #[serde(default)]
    pub line_items: Vec<PlanLineItem>,
}

impl GardenPlan {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let plan: GardenPlan = serde_json::from_str(&contents)?;
        plan.validate()?;
        tracing::debug!(
            "Loaded plan {:?}: {} beds, {} trellises, {} line items",
            path,
            plan.beds.len(),
            plan.trellises.len(),
            plan.line_items.len()
        );
        Ok(plan)
    }

    /// Structural checks only: unique ids and finite quantities.
    ///
    /// Allocation mismatches and unknown targets are left to the calculations.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for id in self.beds.iter().map(|b| &b.id).chain(self.trellises.iter().map(|t| &t.id)) {
            if !seen.insert(id.as_str()) {
                return Err(PlannerError::Validation(format!("Duplicate bed or trellis id '{}'", id)));
            }
        }

        let mut seen = FxHashSet::default();
        for item in &self.line_items {
            if !seen.insert(item.id.as_str()) {
                return Err(PlannerError::Validation(format!("Duplicate line item id '{}'", item.id)));
            }
            if !item.target_quantity.is_finite() {
                return Err(PlannerError::Validation(format!(
                    "Line item '{}' has a non-finite target quantity",
                    item.id
                )));
            }
        }
        Ok(())
    }
}
