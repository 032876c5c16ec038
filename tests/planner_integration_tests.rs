//! Planner Integration Tests
//!
//! Runs whole plans through the public planner API: usage reports, per-bed
//! allocations, bed suggestions and succession exports.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use garden_planner_rust::{
    Bed, BedAllocation, BedOptimization, BedShare, GardenPlan, GardenPlanner, PlanLineItem, PlannerConfig,
    PlanningMethod, QuantityUnit, SpaceCost, SpaceUnit, TrellisStructure,
};
use std::collections::HashSet;

fn planner() -> GardenPlanner {
    GardenPlanner::builtin(PlannerConfig::default()).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn even(ids: &[&str]) -> BedAllocation {
    BedAllocation::Even { target_ids: ids.iter().map(|s| s.to_string()).collect() }
}

#[test]
fn test_custom_allocation_with_successions() {
    let planner = planner();
    let item = PlanLineItem::new("li-1", "tomato", 100.0)
        .with_succession(4, 14, Some(date(2026, 4, 15)))
        .with_allocation(BedAllocation::Custom {
            shares: vec![BedShare::new("bedX", 60.0), BedShare::new("bedY", 25.0), BedShare::new("bedZ", 15.0)],
        });

    let series = planner.export_successions(&item);
    assert_eq!(series.len(), 3);
    assert_eq!(series.iter().map(|s| s.plantings.len()).sum::<usize>(), 12);

    let per_instance: Vec<f64> = series.iter().map(|s| s.plantings[0].quantity).collect();
    assert_eq!(per_instance, vec![15.0, 6.25, 3.75]);

    let groups: HashSet<_> = series.iter().map(|s| s.succession_group_id.unwrap()).collect();
    assert_eq!(groups.len(), 3);

    for s in &series {
        assert!(s.plantings.iter().all(|p| p.succession_group_id == s.succession_group_id));
        let last = s.plantings.last().unwrap();
        assert_eq!(last.succession_index, 3);
        assert_eq!(last.plant_date, Some(date(2026, 5, 27)));
    }

    let total: f64 = series.iter().flat_map(|s| s.plantings.iter()).map(|p| p.quantity).sum();
    assert_relative_eq!(total, 100.0, epsilon = 1e-9);
}

#[test]
fn test_season_committed_vs_peak_per_bed() {
    let planner = planner();
    let beds = vec![
        Bed::new("bedX", 8.0, 8.0, PlanningMethod::SquareFoot),
        Bed::new("bedY", 4.0, 8.0, PlanningMethod::SquareFoot),
    ];
    let item = PlanLineItem::new("li", "tomato", 80.0)
        .with_succession(4, 14, None)
        .with_allocation(BedAllocation::Custom {
            shares: vec![BedShare::new("bedX", 60.0), BedShare::new("bedY", 20.0)],
        });

    let summaries = planner.bed_allocations(&item, &beds);
    assert_eq!(summaries[0].season_committed_space, SpaceCost::cells(60.0));
    assert_eq!(summaries[0].peak_concurrent_space, SpaceCost::cells(15.0));
    assert_relative_eq!(summaries[0].utilization_percent, 60.0 / 64.0 * 100.0);
    assert_eq!(summaries[1].per_planting_quantity, 5.0);
    assert_relative_eq!(summaries[1].utilization_percent, 62.5);

    // The plan-wide report counts one wave at a time
    let report = planner.space_report(&[item], &beds, &[]);
    assert_relative_eq!(report.needed(PlanningMethod::SquareFoot), 20.0);
}

#[test]
fn test_mixed_plan_report() {
    let planner = planner();
    let beds = vec![
        Bed::new("A", 4.0, 4.0, PlanningMethod::SquareFoot),
        Bed::new("B", 4.0, 8.0, PlanningMethod::Row),
    ];
    let items = vec![
        PlanLineItem::new("lettuce", "lettuce", 64.0)
            .with_succession(4, 14, None)
            .with_allocation(even(&["A"])),
        PlanLineItem::new("tomato", "tomato", 4.0).with_allocation(even(&["B"])),
        PlanLineItem::new("cucumber", "cucumber", 4.0),
    ];

    let report = planner.space_report(&items, &beds, &[]);

    let sfg = report.method(PlanningMethod::SquareFoot).unwrap();
    assert_relative_eq!(sfg.needed, 4.0);
    assert_relative_eq!(sfg.available, 16.0);
    assert_relative_eq!(sfg.utilization_percent, 25.0);

    // 36" rows × 24" in-row = 6 cells per tomato
    let row = report.method(PlanningMethod::Row).unwrap();
    assert_relative_eq!(row.needed, 24.0);
    assert_relative_eq!(row.utilization_percent, 75.0);

    assert_relative_eq!(report.overall.needed, 28.0);
    assert_relative_eq!(report.overall.available, 48.0);
    assert!(!report.overall.is_over_capacity());

    // Trellis footage never lands in a bed pool
    assert_relative_eq!(report.trellis.needed_feet, 8.0);
    assert_eq!(report.trellis.available_feet, 0.0);
    assert_eq!(report.trellis.utilization_percent, 0.0);
    assert!(report.trellis.is_over_capacity());
}

#[test]
fn test_seed_density_ignores_bed_method() {
    let planner = planner();
    assert_eq!(planner.quantity_unit("carrot"), QuantityUnit::Seeds);

    // 4" rows at 1 seed per inch = 36 seeds per square foot
    for method in [PlanningMethod::SquareFoot, PlanningMethod::Intensive, PlanningMethod::Row] {
        let beds = vec![Bed::new("b", 4.0, 4.0, method)];
        let item = PlanLineItem::new("c", "carrot", 360.0).with_allocation(even(&["b"]));
        let report = planner.space_report(&[item], &beds, &[]);
        assert_relative_eq!(report.needed(method), 10.0, epsilon = 1e-9);
    }

    assert_relative_eq!(planner.plants_that_fit("carrot", PlanningMethod::SquareFoot, 1.0), 36.0);
}

#[test]
fn test_grid_granularity_scales_cells_not_utilization() {
    let coarse = planner();
    let fine = GardenPlanner::builtin(PlannerConfig { grid_granularity_inches: 6.0, ..Default::default() }).unwrap();

    let beds = vec![Bed::new("b", 4.0, 4.0, PlanningMethod::SquareFoot)];
    let items = vec![PlanLineItem::new("t", "tomato", 4.0).with_allocation(even(&["b"]))];

    assert_eq!(fine.space_cost("tomato", PlanningMethod::SquareFoot), SpaceCost::cells(4.0));

    let coarse_report = coarse.space_report(&items, &beds, &[]);
    let fine_report = fine.space_report(&items, &beds, &[]);
    assert_relative_eq!(fine_report.overall.needed, 16.0);
    assert_relative_eq!(fine_report.overall.available, 64.0);
    assert_relative_eq!(fine_report.overall.utilization_percent, coarse_report.overall.utilization_percent);
}

#[test]
fn test_bed_suggestion_matches_report() {
    let planner = planner();
    let beds = vec![
        Bed::new("A", 2.0, 5.0, PlanningMethod::SquareFoot),
        Bed::new("B", 1.0, 5.0, PlanningMethod::SquareFoot),
        Bed::new("C", 4.0, 5.0, PlanningMethod::SquareFoot),
    ];
    let item = PlanLineItem::new("t", "tomato", 12.0)
        .with_succession(2, 21, None)
        .with_allocation(even(&["A", "B", "C"]));

    let report = planner.space_report(std::slice::from_ref(&item), &beds, &[]);
    match planner.minimize_beds(&item, &beds) {
        BedOptimization::Suggested { required_space, prefix } => {
            assert_relative_eq!(required_space, report.needed(PlanningMethod::SquareFoot));
            assert_relative_eq!(required_space, 6.0);
            assert_eq!(prefix.min_beds_needed, 1);
            assert_eq!(prefix.required_bed_ids, vec!["A"]);
            assert_eq!(prefix.extra_bed_ids, vec!["B", "C"]);
        }
        other => panic!("expected suggestion, got {:?}", other),
    }
}

#[test]
fn test_trellis_plants_on_structures() {
    let planner = planner();
    let trellises = vec![
        TrellisStructure { id: "fence".into(), total_length_feet: 10.0 },
        TrellisStructure { id: "arch".into(), total_length_feet: 6.0 },
    ];
    let item = PlanLineItem::new("pb", "pole-bean", 20.0).with_allocation(even(&["fence", "arch"]));

    let summaries = planner.allocations(&item, &[], &trellises);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].season_committed_space.unit, SpaceUnit::LinearFeet);
    assert_relative_eq!(summaries[0].season_committed_space.amount, 5.0);
    assert_relative_eq!(summaries[0].utilization_percent, 50.0);

    let report = planner.space_report(std::slice::from_ref(&item), &[], &trellises);
    assert_relative_eq!(report.trellis.needed_feet, 10.0);
    assert_relative_eq!(report.trellis.available_feet, 16.0);
    assert_relative_eq!(report.overall.needed, 0.0);

    assert_relative_eq!(planner.plants_that_fit("cucumber", PlanningMethod::SquareFoot, 10.0), 5.0);
}

#[test]
fn test_plan_from_json() {
    let json = r#"{
        "beds": [
            {"id": "north", "width_feet": 4, "length_feet": 4, "method": "square-foot"},
            {"id": "south", "width_feet": 4, "length_feet": 4, "method": "intensive"}
        ],
        "trellises": [{"id": "fence", "total_length_feet": 12}],
        "line_items": [
            {"id": "li-1", "plant_id": "pepper", "target_quantity": 8,
             "allocation": {"mode": "even", "target_ids": ["north", "south"]}},
            {"id": "li-2", "plant_id": "cucumber", "target_quantity": 3,
             "allocation": {"mode": "even", "target_ids": ["fence"]}}
        ]
    }"#;
    let plan: GardenPlan = serde_json::from_str(json).unwrap();
    assert!(plan.validate().is_ok());

    let report = planner().plan_report(&plan);
    // 4 peppers at 1 cell, 4 peppers at 12" on center = 1 cell each
    assert_relative_eq!(report.needed(PlanningMethod::SquareFoot), 4.0);
    assert_relative_eq!(report.needed(PlanningMethod::Intensive), 4.0);
    assert_relative_eq!(report.trellis.needed_feet, 6.0);
    assert_relative_eq!(report.trellis.utilization_percent, 50.0);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["by_method"][0]["method"], "square-foot");
    assert_eq!(value["by_method"][0]["needed"], 4.0);
}

#[test]
fn test_succession_cap_shared_by_export_and_report() {
    let planner = planner();
    let beds = vec![Bed::new("b", 4.0, 4.0, PlanningMethod::SquareFoot)];
    let item = PlanLineItem::new("t", "tomato", 24.0)
        .with_succession(12, 7, None)
        .with_allocation(even(&["b"]));

    let series = planner.export_successions(&item);
    assert_eq!(series[0].plantings.len(), 8);
    let per_instance = series[0].plantings[0].quantity;
    assert_eq!(per_instance, 3.0);

    let report = planner.space_report(std::slice::from_ref(&item), &beds, &[]);
    assert_relative_eq!(report.needed(PlanningMethod::SquareFoot), per_instance);

    let summaries = planner.bed_allocations(&item, &beds);
    assert_eq!(summaries[0].per_planting_quantity, per_instance);
    assert_eq!(summaries[0].peak_concurrent_space, SpaceCost::cells(per_instance));
}
