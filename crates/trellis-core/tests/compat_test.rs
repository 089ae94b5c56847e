//! Compatibility evaluator tests against the real row types.
//!
//! The inline unit tests in `compat` cover the algorithm over a minimal
//! subject; these exercise the `CompatSubject` implementations for catalog
//! plants and placements, which is what production callers feed in.

use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use trellis_core::compat::{self, ExactMatcher, SubstringMatcher, WordMatcher};
use trellis_db::models::{Placement, Plant};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn plant(id: &str, name: &str) -> Plant {
    Plant {
        id: id.to_owned(),
        name: name.to_owned(),
        latin_name: None,
        companions: Vec::new(),
        incompatibles: Vec::new(),
        sowing_start: String::new(),
        sowing_end: String::new(),
        care_steps: Json(Vec::new()),
        synced_at: Utc::now(),
    }
}

fn plant_with_lists(id: &str, name: &str, companions: &[&str], incompatibles: &[&str]) -> Plant {
    let mut p = plant(id, name);
    p.companions = companions.iter().map(|s| (*s).to_owned()).collect();
    p.incompatibles = incompatibles.iter().map(|s| (*s).to_owned()).collect();
    p
}

fn placement(plant_id: &str, name: &str, companions: &[&str], incompatibles: &[&str]) -> Placement {
    Placement {
        id: Uuid::new_v4(),
        location_id: Uuid::new_v4(),
        plant_id: plant_id.to_owned(),
        name: name.to_owned(),
        companions: companions.iter().map(|s| (*s).to_owned()).collect(),
        incompatibles: incompatibles.iter().map(|s| (*s).to_owned()).collect(),
        placed_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn catalog_plant_finds_companion_placement_by_substring() {
    let candidate = plant_with_lists("basil", "Basil", &["tomato"], &[]);
    let existing = vec![placement("cherry-tomato", "Cherry Tomato", &[], &[])];

    let report = compat::partition_default(&candidate, &existing);
    assert_eq!(report.companions.len(), 1);
    assert_eq!(report.companions[0].plant_id, "cherry-tomato");
    assert!(report.incompatibles.is_empty());
}

#[test]
fn case_differences_do_not_matter() {
    let candidate = plant_with_lists("basil", "BASIL", &["Tomato"], &[]);
    let existing = vec![placement("tomato", "tomato", &[], &[])];

    let report = compat::partition_default(&candidate, &existing);
    assert_eq!(report.companions.len(), 1);
}

#[test]
fn placed_side_declaration_is_enough() {
    // Candidate declares nothing; the placed plant's incompatibles list
    // names the candidate.
    let candidate = plant("fennel", "Fennel");
    let existing = vec![
        placement("tomato", "Tomato", &[], &["fennel"]),
        placement("dill", "Dill", &[], &[]),
    ];

    let report = compat::partition_default(&candidate, &existing);
    assert!(report.companions.is_empty());
    assert_eq!(report.incompatibles.len(), 1);
    assert_eq!(report.incompatibles[0].plant_id, "tomato");
}

#[test]
fn placement_lists_may_diverge_from_catalog() {
    // The user edited their placement's lists; the evaluator reads the
    // placement's own copy, not the catalog entry it came from.
    let candidate = plant("marigold", "Marigold");
    let existing = [placement("tomato", "Tomato", &["marigold"], &[])];

    let report = compat::partition_default(&candidate, &existing);
    assert_eq!(report.companions.len(), 1);
}

#[test]
fn both_lists_when_data_contradicts() {
    let candidate = plant_with_lists("mint", "Mint", &["chamomile"], &["chamomile"]);
    let existing = vec![placement("chamomile", "Chamomile", &[], &[])];

    let report = compat::partition_default(&candidate, &existing);
    assert_eq!(report.companions.len(), 1);
    assert_eq!(report.incompatibles.len(), 1);
    assert_eq!(
        report.companions[0].id, report.incompatibles[0].id,
        "the same placement should be surfaced on both sides"
    );
}

#[test]
fn result_order_follows_placement_order() {
    let candidate = plant_with_lists("basil", "Basil", &["tomato", "pepper", "oregano"], &[]);
    let existing = vec![
        placement("oregano", "Oregano", &[], &[]),
        placement("tomato", "Tomato", &[], &[]),
        placement("pepper", "Bell Pepper", &[], &[]),
    ];

    let report = compat::partition_default(&candidate, &existing);
    let ids: Vec<&str> = report
        .companions
        .iter()
        .map(|p| p.plant_id.as_str())
        .collect();
    assert_eq!(ids, ["oregano", "tomato", "pepper"]);
}

#[test]
fn substring_false_positive_is_accepted_behavior() {
    // "rose" inside "roses and thorns": the tolerance tradeoff of
    // substring matching, pinned so a silent strategy change shows up.
    let candidate = plant_with_lists("rose", "Rose", &[], &["rose"]);
    let existing = vec![placement("roses-and-thorns", "Roses and Thorns", &[], &[])];

    let report = compat::partition_default(&candidate, &existing);
    assert_eq!(report.incompatibles.len(), 1);
}

#[test]
fn strategy_swap_changes_only_matching_not_partition() {
    let candidate = plant_with_lists("basil", "Basil", &["tomato"], &[]);
    let existing = vec![
        placement("cherry-tomato", "Cherry Tomato", &[], &[]),
        placement("tomato", "Tomato", &[], &[]),
    ];

    let substring = compat::partition(&candidate, &existing, &SubstringMatcher);
    assert_eq!(substring.companions.len(), 2);

    let word = compat::partition(&candidate, &existing, &WordMatcher);
    assert_eq!(word.companions.len(), 2, "tomato is a word of both names");

    let exact = compat::partition(&candidate, &existing, &ExactMatcher);
    assert_eq!(exact.companions.len(), 1);
    assert_eq!(exact.companions[0].plant_id, "tomato");
}

#[test]
fn empty_inputs_produce_empty_report() {
    let candidate = plant("basil", "Basil");
    let existing: Vec<Placement> = Vec::new();

    let report = compat::partition_default(&candidate, &existing);
    assert!(report.companions.is_empty());
    assert!(report.incompatibles.is_empty());
}
