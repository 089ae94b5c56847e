//! Upcoming-task assembly: joins a location's placements to their catalog
//! plants and collects every care step whose window contains today.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use trellis_db::models::{DateRange, Placement, Plant};

use super::is_upcoming;

/// One care task currently in-window for a placed plant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingTask {
    pub placement_id: Uuid,
    pub plant_name: String,
    pub label: String,
    pub window: DateRange,
}

/// Collect the upcoming care tasks for a set of placements.
///
/// `plants` is the catalog snapshot the placements reference. Output order
/// follows placement order, then care-step order within each plant.
/// Placements whose catalog plant is missing from the snapshot are skipped;
/// they have no schedule to evaluate.
pub fn upcoming_tasks(
    placements: &[Placement],
    plants: &[Plant],
    today: NaiveDate,
) -> Vec<UpcomingTask> {
    let by_id: HashMap<&str, &Plant> = plants.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut tasks = Vec::new();
    for placement in placements {
        let Some(plant) = by_id.get(placement.plant_id.as_str()) else {
            tracing::warn!(
                placement_id = %placement.id,
                plant_id = %placement.plant_id,
                "placement references a plant missing from the catalog snapshot"
            );
            continue;
        };

        for step in plant.care_steps.iter() {
            if is_upcoming(&step.window, today) {
                tasks.push(UpcomingTask {
                    placement_id: placement.id,
                    plant_name: placement.name.clone(),
                    label: step.label.clone(),
                    window: step.window.clone(),
                });
            }
        }
    }

    tasks
}

/// True when the plant's sowing window contains today.
pub fn sowing_open(plant: &Plant, today: NaiveDate) -> bool {
    is_upcoming(&plant.sowing_window(), today)
}
