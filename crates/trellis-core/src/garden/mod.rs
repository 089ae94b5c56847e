//! Placement service: placing and removing plants at garden locations.
//!
//! Every operation takes the pool explicitly; the storage handle is
//! constructed once in `main` (or a test) and passed down. Compatibility is
//! always evaluated against a fully materialized snapshot of the location's
//! placements.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use trellis_db::models::{Placement, Plant};
use trellis_db::queries::gardens as garden_db;
use trellis_db::queries::placements as placement_db;

use crate::compat;

/// Owned companion/incompatible partition for one candidate at one location.
///
/// A placement may appear in both lists when the underlying data is
/// contradictory; callers decide what to make of that.
#[derive(Debug, Clone)]
pub struct CompatCheck {
    pub companions: Vec<Placement>,
    pub incompatibles: Vec<Placement>,
}

impl CompatCheck {
    /// True when nothing at the location is declared incompatible.
    pub fn is_clear(&self) -> bool {
        self.incompatibles.is_empty()
    }
}

/// Result of placing a plant: the new row plus the compatibility report
/// that was computed against the placements already there.
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    pub placement: Placement,
    pub check: CompatCheck,
}

fn to_check(report: compat::CompatReport<'_, Placement>) -> CompatCheck {
    CompatCheck {
        companions: report.companions.into_iter().cloned().collect(),
        incompatibles: report.incompatibles.into_iter().cloned().collect(),
    }
}

/// Dry-run compatibility: evaluate `plant` against the placements at
/// `location_id` without writing anything.
pub async fn check_placement(
    pool: &PgPool,
    location_id: Uuid,
    plant: &Plant,
) -> Result<CompatCheck> {
    garden_db::get_location(pool, location_id)
        .await?
        .with_context(|| format!("location {location_id} not found"))?;

    let existing = placement_db::list_placements_for_location(pool, location_id).await?;
    Ok(to_check(compat::partition_default(plant, &existing)))
}

/// Place `plant` at `location_id`.
///
/// Reads the location's placements and inserts the new row in one
/// transaction, so the returned report describes exactly the set the plant
/// joined. The new placement's companion/incompatible lists are seeded from
/// the catalog entry. Incompatibles do not block placement; the report is
/// surfaced and the caller judges.
pub async fn place_plant(
    pool: &PgPool,
    location_id: Uuid,
    plant: &Plant,
) -> Result<PlacementOutcome> {
    garden_db::get_location(pool, location_id)
        .await?
        .with_context(|| format!("location {location_id} not found"))?;

    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let existing = placement_db::list_placements_for_location(&mut *tx, location_id).await?;
    let check = to_check(compat::partition_default(plant, &existing));

    let placement = placement_db::insert_placement(
        &mut *tx,
        location_id,
        &plant.id,
        &plant.name,
        &plant.companions,
        &plant.incompatibles,
    )
    .await?;

    tx.commit().await.context("failed to commit transaction")?;

    if !check.is_clear() {
        tracing::warn!(
            plant = %plant.id,
            location = %location_id,
            conflicts = check.incompatibles.len(),
            "placed plant alongside declared incompatibles"
        );
    }

    Ok(PlacementOutcome { placement, check })
}

/// Remove a placement by id.
pub async fn remove_placement(pool: &PgPool, placement_id: Uuid) -> Result<()> {
    placement_db::delete_placement(pool, placement_id)
        .await
        .with_context(|| format!("failed to remove placement {placement_id}"))
}
