//! Database query functions for the `placements` table.

use anyhow::{Context, Result};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::Placement;

/// Insert a new placement. Returns the inserted row with server-generated
/// defaults (id, placed_at). Generic over the executor so the placement
/// service can run it inside a transaction.
pub async fn insert_placement<'e>(
    executor: impl PgExecutor<'e>,
    location_id: Uuid,
    plant_id: &str,
    name: &str,
    companions: &[String],
    incompatibles: &[String],
) -> Result<Placement> {
    let placement = sqlx::query_as::<_, Placement>(
        "INSERT INTO placements (location_id, plant_id, name, companions, incompatibles) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING *",
    )
    .bind(location_id)
    .bind(plant_id)
    .bind(name)
    .bind(companions)
    .bind(incompatibles)
    .fetch_one(executor)
    .await
    .with_context(|| format!("failed to insert placement of {plant_id:?}"))?;

    Ok(placement)
}

/// Fetch a placement by its ID.
pub async fn get_placement(pool: &PgPool, id: Uuid) -> Result<Option<Placement>> {
    let placement = sqlx::query_as::<_, Placement>("SELECT * FROM placements WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch placement")?;

    Ok(placement)
}

/// List the placements at one location.
///
/// Ordered by placement time then id: the compatibility evaluator preserves
/// input order, so this ordering is what users see in reports.
pub async fn list_placements_for_location<'e>(
    executor: impl PgExecutor<'e>,
    location_id: Uuid,
) -> Result<Vec<Placement>> {
    let placements = sqlx::query_as::<_, Placement>(
        "SELECT * FROM placements WHERE location_id = $1 ORDER BY placed_at, id",
    )
    .bind(location_id)
    .fetch_all(executor)
    .await
    .context("failed to list placements for location")?;

    Ok(placements)
}

/// List every placement across all locations, placement order.
pub async fn list_all_placements(pool: &PgPool) -> Result<Vec<Placement>> {
    let placements =
        sqlx::query_as::<_, Placement>("SELECT * FROM placements ORDER BY placed_at, id")
            .fetch_all(pool)
            .await
            .context("failed to list placements")?;

    Ok(placements)
}

/// Delete a placement. Fails when the id does not exist.
pub async fn delete_placement(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM placements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete placement")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("placement {id} not found");
    }

    Ok(())
}

/// Replace a placement's companion/incompatible lists (user edit).
pub async fn update_placement_lists(
    pool: &PgPool,
    id: Uuid,
    companions: &[String],
    incompatibles: &[String],
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE placements SET companions = $1, incompatibles = $2 WHERE id = $3",
    )
    .bind(companions)
    .bind(incompatibles)
    .bind(id)
    .execute(pool)
    .await
    .context("failed to update placement lists")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("placement {id} not found");
    }

    Ok(())
}
