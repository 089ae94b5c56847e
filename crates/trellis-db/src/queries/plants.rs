//! Database query functions for the `plants` table (catalog snapshot).

use anyhow::{Context, Result};
use sqlx::{PgExecutor, PgPool};

use crate::models::{CareStep, Plant};

/// Insert a catalog plant, or update it in place when the id already exists.
///
/// Returns the stored row. `synced_at` is bumped to now on every call so a
/// sync run leaves a uniform timestamp. Generic over the executor so callers
/// can run it inside a transaction.
pub async fn upsert_plant<'e>(
    executor: impl PgExecutor<'e>,
    id: &str,
    name: &str,
    latin_name: Option<&str>,
    companions: &[String],
    incompatibles: &[String],
    sowing_start: &str,
    sowing_end: &str,
    care_steps: &[CareStep],
) -> Result<Plant> {
    let plant = sqlx::query_as::<_, Plant>(
        "INSERT INTO plants \
             (id, name, latin_name, companions, incompatibles, \
              sowing_start, sowing_end, care_steps, synced_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now()) \
         ON CONFLICT (id) DO UPDATE SET \
             name = EXCLUDED.name, \
             latin_name = EXCLUDED.latin_name, \
             companions = EXCLUDED.companions, \
             incompatibles = EXCLUDED.incompatibles, \
             sowing_start = EXCLUDED.sowing_start, \
             sowing_end = EXCLUDED.sowing_end, \
             care_steps = EXCLUDED.care_steps, \
             synced_at = now() \
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(latin_name)
    .bind(companions)
    .bind(incompatibles)
    .bind(sowing_start)
    .bind(sowing_end)
    .bind(sqlx::types::Json(care_steps))
    .fetch_one(executor)
    .await
    .with_context(|| format!("failed to upsert plant {id:?}"))?;

    Ok(plant)
}

/// Fetch a catalog plant by its id.
pub async fn get_plant(pool: &PgPool, id: &str) -> Result<Option<Plant>> {
    let plant = sqlx::query_as::<_, Plant>("SELECT * FROM plants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch plant")?;

    Ok(plant)
}

/// List the whole catalog, alphabetical by display name.
pub async fn list_plants(pool: &PgPool) -> Result<Vec<Plant>> {
    let plants = sqlx::query_as::<_, Plant>("SELECT * FROM plants ORDER BY name, id")
        .fetch_all(pool)
        .await
        .context("failed to list plants")?;

    Ok(plants)
}

/// Find catalog plants whose id or name contains `fragment`,
/// case-insensitively. Used for name-based resolution in the CLI.
pub async fn search_plants(pool: &PgPool, fragment: &str) -> Result<Vec<Plant>> {
    let pattern = format!("%{}%", fragment.replace('%', "\\%").replace('_', "\\_"));
    let plants = sqlx::query_as::<_, Plant>(
        "SELECT * FROM plants \
         WHERE id ILIKE $1 OR name ILIKE $1 \
         ORDER BY name, id",
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await
    .context("failed to search plants")?;

    Ok(plants)
}

/// Count catalog rows.
pub async fn count_plants(pool: &PgPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plants")
        .fetch_one(pool)
        .await
        .context("failed to count plants")?;

    Ok(count)
}
