//! Database query functions for the `gardens` and `locations` tables.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Garden, Location};

/// Insert a new garden. Returns the inserted row with server-generated
/// defaults (id, created_at).
pub async fn insert_garden(pool: &PgPool, name: &str) -> Result<Garden> {
    let garden =
        sqlx::query_as::<_, Garden>("INSERT INTO gardens (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(pool)
            .await
            .with_context(|| format!("failed to insert garden {name:?}"))?;

    Ok(garden)
}

/// Fetch a garden by its ID.
pub async fn get_garden(pool: &PgPool, id: Uuid) -> Result<Option<Garden>> {
    let garden = sqlx::query_as::<_, Garden>("SELECT * FROM gardens WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch garden")?;

    Ok(garden)
}

/// Fetch a garden by its exact name (names are unique).
pub async fn get_garden_by_name(pool: &PgPool, name: &str) -> Result<Option<Garden>> {
    let garden = sqlx::query_as::<_, Garden>("SELECT * FROM gardens WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
        .context("failed to fetch garden by name")?;

    Ok(garden)
}

/// List all gardens, oldest first.
pub async fn list_gardens(pool: &PgPool) -> Result<Vec<Garden>> {
    let gardens = sqlx::query_as::<_, Garden>("SELECT * FROM gardens ORDER BY created_at, id")
        .fetch_all(pool)
        .await
        .context("failed to list gardens")?;

    Ok(gardens)
}

/// Insert a new location within a garden.
pub async fn insert_location(pool: &PgPool, garden_id: Uuid, name: &str) -> Result<Location> {
    let location = sqlx::query_as::<_, Location>(
        "INSERT INTO locations (garden_id, name) VALUES ($1, $2) RETURNING *",
    )
    .bind(garden_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert location {name:?}"))?;

    Ok(location)
}

/// Fetch a location by its ID.
pub async fn get_location(pool: &PgPool, id: Uuid) -> Result<Option<Location>> {
    let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch location")?;

    Ok(location)
}

/// List all locations across gardens, garden order then creation order.
pub async fn list_locations(pool: &PgPool) -> Result<Vec<Location>> {
    let locations = sqlx::query_as::<_, Location>(
        "SELECT * FROM locations ORDER BY garden_id, created_at, id",
    )
    .fetch_all(pool)
    .await
    .context("failed to list locations")?;

    Ok(locations)
}

/// List the locations of one garden, oldest first.
pub async fn list_locations_for_garden(pool: &PgPool, garden_id: Uuid) -> Result<Vec<Location>> {
    let locations = sqlx::query_as::<_, Location>(
        "SELECT * FROM locations WHERE garden_id = $1 ORDER BY created_at, id",
    )
    .bind(garden_id)
    .fetch_all(pool)
    .await
    .context("failed to list locations for garden")?;

    Ok(locations)
}

/// Find locations by exact name across all gardens. More than one garden may
/// use the same location name, so this returns a list.
pub async fn find_locations_by_name(pool: &PgPool, name: &str) -> Result<Vec<Location>> {
    let locations = sqlx::query_as::<_, Location>(
        "SELECT * FROM locations WHERE lower(name) = lower($1) ORDER BY garden_id, id",
    )
    .bind(name)
    .fetch_all(pool)
    .await
    .context("failed to find locations by name")?;

    Ok(locations)
}
