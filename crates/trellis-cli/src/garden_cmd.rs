//! `trellis garden ...` and `trellis location ...` commands.

use anyhow::{Context, Result};
use sqlx::PgPool;

use trellis_db::queries::gardens as garden_db;
use trellis_db::queries::placements as placement_db;

/// Create a garden.
pub async fn run_garden_add(pool: &PgPool, name: &str) -> Result<()> {
    let garden = garden_db::insert_garden(pool, name).await?;
    println!("Created garden {:?} ({}).", garden.name, garden.id);
    Ok(())
}

/// List gardens with their location counts.
pub async fn run_garden_list(pool: &PgPool) -> Result<()> {
    let gardens = garden_db::list_gardens(pool).await?;
    if gardens.is_empty() {
        println!("No gardens yet. Run `trellis garden add <name>`.");
        return Ok(());
    }

    for garden in &gardens {
        let locations = garden_db::list_locations_for_garden(pool, garden.id).await?;
        println!(
            "{:<20} {} location(s)  ({})",
            garden.name,
            locations.len(),
            garden.id
        );
    }
    Ok(())
}

/// Create a location within a garden (referenced by name).
pub async fn run_location_add(pool: &PgPool, garden_name: &str, name: &str) -> Result<()> {
    let garden = garden_db::get_garden_by_name(pool, garden_name)
        .await?
        .with_context(|| format!("garden {garden_name:?} not found"))?;

    let location = garden_db::insert_location(pool, garden.id, name).await?;
    println!(
        "Created location {}/{} ({}).",
        garden.name, location.name, location.id
    );
    Ok(())
}

/// List all locations, grouped by garden, with placement counts.
pub async fn run_location_list(pool: &PgPool) -> Result<()> {
    let gardens = garden_db::list_gardens(pool).await?;
    if gardens.is_empty() {
        println!("No gardens yet. Run `trellis garden add <name>`.");
        return Ok(());
    }

    for garden in &gardens {
        println!("{}:", garden.name);
        let locations = garden_db::list_locations_for_garden(pool, garden.id).await?;
        if locations.is_empty() {
            println!("  (no locations)");
            continue;
        }
        for location in &locations {
            let placements =
                placement_db::list_placements_for_location(pool, location.id).await?;
            println!(
                "  {:<20} {} plant(s)  ({})",
                location.name,
                placements.len(),
                location.id
            );
        }
    }
    Ok(())
}
