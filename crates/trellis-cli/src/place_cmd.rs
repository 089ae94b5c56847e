//! `trellis check`, `trellis place`, `trellis remove`, and
//! `trellis placements` commands.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use trellis_core::garden::{self, CompatCheck};
use trellis_db::queries::gardens as garden_db;
use trellis_db::queries::placements as placement_db;

use crate::resolve;

fn print_check(check: &CompatCheck) {
    if check.companions.is_empty() && check.incompatibles.is_empty() {
        println!("No declared relationships with the plants already there.");
        return;
    }

    if !check.companions.is_empty() {
        println!("Companions here:");
        for p in &check.companions {
            println!("  + {} ({})", p.name, p.plant_id);
        }
    }
    if !check.incompatibles.is_empty() {
        println!("Incompatible here:");
        for p in &check.incompatibles {
            println!("  ! {} ({})", p.name, p.plant_id);
        }
    }

    // Contradictory catalog data can land a plant on both sides; point it
    // out rather than resolving it.
    let both: Vec<&str> = check
        .companions
        .iter()
        .filter(|c| check.incompatibles.iter().any(|i| i.id == c.id))
        .map(|p| p.name.as_str())
        .collect();
    if !both.is_empty() {
        println!(
            "Note: listed as both companion and incompatible: {}.",
            both.join(", ")
        );
    }
}

/// Dry-run compatibility of a plant against a location.
pub async fn run_check(pool: &PgPool, plant_ref: &str, location_ref: &str) -> Result<()> {
    let plant = resolve::resolve_plant(pool, plant_ref).await?;
    let location = resolve::resolve_location(pool, location_ref).await?;

    println!("Checking {} at {}:", plant.name, location.name);
    let check = garden::check_placement(pool, location.id, &plant).await?;
    print_check(&check);
    Ok(())
}

/// Place a plant at a location and report what it joined.
pub async fn run_place(pool: &PgPool, plant_ref: &str, location_ref: &str) -> Result<()> {
    let plant = resolve::resolve_plant(pool, plant_ref).await?;
    let location = resolve::resolve_location(pool, location_ref).await?;

    let outcome = garden::place_plant(pool, location.id, &plant).await?;
    println!(
        "Placed {} at {} ({}).",
        outcome.placement.name, location.name, outcome.placement.id
    );
    print_check(&outcome.check);
    Ok(())
}

/// Remove a placement by id.
pub async fn run_remove(pool: &PgPool, placement_id: &str) -> Result<()> {
    let id = Uuid::parse_str(placement_id)
        .with_context(|| format!("invalid placement ID: {placement_id}"))?;
    garden::remove_placement(pool, id).await?;
    println!("Removed placement {id}.");
    Ok(())
}

/// List placements, for one location or everywhere.
pub async fn run_placements(pool: &PgPool, location_ref: Option<&str>) -> Result<()> {
    let placements = match location_ref {
        Some(loc_ref) => {
            let location = resolve::resolve_location(pool, loc_ref).await?;
            println!("Placements at {}:", location.name);
            placement_db::list_placements_for_location(pool, location.id).await?
        }
        None => {
            println!("All placements:");
            placement_db::list_all_placements(pool).await?
        }
    };

    if placements.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for placement in &placements {
        let location = garden_db::get_location(pool, placement.location_id)
            .await?
            .with_context(|| format!("location {} not found", placement.location_id))?;
        println!(
            "  {:<20} at {:<16} placed {}  ({})",
            placement.name,
            location.name,
            placement.placed_at.format("%Y-%m-%d"),
            placement.id
        );
    }
    Ok(())
}
