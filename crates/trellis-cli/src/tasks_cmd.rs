//! `trellis tasks` command: upcoming care tasks today.

use anyhow::Result;
use chrono::Local;
use sqlx::PgPool;

use trellis_core::schedule;
use trellis_db::models::Placement;
use trellis_db::queries::placements as placement_db;
use trellis_db::queries::plants as plant_db;

use crate::resolve;

/// Show every care task whose window contains today, for one location or
/// across all placements.
pub async fn run_tasks(pool: &PgPool, location_ref: Option<&str>) -> Result<()> {
    let placements: Vec<Placement> = match location_ref {
        Some(loc_ref) => {
            let location = resolve::resolve_location(pool, loc_ref).await?;
            println!("Upcoming tasks at {}:", location.name);
            placement_db::list_placements_for_location(pool, location.id).await?
        }
        None => {
            println!("Upcoming tasks:");
            placement_db::list_all_placements(pool).await?
        }
    };

    let plants = plant_db::list_plants(pool).await?;
    let today = Local::now().date_naive();

    let tasks = schedule::upcoming_tasks(&placements, &plants, today);
    if tasks.is_empty() {
        println!("  Nothing due today.");
        return Ok(());
    }

    for task in &tasks {
        println!(
            "  {:<20} {}  (window {} .. {})",
            task.plant_name, task.label, task.window.start, task.window.end
        );
    }
    println!("\n{} task(s) in window today.", tasks.len());
    Ok(())
}
