//! `trellis sync` and `trellis catalog ...` commands.

use anyhow::Result;
use chrono::Local;
use sqlx::PgPool;

use trellis_core::catalog;
use trellis_core::schedule;
use trellis_db::queries::plants as plant_db;

use crate::resolve;

/// Fetch the remote catalog and upsert it into the local snapshot.
pub async fn run_sync(pool: &PgPool, url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let entries = catalog::fetch_catalog(&client, url).await?;
    let stats = catalog::sync_catalog(pool, &entries).await?;

    println!(
        "Catalog synced from {url}: {} new, {} updated, {} total.",
        stats.inserted,
        stats.updated,
        entries.len()
    );
    Ok(())
}

/// List the catalog. With `sowable_only`, show just the plants whose sowing
/// window contains today.
pub async fn run_catalog_list(pool: &PgPool, sowable_only: bool) -> Result<()> {
    let plants = plant_db::list_plants(pool).await?;
    if plants.is_empty() {
        println!("Catalog is empty. Run `trellis sync` first.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut shown = 0;
    for plant in &plants {
        let sowable = schedule::sowing_open(plant, today);
        if sowable_only && !sowable {
            continue;
        }
        shown += 1;
        let marker = if sowable { "*" } else { " " };
        match &plant.latin_name {
            Some(latin) => println!("{marker} {:<24} {} ({latin})", plant.id, plant.name),
            None => println!("{marker} {:<24} {}", plant.id, plant.name),
        }
    }

    if sowable_only {
        println!("\n{shown} plant(s) sowable today.");
    } else {
        println!("\n{shown} plant(s). * = sowing window open today.");
    }
    Ok(())
}

/// Show one catalog entry in full.
pub async fn run_catalog_show(pool: &PgPool, plant_ref: &str) -> Result<()> {
    let plant = resolve::resolve_plant(pool, plant_ref).await?;
    let today = Local::now().date_naive();

    println!("{} ({})", plant.name, plant.id);
    if let Some(latin) = &plant.latin_name {
        println!("Latin name: {latin}");
    }

    let sowing = plant.sowing_window();
    if sowing.is_unset() {
        println!("Sowing: no window defined");
    } else {
        let open = if schedule::sowing_open(&plant, today) {
            "open today"
        } else {
            "closed today"
        };
        println!("Sowing: {} .. {} ({open})", sowing.start, sowing.end);
    }

    if !plant.companions.is_empty() {
        println!("Companions: {}", plant.companions.join(", "));
    }
    if !plant.incompatibles.is_empty() {
        println!("Incompatible with: {}", plant.incompatibles.join(", "));
    }

    if plant.care_steps.is_empty() {
        println!("Care steps: none");
    } else {
        println!("Care steps:");
        for step in plant.care_steps.iter() {
            let now = if schedule::is_upcoming(&step.window, today) {
                "  <- now"
            } else {
                ""
            };
            println!(
                "  {} .. {}  {}{now}",
                step.window.start, step.window.end, step.label
            );
        }
    }
    println!("Last synced: {}", plant.synced_at.format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(())
}
