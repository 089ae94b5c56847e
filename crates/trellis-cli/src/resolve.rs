//! Plant and location argument resolution.
//!
//! Commands accept human-friendly references: a plant is an exact catalog
//! id or a unique case-insensitive name fragment; a location is a UUID, a
//! `garden/location` pair, or a bare location name that is unique across
//! gardens. Ambiguity is an error that lists the candidates.

use anyhow::{Context, Result, bail};
use sqlx::PgPool;
use uuid::Uuid;

use trellis_db::models::{Location, Plant};
use trellis_db::queries::gardens as garden_db;
use trellis_db::queries::plants as plant_db;

/// Resolve a plant reference: exact id first, then unique name fragment.
pub async fn resolve_plant(pool: &PgPool, input: &str) -> Result<Plant> {
    if let Some(plant) = plant_db::get_plant(pool, input).await? {
        return Ok(plant);
    }

    let mut hits = plant_db::search_plants(pool, input).await?;
    match hits.len() {
        0 => bail!(
            "no catalog plant matches {input:?}.\n\
             Run `trellis catalog list`, or `trellis sync` if the catalog is empty."
        ),
        1 => Ok(hits.remove(0)),
        _ => {
            let candidates: Vec<String> = hits
                .iter()
                .map(|p| format!("{} ({})", p.id, p.name))
                .collect();
            bail!(
                "plant reference {input:?} is ambiguous; candidates:\n  {}",
                candidates.join("\n  ")
            )
        }
    }
}

/// Resolve a location reference: UUID, `garden/location`, or a bare name
/// that is unique across gardens.
pub async fn resolve_location(pool: &PgPool, input: &str) -> Result<Location> {
    if let Ok(id) = Uuid::parse_str(input) {
        return garden_db::get_location(pool, id)
            .await?
            .with_context(|| format!("location {id} not found"));
    }

    if let Some((garden_name, location_name)) = input.split_once('/') {
        let garden = garden_db::get_garden_by_name(pool, garden_name)
            .await?
            .with_context(|| format!("garden {garden_name:?} not found"))?;
        let locations = garden_db::list_locations_for_garden(pool, garden.id).await?;
        return locations
            .into_iter()
            .find(|l| l.name.eq_ignore_ascii_case(location_name))
            .with_context(|| {
                format!("garden {garden_name:?} has no location {location_name:?}")
            });
    }

    let mut hits = garden_db::find_locations_by_name(pool, input).await?;
    match hits.len() {
        0 => bail!("no location named {input:?}; run `trellis location list`"),
        1 => Ok(hits.remove(0)),
        _ => {
            let mut candidates = Vec::with_capacity(hits.len());
            for location in &hits {
                let garden = garden_db::get_garden(pool, location.garden_id)
                    .await?
                    .with_context(|| format!("garden {} not found", location.garden_id))?;
                candidates.push(format!("{}/{}", garden.name, location.name));
            }
            bail!(
                "location name {input:?} is ambiguous; qualify it as one of:\n  {}",
                candidates.join("\n  ")
            )
        }
    }
}
