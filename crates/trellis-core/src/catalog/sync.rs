//! Catalog sync: writes fetched entries into the local `plants` snapshot.
//!
//! All entries are upserted inside a single transaction so a failed sync
//! leaves the previous snapshot untouched. Upsert-by-id (rather than
//! delete-and-reload) keeps placement foreign keys valid across syncs.

use anyhow::{Context, Result};
use sqlx::PgPool;

use trellis_db::queries::plants as plant_db;

use super::{CatalogEntry, validate_entries};

/// Counts from one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    pub inserted: usize,
    pub updated: usize,
}

/// Upsert all `entries` into the `plants` table in one transaction.
///
/// Entries are validated first; nothing is written when the feed itself is
/// broken. Returns how many rows were newly inserted vs updated in place.
pub async fn sync_catalog(pool: &PgPool, entries: &[CatalogEntry]) -> Result<SyncStats> {
    validate_entries(entries).context("catalog feed failed validation")?;

    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let mut stats = SyncStats {
        inserted: 0,
        updated: 0,
    };

    for entry in entries {
        let existed: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM plants WHERE id = $1)")
            .bind(&entry.id)
            .fetch_one(&mut *tx)
            .await
            .with_context(|| format!("failed to check for existing plant {:?}", entry.id))?;

        plant_db::upsert_plant(
            &mut *tx,
            &entry.id,
            &entry.name,
            entry.latin_name.as_deref(),
            &entry.companions,
            &entry.incompatibles,
            &entry.sowing.start,
            &entry.sowing.end,
            &entry.care_steps,
        )
        .await?;

        if existed {
            stats.updated += 1;
        } else {
            stats.inserted += 1;
        }
    }

    tx.commit().await.context("failed to commit transaction")?;

    tracing::info!(
        inserted = stats.inserted,
        updated = stats.updated,
        "catalog sync complete"
    );
    Ok(stats)
}
