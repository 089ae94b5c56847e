//! Remote plant catalog: wire format, fetch, and validation.
//!
//! The catalog is a shared read-only document set served as a single JSON
//! array. Each entry carries the plant's naming, its declared companion and
//! incompatible species, a sowing window, and the recurring care steps.
//! Unknown fields are ignored so the server side can evolve ahead of us.

pub mod sync;

pub use sync::{SyncStats, sync_catalog};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use thiserror::Error;

use trellis_db::models::{CareStep, DateRange};

/// One plant entry as served by the remote catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub latin_name: Option<String>,
    #[serde(default)]
    pub companions: Vec<String>,
    #[serde(default)]
    pub incompatibles: Vec<String>,
    #[serde(default)]
    pub sowing: DateRange,
    #[serde(default)]
    pub care_steps: Vec<CareStep>,
}

/// Validation errors for fetched catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog entry at index {index} has an empty id")]
    EmptyId { index: usize },

    #[error("catalog entry {id:?} has an empty name")]
    EmptyName { id: String },

    #[error("duplicate catalog id {id:?}")]
    DuplicateId { id: String },
}

/// Validate fetched entries before they touch the database.
///
/// Checks ids are present and unique and names are non-empty. Returns the
/// first violation; a broken catalog feed should be fixed at the source,
/// not partially imported.
pub fn validate_entries(entries: &[CatalogEntry]) -> Result<(), CatalogError> {
    let mut seen = std::collections::HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        if entry.id.trim().is_empty() {
            return Err(CatalogError::EmptyId { index });
        }
        if entry.name.trim().is_empty() {
            return Err(CatalogError::EmptyName {
                id: entry.id.clone(),
            });
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: entry.id.clone(),
            });
        }
    }
    Ok(())
}

/// Fetch the full catalog from `url` and decode it.
///
/// Non-2xx responses are an error; so is a body that fails to decode.
pub async fn fetch_catalog(client: &reqwest::Client, url: &str) -> Result<Vec<CatalogEntry>> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to reach catalog at {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("catalog fetch from {url} returned {status}");
    }

    let entries: Vec<CatalogEntry> = response
        .json()
        .await
        .context("failed to decode catalog JSON")?;

    tracing::info!(count = entries.len(), url, "fetched catalog");
    Ok(entries)
}
