//! Snapshot watcher: subscribe to a location and re-run the pure evaluators
//! on each new snapshot.
//!
//! The evaluators themselves stay synchronous and snapshot-oriented; this
//! module only owns the delivery loop. A [`SnapshotSource`] produces fully
//! materialized snapshots (never a partially loaded collection), the loop
//! polls it on a fixed interval, and a report is yielded only when it
//! differs from the previous one.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use futures::Stream;
use sqlx::PgPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use trellis_db::models::{Placement, Plant};
use trellis_db::queries::placements as placement_db;
use trellis_db::queries::plants as plant_db;

use crate::compat;
use crate::schedule::{UpcomingTask, upcoming_tasks};

/// A fully materialized view of one location: its placements plus the
/// catalog snapshot they reference.
#[derive(Debug, Clone)]
pub struct LocationSnapshot {
    pub placements: Vec<Placement>,
    pub plants: Vec<Plant>,
}

/// Produces location snapshots for the watch loop.
///
/// Implementations must return complete, self-consistent snapshots; the
/// evaluators are never run against a collection that is still loading.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn snapshot(&self, location_id: Uuid) -> Result<LocationSnapshot>;
}

/// Snapshot source backed by the database pool.
pub struct PgSnapshotSource {
    pool: PgPool,
}

impl PgSnapshotSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotSource for PgSnapshotSource {
    async fn snapshot(&self, location_id: Uuid) -> Result<LocationSnapshot> {
        let placements =
            placement_db::list_placements_for_location(&self.pool, location_id).await?;
        let plants = plant_db::list_plants(&self.pool).await?;
        Ok(LocationSnapshot { placements, plants })
    }
}

/// Two placements at the same location declared incompatible with each
/// other (by either side's list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub first_id: Uuid,
    pub first_name: String,
    pub second_id: Uuid,
    pub second_name: String,
}

/// What a location looks like right now: in-window care tasks plus any
/// incompatible pairs currently sharing the location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationReport {
    pub upcoming: Vec<UpcomingTask>,
    pub conflicts: Vec<Conflict>,
}

/// Find every incompatible pair among `placements`.
///
/// Each placement is evaluated as candidate against those after it, so each
/// pair is reported once, in placement order. The partition check is
/// already bidirectional; scanning the upper triangle covers all pairs.
pub fn conflicts(placements: &[Placement]) -> Vec<Conflict> {
    let mut out = Vec::new();
    for (i, candidate) in placements.iter().enumerate() {
        let rest = &placements[i + 1..];
        let report = compat::partition_default(candidate, rest);
        for hit in report.incompatibles {
            out.push(Conflict {
                first_id: candidate.id,
                first_name: candidate.name.clone(),
                second_id: hit.id,
                second_name: hit.name.clone(),
            });
        }
    }
    out
}

/// Run both pure evaluators against one snapshot.
pub fn evaluate_snapshot(snapshot: &LocationSnapshot, today: NaiveDate) -> LocationReport {
    LocationReport {
        upcoming: upcoming_tasks(&snapshot.placements, &snapshot.plants, today),
        conflicts: conflicts(&snapshot.placements),
    }
}

/// Watch a location: poll `source` every `poll_interval`, re-evaluate, and
/// yield a [`LocationReport`] whenever it changes.
///
/// Snapshot errors are yielded to the consumer and polling continues. The
/// stream ends when `cancel` fires.
pub fn watch_location(
    source: impl SnapshotSource,
    location_id: Uuid,
    poll_interval: Duration,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<LocationReport>> {
    async_stream::stream! {
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last: Option<LocationReport> = None;
        loop {
            tokio::select! {
                // Cancellation wins over a pending tick.
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match source.snapshot(location_id).await {
                Ok(snapshot) => {
                    let today = Local::now().date_naive();
                    let report = evaluate_snapshot(&snapshot, today);
                    if last.as_ref() != Some(&report) {
                        last = Some(report.clone());
                        yield Ok(report);
                    }
                }
                Err(e) => yield Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn placement(name: &str, plant_id: &str, incompatibles: &[&str]) -> Placement {
        Placement {
            id: Uuid::new_v4(),
            location_id: Uuid::new_v4(),
            plant_id: plant_id.to_owned(),
            name: name.to_owned(),
            companions: Vec::new(),
            incompatibles: incompatibles.iter().map(|s| (*s).to_owned()).collect(),
            placed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn conflicts_reports_each_pair_once() {
        let placements = vec![
            placement("Fennel", "fennel", &["tomato", "basil"]),
            placement("Tomato", "tomato", &[]),
            placement("Basil", "basil", &[]),
        ];

        let found = conflicts(&placements);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].first_name, "Fennel");
        assert_eq!(found[0].second_name, "Tomato");
        assert_eq!(found[1].second_name, "Basil");
    }

    #[test]
    fn conflicts_empty_for_compatible_set() {
        let placements = vec![
            placement("Tomato", "tomato", &[]),
            placement("Basil", "basil", &[]),
        ];
        assert!(conflicts(&placements).is_empty());
    }

    #[test]
    fn evaluate_snapshot_combines_both_evaluators() {
        let snapshot = LocationSnapshot {
            placements: vec![placement("Tomato", "tomato", &[])],
            plants: Vec::new(),
        };
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date");

        // No catalog entry for the placement: no tasks, and no conflicts.
        let report = evaluate_snapshot(&snapshot, today);
        assert!(report.upcoming.is_empty());
        assert!(report.conflicts.is_empty());
    }
}
