//! `trellis watch` command: stream location reports until Ctrl-C.

use std::time::Duration;

use anyhow::Result;
use sqlx::PgPool;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use trellis_core::watch::{LocationReport, PgSnapshotSource, watch_location};

use crate::resolve;

fn print_report(report: &LocationReport) {
    println!("--- {}", chrono::Local::now().format("%H:%M:%S"));

    if report.conflicts.is_empty() {
        println!("No conflicts.");
    } else {
        println!("Conflicts:");
        for conflict in &report.conflicts {
            println!("  ! {} <-> {}", conflict.first_name, conflict.second_name);
        }
    }

    if report.upcoming.is_empty() {
        println!("No tasks due today.");
    } else {
        println!("Tasks due today:");
        for task in &report.upcoming {
            println!("  {} -- {}", task.plant_name, task.label);
        }
    }
}

/// Poll the location and print a fresh report whenever it changes.
pub async fn run_watch(pool: &PgPool, location_ref: &str, interval_secs: u64) -> Result<()> {
    let location = resolve::resolve_location(pool, location_ref).await?;
    println!(
        "Watching {} every {interval_secs}s (Ctrl-C to stop).",
        location.name
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        signal_cancel.cancel();
    });

    let source = PgSnapshotSource::new(pool.clone());
    let stream = watch_location(
        source,
        location.id,
        Duration::from_secs(interval_secs),
        cancel,
    );
    tokio::pin!(stream);

    while let Some(item) = stream.next().await {
        match item {
            Ok(report) => print_report(&report),
            Err(e) => eprintln!("snapshot failed: {e:#}"),
        }
    }

    println!("Stopped.");
    Ok(())
}
