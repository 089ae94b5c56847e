//! Test harness for trellis integration tests.
//!
//! All database tests share one PostgreSQL server and isolate themselves by
//! creating a throwaway database per test. The server comes either from the
//! `TRELLIS_TEST_PG_URL` env var (a container managed outside the test run)
//! or from a testcontainers instance started on first use and shared through
//! a `OnceCell` for the rest of the binary.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use trellis_db::config::DbConfig;
use trellis_db::pool;

/// The shared server. The container handle rides along so it is not torn
/// down while tests still point at it.
struct PgServer {
    root_url: String,
    _keepalive: Option<ContainerAsync<Postgres>>,
}

static PG_SERVER: OnceCell<PgServer> = OnceCell::const_new();

async fn start_server() -> PgServer {
    if let Ok(url) = std::env::var("TRELLIS_TEST_PG_URL") {
        return PgServer {
            root_url: url,
            _keepalive: None,
        };
    }

    let container = Postgres::default()
        .with_tag("18")
        .start()
        .await
        .expect("failed to start PostgreSQL container");
    let host = container.get_host().await.expect("failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("failed to get mapped port");

    PgServer {
        root_url: format!("postgresql://postgres:postgres@{host}:{port}"),
        _keepalive: Some(container),
    }
}

/// Root URL of the shared server, with no database name appended.
async fn server_url() -> &'static str {
    &PG_SERVER.get_or_init(start_server).await.root_url
}

/// Pool of one connection to the `postgres` maintenance database, for
/// CREATE/DROP DATABASE statements.
async fn maintenance_pool() -> PgPool {
    let url = format!("{}/postgres", server_url().await);
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&url)
        .await
        .expect("failed to connect to the maintenance database")
}

/// Create a migrated throwaway database and a pool connected to it.
///
/// Returns `(pool, db_name)`; pass the name to [`drop_test_db`] once the
/// test is done with it.
pub async fn create_test_db() -> (PgPool, String) {
    let db_name = format!("trellis_test_{}", Uuid::new_v4().simple());

    let maint = maintenance_pool().await;
    maint
        .execute(format!("CREATE DATABASE {db_name}").as_str())
        .await
        .unwrap_or_else(|e| panic!("failed to create {db_name}: {e}"));
    maint.close().await;

    let config = DbConfig::new(format!("{}/{db_name}", server_url().await));
    let db_pool = pool::create_pool(&config)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to {db_name}: {e}"));
    pool::run_migrations(&db_pool)
        .await
        .expect("migrations should apply cleanly");

    (db_pool, db_name)
}

/// Drop a throwaway database, kicking off any lingering connections first.
///
/// A database that is already gone is not an error.
pub async fn drop_test_db(db_name: &str) {
    let maint = maintenance_pool().await;

    let kick = format!(
        "SELECT pg_terminate_backend(pid) FROM pg_stat_activity \
         WHERE datname = '{db_name}' AND pid <> pg_backend_pid()"
    );
    let _ = maint.execute(kick.as_str()).await;
    let _ = maint
        .execute(format!("DROP DATABASE IF EXISTS {db_name}").as_str())
        .await;
    maint.close().await;
}
