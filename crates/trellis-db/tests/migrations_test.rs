//! Migration smoke tests: schema applies cleanly and tables exist.

use trellis_db::pool;
use trellis_test_utils::{create_test_db, drop_test_db};

#[tokio::test]
async fn migrations_create_all_tables() {
    let (pool, db_name) = create_test_db().await;

    let counts = pool::table_counts(&pool).await.expect("table counts");
    let tables: Vec<&str> = counts.iter().map(|(name, _)| name.as_str()).collect();

    for expected in ["gardens", "locations", "placements", "plants"] {
        assert!(tables.contains(&expected), "missing table {expected}");
    }
    // _sqlx_migrations has rows; the schema tables start empty.
    for (name, count) in &counts {
        if name != "_sqlx_migrations" {
            assert_eq!(*count, 0, "fresh table {name} should be empty");
        }
    }

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let (pool, db_name) = create_test_db().await;

    // create_test_db already ran migrations once; running again is a no-op.
    pool::run_migrations(&pool)
        .await
        .expect("second run should succeed");

    pool.close().await;
    drop_test_db(&db_name).await;
}
