//! Integration tests for `plants` table queries.

use trellis_db::models::{CareStep, DateRange};
use trellis_db::queries::plants;
use trellis_test_utils::{create_test_db, drop_test_db};

#[tokio::test]
async fn upsert_insert_then_update() {
    let (pool, db_name) = create_test_db().await;

    let steps = vec![CareStep {
        label: "prune side shoots".to_owned(),
        window: DateRange::new("01-06", "31-08"),
    }];

    let inserted = plants::upsert_plant(
        &pool,
        "tomato",
        "Tomato",
        Some("Solanum lycopersicum"),
        &["basil".to_owned()],
        &["fennel".to_owned()],
        "15-02",
        "15-04",
        &steps,
    )
    .await
    .expect("insert should succeed");
    assert_eq!(inserted.id, "tomato");
    assert_eq!(inserted.latin_name.as_deref(), Some("Solanum lycopersicum"));
    assert_eq!(inserted.care_steps.len(), 1);
    assert_eq!(inserted.sowing_window(), DateRange::new("15-02", "15-04"));

    let updated = plants::upsert_plant(
        &pool,
        "tomato",
        "Garden Tomato",
        None,
        &[],
        &[],
        "",
        "",
        &[],
    )
    .await
    .expect("update should succeed");
    assert_eq!(updated.name, "Garden Tomato");
    assert_eq!(updated.latin_name, None);
    assert!(updated.companions.is_empty());
    assert!(updated.sowing_window().is_unset());

    let count = plants::count_plants(&pool).await.expect("count");
    assert_eq!(count, 1);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn list_orders_by_name() {
    let (pool, db_name) = create_test_db().await;

    for (id, name) in [("c", "Chard"), ("a", "Artichoke"), ("b", "Beet")] {
        plants::upsert_plant(&pool, id, name, None, &[], &[], "", "", &[])
            .await
            .expect("insert");
    }

    let all = plants::list_plants(&pool).await.expect("list");
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Artichoke", "Beet", "Chard"]);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn search_is_case_insensitive_over_id_and_name() {
    let (pool, db_name) = create_test_db().await;

    plants::upsert_plant(
        &pool,
        "cherry-tomato",
        "Cherry Tomato",
        None,
        &[],
        &[],
        "",
        "",
        &[],
    )
    .await
    .expect("insert");
    plants::upsert_plant(&pool, "basil", "Basil", None, &[], &[], "", "", &[])
        .await
        .expect("insert");

    let hits = plants::search_plants(&pool, "TOMATO").await.expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "cherry-tomato");

    let by_id = plants::search_plants(&pool, "cherry-").await.expect("search");
    assert_eq!(by_id.len(), 1);

    let none = plants::search_plants(&pool, "cactus").await.expect("search");
    assert!(none.is_empty());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn get_missing_plant_is_none() {
    let (pool, db_name) = create_test_db().await;

    let missing = plants::get_plant(&pool, "nope").await.expect("query");
    assert!(missing.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}
