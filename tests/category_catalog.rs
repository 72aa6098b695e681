use catalog_store::{
    config::DatabaseConfig,
    database,
    models::{ApparelDetails, Product},
    queries::{category_queries, product_queries},
};
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    database::create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("failed to create test pool")
}

#[tokio::test]
async fn category_round_trip_and_product_listing() {
    let pool = test_pool().await;

    let category = category_queries::create_category(&pool, "Apparel", "Clothing and accessories")
        .await
        .expect("create_category failed");
    assert!(category.id > 0);

    let found = category_queries::find_by_id(&pool, category.id)
        .await
        .expect("find_by_id failed")
        .expect("category missing");
    assert_eq!(found.name, "Apparel");
    assert_eq!(found.description, "Clothing and accessories");

    let mut product = Product::apparel(
        "Hoodie",
        vec![],
        4500,
        "Zip-up hoodie",
        6,
        category.id,
        ApparelDetails {
            size: "L".to_string(),
            color: "grey".to_string(),
            garment_type: "casual".to_string(),
            material_fee: 120,
        },
    );
    product_queries::create(&pool, &mut product)
        .await
        .expect("create failed");

    let in_category = category_queries::get_products(&pool, category.id)
        .await
        .expect("get_products failed");
    assert_eq!(in_category.len(), 1);
    assert_eq!(in_category[0].id(), product.id());

    let elsewhere = category_queries::get_products(&pool, category.id + 1)
        .await
        .expect("get_products failed");
    assert!(elsewhere.is_empty());

    let all = category_queries::get_all(&pool).await.expect("get_all failed");
    assert_eq!(all.len(), 1);
}
