use catalog_store::{
    config::DatabaseConfig,
    database,
    error::AppError,
    models::{ApparelDetails, ElectronicsDetails, Product, ProductKind},
    queries::product_queries,
};
use chrono::Utc;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    // One connection so the in-memory database survives across calls.
    database::create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("failed to create test pool")
}

fn tshirt() -> Product {
    Product::apparel(
        "T-shirt",
        vec!["https://img.example.com/tshirt.jpg".to_string()],
        1000,
        "Plain cotton tee",
        10,
        1,
        ApparelDetails {
            size: "M".to_string(),
            color: "blue".to_string(),
            garment_type: "casual".to_string(),
            material_fee: 50,
        },
    )
}

fn headphones() -> Product {
    Product::electronics(
        "Headphones",
        vec![],
        15000,
        "Over-ear, wired",
        4,
        2,
        ElectronicsDetails {
            brand: "AKG".to_string(),
            warranty_fee: 1200,
        },
    )
}

#[tokio::test]
async fn create_then_find_returns_the_same_apparel_product() {
    let pool = test_pool().await;
    let mut product = tshirt();

    product_queries::create(&pool, &mut product)
        .await
        .expect("create failed");
    assert!(product.id() > 0);
    assert!(!product.is_transient());

    let loaded = product_queries::find_one_by_id(&pool, product.id())
        .await
        .expect("find failed");

    assert_eq!(loaded.id(), product.id());
    assert_eq!(loaded.name(), "T-shirt");
    assert_eq!(loaded.photos(), product.photos());
    assert_eq!(loaded.price(), 1000);
    assert_eq!(loaded.description(), "Plain cotton tee");
    assert_eq!(loaded.quantity(), 10);
    assert_eq!(loaded.category_id(), 1);
    assert_eq!(
        loaded.created_at().timestamp_millis(),
        product.created_at().timestamp_millis()
    );
    assert_eq!(
        loaded.updated_at().timestamp_millis(),
        product.updated_at().timestamp_millis()
    );

    let details = loaded.apparel_details().expect("expected apparel");
    assert_eq!(details.size, "M");
    assert_eq!(details.color, "blue");
    assert_eq!(details.garment_type, "casual");
    assert_eq!(details.material_fee, 50);
}

#[tokio::test]
async fn create_then_find_returns_the_same_electronics_product() {
    let pool = test_pool().await;
    let mut product = headphones();

    product_queries::create(&pool, &mut product)
        .await
        .expect("create failed");

    let loaded = product_queries::find_one_by_id(&pool, product.id())
        .await
        .expect("find failed");

    assert!(matches!(loaded.kind(), ProductKind::Electronics(_)));
    let details = loaded.electronics_details().expect("expected electronics");
    assert_eq!(details.brand, "AKG");
    assert_eq!(details.warranty_fee, 1200);
    assert_eq!(loaded.quantity(), 4);
}

#[tokio::test]
async fn update_rewrites_both_tables() {
    let pool = test_pool().await;
    let mut product = tshirt();
    product_queries::create(&pool, &mut product)
        .await
        .expect("create failed");

    product.set_name("V-neck");
    product.set_price(1300);
    product.add_stock(5);
    product.set_size("L").unwrap();
    product.set_color("black").unwrap();
    product_queries::update(&pool, &product)
        .await
        .expect("update failed");

    let loaded = product_queries::find_one_by_id(&pool, product.id())
        .await
        .expect("find failed");
    assert_eq!(loaded.name(), "V-neck");
    assert_eq!(loaded.price(), 1300);
    assert_eq!(loaded.quantity(), 15);
    let details = loaded.apparel_details().expect("expected apparel");
    assert_eq!(details.size, "L");
    assert_eq!(details.color, "black");
    assert!(loaded.updated_at() >= loaded.created_at());
    assert_eq!(
        loaded.updated_at().timestamp_millis(),
        product.updated_at().timestamp_millis()
    );
}

#[tokio::test]
async fn find_one_by_id_reports_missing_rows() {
    let pool = test_pool().await;

    let err = product_queries::find_one_by_id(&pool, 999_999)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn orphan_base_row_is_an_unknown_variant() {
    let pool = test_pool().await;
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO product (name, photos, price, description, quantity, category_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind("Mystery item")
    .bind("[]")
    .bind(500_i64)
    .bind("")
    .bind(1_i64)
    .bind(0_i64)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await
    .expect("raw insert failed");
    let id = result.last_insert_rowid();

    let err = product_queries::find_one_by_id(&pool, id).await.unwrap_err();
    assert!(matches!(err, AppError::UnknownVariant(found) if found == id));
}

#[tokio::test]
async fn find_all_returns_every_kind_in_id_order() {
    let pool = test_pool().await;
    let mut shirt = tshirt();
    let mut audio = headphones();
    product_queries::create(&pool, &mut shirt)
        .await
        .expect("create failed");
    product_queries::create(&pool, &mut audio)
        .await
        .expect("create failed");

    let all = product_queries::find_all(&pool).await.expect("find_all failed");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id(), shirt.id());
    assert_eq!(all[1].id(), audio.id());
    assert!(matches!(all[0].kind(), ProductKind::Apparel(_)));
    assert!(matches!(all[1].kind(), ProductKind::Electronics(_)));
}

#[tokio::test]
async fn create_rejects_an_already_persisted_product() {
    let pool = test_pool().await;
    let mut product = tshirt();
    product_queries::create(&pool, &mut product)
        .await
        .expect("create failed");

    let err = product_queries::create(&pool, &mut product)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InternalError(_)));
}

#[tokio::test]
async fn update_with_missing_extension_row_rolls_back_the_base_row() {
    let pool = test_pool().await;
    let mut product = tshirt();
    product_queries::create(&pool, &mut product)
        .await
        .expect("create failed");

    // Break the base/extension pairing behind the mapper's back.
    sqlx::query("DELETE FROM clothing WHERE product_id = ?")
        .bind(product.id())
        .execute(&pool)
        .await
        .expect("raw delete failed");

    product.set_name("Renamed");
    product.set_price(9999);
    let err = product_queries::update(&pool, &product).await.unwrap_err();
    assert!(matches!(err, AppError::UnknownVariant(id) if id == product.id()));

    // The base-row rewrite must have been rolled back with it.
    let (name, price): (String, i64) =
        sqlx::query_as("SELECT name, price FROM product WHERE id = ?")
            .bind(product.id())
            .fetch_one(&pool)
            .await
            .expect("raw select failed");
    assert_eq!(name, "T-shirt");
    assert_eq!(price, 1000);
}

#[tokio::test]
async fn update_rejects_transient_and_missing_products() {
    let pool = test_pool().await;

    let transient = tshirt();
    let err = product_queries::update(&pool, &transient).await.unwrap_err();
    assert!(matches!(err, AppError::InternalError(_)));

    let mut product = tshirt();
    product_queries::create(&pool, &mut product)
        .await
        .expect("create failed");
    sqlx::query("DELETE FROM clothing WHERE product_id = ?")
        .bind(product.id())
        .execute(&pool)
        .await
        .expect("raw delete failed");
    sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(product.id())
        .execute(&pool)
        .await
        .expect("raw delete failed");

    let err = product_queries::update(&pool, &product).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
