use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::Result,
    models::{Category, Product},
    queries::product_queries,
};

/// Find category by ID
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM category WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Get all categories
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM category ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

/// Create a new category
pub async fn create_category(
    pool: &SqlitePool,
    name: &str,
    description: &str,
) -> Result<Category> {
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO category (name, description, created_at, updated_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(description)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Category {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Get all products belonging to a category
pub async fn get_products(pool: &SqlitePool, category_id: i64) -> Result<Vec<Product>> {
    product_queries::find_by_category(pool, category_id).await
}
