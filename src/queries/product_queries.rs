use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, Result},
    models::{ApparelDetails, ElectronicsDetails, Product, ProductKind},
};

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    photos: String,
    price: i64,
    description: String,
    quantity: i64,
    category_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ClothingRow {
    product_id: i64,
    size: String,
    color: String,
    #[sqlx(rename = "type")]
    garment_type: String,
    material_fee: i64,
}

#[derive(sqlx::FromRow)]
struct ElectronicRow {
    product_id: i64,
    brand: String,
    warranty_fee: i64,
}

impl From<ClothingRow> for ProductKind {
    fn from(row: ClothingRow) -> Self {
        ProductKind::Apparel(ApparelDetails {
            size: row.size,
            color: row.color,
            garment_type: row.garment_type,
            material_fee: row.material_fee,
        })
    }
}

impl From<ElectronicRow> for ProductKind {
    fn from(row: ElectronicRow) -> Self {
        ProductKind::Electronics(ElectronicsDetails {
            brand: row.brand,
            warranty_fee: row.warranty_fee,
        })
    }
}

fn into_product(row: ProductRow, kind: ProductKind) -> Result<Product> {
    let photos: Vec<String> = serde_json::from_str(&row.photos)?;

    Ok(Product::from_store(
        row.id,
        row.name,
        photos,
        row.price,
        row.description,
        row.quantity,
        row.category_id,
        row.created_at,
        row.updated_at,
        kind,
    ))
}

/// Insert a transient product into the base table and its extension table
/// in one transaction, then assign the store-generated id to the entity.
pub async fn create(pool: &SqlitePool, product: &mut Product) -> Result<()> {
    if !product.is_transient() {
        return Err(AppError::InternalError(format!(
            "create called on already persisted product {}",
            product.id()
        )));
    }

    let photos = serde_json::to_string(product.photos())?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO product (name, photos, price, description, quantity, category_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(product.name())
    .bind(&photos)
    .bind(product.price())
    .bind(product.description())
    .bind(product.quantity())
    .bind(product.category_id())
    .bind(product.created_at())
    .bind(product.updated_at())
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();

    match product.kind() {
        ProductKind::Apparel(details) => {
            sqlx::query(
                "INSERT INTO clothing (product_id, size, color, type, material_fee)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(id)
            .bind(&details.size)
            .bind(&details.color)
            .bind(&details.garment_type)
            .bind(details.material_fee)
            .execute(&mut *tx)
            .await?;
        }
        ProductKind::Electronics(details) => {
            sqlx::query(
                "INSERT INTO electronic (product_id, brand, warranty_fee)
                 VALUES (?, ?, ?)",
            )
            .bind(id)
            .bind(&details.brand)
            .bind(details.warranty_fee)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    product.assign_id(id);

    Ok(())
}

/// Rewrite all mutable base columns and the extension row of a persisted
/// product, in one transaction.
pub async fn update(pool: &SqlitePool, product: &Product) -> Result<()> {
    if product.is_transient() {
        return Err(AppError::InternalError(
            "update called on a transient product".to_string(),
        ));
    }

    let photos = serde_json::to_string(product.photos())?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE product
         SET name = ?, photos = ?, price = ?, description = ?, quantity = ?, category_id = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(product.name())
    .bind(&photos)
    .bind(product.price())
    .bind(product.description())
    .bind(product.quantity())
    .bind(product.category_id())
    .bind(product.updated_at())
    .bind(product.id())
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "no product with id {}",
            product.id()
        )));
    }

    let result = match product.kind() {
        ProductKind::Apparel(details) => {
            sqlx::query(
                "UPDATE clothing
                 SET size = ?, color = ?, type = ?, material_fee = ?
                 WHERE product_id = ?",
            )
            .bind(&details.size)
            .bind(&details.color)
            .bind(&details.garment_type)
            .bind(details.material_fee)
            .bind(product.id())
            .execute(&mut *tx)
            .await?
        }
        ProductKind::Electronics(details) => {
            sqlx::query(
                "UPDATE electronic
                 SET brand = ?, warranty_fee = ?
                 WHERE product_id = ?",
            )
            .bind(&details.brand)
            .bind(details.warranty_fee)
            .bind(product.id())
            .execute(&mut *tx)
            .await?
        }
    };

    // A persisted product must always have its extension row.
    if result.rows_affected() == 0 {
        return Err(AppError::UnknownVariant(product.id()));
    }

    tx.commit().await?;

    Ok(())
}

/// Load one product by id, resolving which kind it is from the extension
/// tables. Clothing is probed first; a correct store never has a row in
/// both tables.
pub async fn find_one_by_id(pool: &SqlitePool, id: i64) -> Result<Product> {
    let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM product WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no product with id {}", id)))?;

    let clothing =
        sqlx::query_as::<_, ClothingRow>("SELECT * FROM clothing WHERE product_id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    if let Some(details) = clothing {
        return into_product(row, details.into());
    }

    let electronic =
        sqlx::query_as::<_, ElectronicRow>("SELECT * FROM electronic WHERE product_id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    if let Some(details) = electronic {
        return into_product(row, details.into());
    }

    Err(AppError::UnknownVariant(id))
}

/// Load every product in id order.
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>("SELECT * FROM product ORDER BY id")
        .fetch_all(pool)
        .await?;

    resolve_rows(pool, rows).await
}

/// Load every product belonging to one category, in id order.
pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Product>> {
    let rows =
        sqlx::query_as::<_, ProductRow>("SELECT * FROM product WHERE category_id = ? ORDER BY id")
            .bind(category_id)
            .fetch_all(pool)
            .await?;

    resolve_rows(pool, rows).await
}

// Both extension tables are fetched once and matched in memory, so a full
// listing costs three queries regardless of row count.
async fn resolve_rows(pool: &SqlitePool, rows: Vec<ProductRow>) -> Result<Vec<Product>> {
    let mut clothing: HashMap<i64, ClothingRow> =
        sqlx::query_as::<_, ClothingRow>("SELECT * FROM clothing")
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|row| (row.product_id, row))
            .collect();

    let mut electronic: HashMap<i64, ElectronicRow> =
        sqlx::query_as::<_, ElectronicRow>("SELECT * FROM electronic")
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|row| (row.product_id, row))
            .collect();

    rows.into_iter()
        .map(|row| {
            if let Some(details) = clothing.remove(&row.id) {
                into_product(row, details.into())
            } else if let Some(details) = electronic.remove(&row.id) {
                into_product(row, details.into())
            } else {
                Err(AppError::UnknownVariant(row.id))
            }
        })
        .collect()
}
