use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApparelDetails {
    pub size: String,
    pub color: String,
    pub garment_type: String,
    pub material_fee: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicsDetails {
    pub brand: String,
    pub warranty_fee: i64,
}

/// Closed set of product kinds, one per extension table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductKind {
    Apparel(ApparelDetails),
    Electronics(ElectronicsDetails),
}

/// A catalog product: the base record shared by every kind plus the
/// kind-specific details. `id == 0` means the product has not been
/// persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: i64,
    name: String,
    photos: Vec<String>,
    price: i64,
    description: String,
    quantity: i64,
    category_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    kind: ProductKind,
}

impl Product {
    fn new(
        name: String,
        photos: Vec<String>,
        price: i64,
        description: String,
        quantity: i64,
        category_id: i64,
        kind: ProductKind,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            photos,
            price,
            description,
            quantity,
            category_id,
            created_at: now,
            updated_at: now,
            kind,
        }
    }

    /// Build a transient apparel product.
    #[allow(clippy::too_many_arguments)]
    pub fn apparel(
        name: impl Into<String>,
        photos: Vec<String>,
        price: i64,
        description: impl Into<String>,
        quantity: i64,
        category_id: i64,
        details: ApparelDetails,
    ) -> Self {
        Self::new(
            name.into(),
            photos,
            price,
            description.into(),
            quantity,
            category_id,
            ProductKind::Apparel(details),
        )
    }

    /// Build a transient electronics product.
    #[allow(clippy::too_many_arguments)]
    pub fn electronics(
        name: impl Into<String>,
        photos: Vec<String>,
        price: i64,
        description: impl Into<String>,
        quantity: i64,
        category_id: i64,
        details: ElectronicsDetails,
    ) -> Self {
        Self::new(
            name.into(),
            photos,
            price,
            description.into(),
            quantity,
            category_id,
            ProductKind::Electronics(details),
        )
    }

    /// Rebuild a persisted product from stored column values. Mapper use
    /// only; timestamps are taken as-is, nothing is touched.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_store(
        id: i64,
        name: String,
        photos: Vec<String>,
        price: i64,
        description: String,
        quantity: i64,
        category_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        kind: ProductKind,
    ) -> Self {
        Self {
            id,
            name,
            photos,
            price,
            description,
            quantity,
            category_id,
            created_at,
            updated_at,
            kind,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn category_id(&self) -> i64 {
        self.category_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn apparel_details(&self) -> Option<&ApparelDetails> {
        match &self.kind {
            ProductKind::Apparel(details) => Some(details),
            _ => None,
        }
    }

    pub fn electronics_details(&self) -> Option<&ElectronicsDetails> {
        match &self.kind {
            ProductKind::Electronics(details) => Some(details),
            _ => None,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.id == 0
    }

    /// Direct overwrite, no timestamp side effect. Assigned exactly once,
    /// after the first successful create.
    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    // Every observable mutation goes through here, so the
    // `updated_at >= created_at` invariant holds in one place.
    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_photos(&mut self, photos: Vec<String>) {
        self.photos = photos;
        self.touch();
    }

    pub fn set_price(&mut self, price: u32) {
        self.price = i64::from(price);
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = i64::from(quantity);
        self.touch();
    }

    pub fn set_category_id(&mut self, category_id: i64) {
        self.category_id = category_id;
        self.touch();
    }

    pub fn set_size(&mut self, size: impl Into<String>) -> Result<()> {
        let details = self.apparel_details_mut()?;
        details.size = size.into();
        self.touch();
        Ok(())
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> Result<()> {
        let details = self.apparel_details_mut()?;
        details.color = color.into();
        self.touch();
        Ok(())
    }

    pub fn set_garment_type(&mut self, garment_type: impl Into<String>) -> Result<()> {
        let details = self.apparel_details_mut()?;
        details.garment_type = garment_type.into();
        self.touch();
        Ok(())
    }

    pub fn set_material_fee(&mut self, material_fee: u32) -> Result<()> {
        let details = self.apparel_details_mut()?;
        details.material_fee = i64::from(material_fee);
        self.touch();
        Ok(())
    }

    pub fn set_brand(&mut self, brand: impl Into<String>) -> Result<()> {
        let details = self.electronics_details_mut()?;
        details.brand = brand.into();
        self.touch();
        Ok(())
    }

    pub fn set_warranty_fee(&mut self, warranty_fee: u32) -> Result<()> {
        let details = self.electronics_details_mut()?;
        details.warranty_fee = i64::from(warranty_fee);
        self.touch();
        Ok(())
    }

    /// Increase stock by `n` units.
    pub fn add_stock(&mut self, n: u32) {
        self.quantity += i64::from(n);
        self.touch();
    }

    /// Decrease stock by `n` units. Fails without changing anything when
    /// fewer than `n` units are available.
    pub fn remove_stock(&mut self, n: u32) -> Result<()> {
        let n = i64::from(n);
        if n > self.quantity {
            return Err(AppError::InsufficientStock {
                requested: n,
                available: self.quantity,
            });
        }
        self.quantity -= n;
        self.touch();
        Ok(())
    }

    fn apparel_details_mut(&mut self) -> Result<&mut ApparelDetails> {
        match &mut self.kind {
            ProductKind::Apparel(details) => Ok(details),
            _ => Err(AppError::InternalError(
                "apparel field set on a non-apparel product".to_string(),
            )),
        }
    }

    fn electronics_details_mut(&mut self) -> Result<&mut ElectronicsDetails> {
        match &mut self.kind {
            ProductKind::Electronics(details) => Ok(details),
            _ => Err(AppError::InternalError(
                "electronics field set on a non-electronics product".to_string(),
            )),
        }
    }
}
