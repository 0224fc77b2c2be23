//! Product entity - Represents a surplus food box offered by a store.
//!
//! `stock_quantity` is the authoritative count of available units and is the
//! only mutable shared state in the reservation core. It is decremented
//! exclusively through [`crate::core::stock::reserve_stock`], which reads and
//! writes it under a per-row exclusive lock, and it never goes below zero.
//! Catalog management (creation, pricing, images) lives outside this crate.

use super::enums::ProductStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the box (e.g., "Bakery surprise box")
    pub name: String,
    /// Optional longer description shown in listings
    pub description: Option<String>,
    /// Current selling price per unit; discounts are already baked in
    pub price: f64,
    /// Pre-discount price, for strike-through display
    pub original_price: Option<f64>,
    /// Discount percentage relative to the original price
    pub discount_percentage: Option<f64>,
    /// Authoritative count of available units; never negative
    pub stock_quantity: i32,
    /// Catalog status
    pub status: ProductStatus,
    /// Whether the product is visible in listings
    pub active: bool,
    /// ID of the store offering this product
    pub store_id: i64,
    /// ID of the catalog category; category management is out of scope
    pub category_id: Option<i64>,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified (including stock decrements)
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one store
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id"
    )]
    Store,
    /// A product appears in many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
