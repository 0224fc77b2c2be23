//! Order item entity - One reserved product line within an order.
//!
//! `unit_price` is a snapshot of the product price at reservation time, not a
//! live reference - later catalog price changes never alter a confirmed
//! order. `quantity` always equals the amount decremented from the product's
//! stock in the same transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning order
    pub order_id: i64,
    /// ID of the reserved product
    pub product_id: i64,
    /// Number of units reserved; at least 1
    pub quantity: i32,
    /// Price per unit captured at reservation time
    pub unit_price: f64,
    /// Line total: `unit_price` x `quantity`
    pub total_price: f64,
}

/// Defines relationships between OrderItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each item references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
