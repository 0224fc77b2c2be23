//! Order entity - Represents a customer reservation of one or more boxes.
//!
//! Orders are created atomically with their items and the matching stock
//! decrements; an order is never persisted with zero items. `order_number`
//! is the short human-shareable identifier printed on confirmations - it is
//! globally unique at the storage level and never reused, even after
//! cancellation.

use super::enums::{OrderStatus, PaymentMethod, PaymentStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-facing 6-character alphanumeric order number, globally unique
    #[sea_orm(unique)]
    pub order_number: String,
    /// ID of the user who placed the order
    pub user_id: i64,
    /// ID of the store the order was placed with (from the first reserved item)
    pub store_id: i64,
    /// Order lifecycle status; new reservations start as `Pending`
    pub status: OrderStatus,
    /// Payment state
    pub payment_status: PaymentStatus,
    /// How the customer pays
    pub payment_method: PaymentMethod,
    /// Contact phone captured at reservation time
    pub contact_phone: Option<String>,
    /// Delivery or pickup address
    pub delivery_address: Option<String>,
    /// Free-text note from the customer
    pub delivery_notes: Option<String>,
    /// Sum of item line totals
    pub subtotal: f64,
    /// Order-level discount; per-unit discounts are already in the prices
    pub discount: f64,
    /// Amount due: subtotal minus discount
    pub total: f64,
    /// When the reservation was made
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each order belongs to one store
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id"
    )]
    Store,
    /// An order exclusively owns its items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
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
