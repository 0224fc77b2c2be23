//! Store entity - Represents a partner store offering surplus food boxes.
//!
//! Stores own products and receive orders. Store management (creation,
//! opening hours, logos) lives in the catalog service; this crate only reads
//! the name and address for order delivery info and confirmation messages.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Store database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    /// Unique identifier for the store
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the store
    pub name: String,
    /// Pickup address, used as the delivery address of bot reservations
    pub address: Option<String>,
    /// When the store was created
    pub created_at: DateTime,
}

/// Defines relationships between Store and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A store offers many products
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
    /// A store receives many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
