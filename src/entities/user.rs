//! User entity - Represents a marketplace customer.
//!
//! Authentication and profile management are handled by collaborating
//! services; the reservation core receives an already-resolved user id and
//! reads this row only for the contact phone and the Telegram chat id that
//! order confirmations are sent to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// First name, used to address the customer in confirmations
    pub first_name: String,
    /// Contact phone; orders fall back to a placeholder when missing
    pub phone: Option<String>,
    /// Telegram chat id for confirmation messages, if the account is linked
    pub telegram_chat_id: Option<i64>,
    /// When the user was created
    pub created_at: DateTime,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A user places many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
