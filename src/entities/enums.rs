//! Status enums shared by the order and product entities.
//!
//! All enums are stored as uppercase strings so the database stays readable
//! and new variants never renumber existing rows.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Lifecycle of an order. Reservations always start in `Pending`;
/// later transitions are driven by order management outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OrderStatus {
    /// Freshly reserved, awaiting store confirmation
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Confirmed by the store
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    /// Being prepared
    #[sea_orm(string_value = "PREPARING")]
    Preparing,
    /// Ready for the customer to pick up
    #[sea_orm(string_value = "READY_FOR_PICKUP")]
    ReadyForPickup,
    /// Handed over to the customer
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
    /// Cancelled; the order number is never reused
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PaymentStatus {
    /// Not paid yet (pay-on-pickup reservations stay here until handover)
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Paid in full
    #[sea_orm(string_value = "PAID")]
    Paid,
    /// Payment returned after cancellation
    #[sea_orm(string_value = "REFUNDED")]
    Refunded,
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PaymentMethod {
    /// Cash on pickup - the default for bot reservations
    #[sea_orm(string_value = "CASH")]
    Cash,
    /// Card on pickup
    #[sea_orm(string_value = "CARD")]
    Card,
}

/// Catalog status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ProductStatus {
    /// Listed and purchasable while stock remains
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    /// Sold out
    #[sea_orm(string_value = "OUT_OF_STOCK")]
    OutOfStock,
}
