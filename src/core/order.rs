//! Order aggregate builder and persistence.
//!
//! An order, its items, and the stock decrements that back them are written
//! in one transaction: either everything commits or nothing does, so a
//! partially reserved multi-item order is never observable. Unit prices are
//! captured from the product at reservation time - later catalog price
//! changes cannot drift a confirmed order. Order numbers are short
//! human-shareable identifiers generated at creation, verified unused, and
//! additionally guarded by a storage-level unique constraint.

use crate::{
    core::stock,
    entities::{
        Order, User,
        enums::{OrderStatus, PaymentMethod, PaymentStatus},
        order, order_item, product,
    },
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::{
    DatabaseConnection, DatabaseTransaction, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*,
};
use tracing::{info, warn};

const ORDER_NUMBER_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ORDER_NUMBER_LENGTH: usize = 6;

/// One requested line of an order: which product and how many units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OrderLine {
    /// The product to reserve
    pub product_id: i64,
    /// Units to reserve; must be positive by the time it reaches the ledger
    pub quantity: i32,
}

/// Delivery and payment details captured on the order.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryInfo {
    /// Contact phone for the store to reach the customer
    pub contact_phone: Option<String>,
    /// Delivery or pickup address
    pub delivery_address: Option<String>,
    /// Free-text note from the customer
    pub delivery_notes: Option<String>,
    /// How the customer pays
    pub payment_method: PaymentMethod,
}

impl Default for DeliveryInfo {
    fn default() -> Self {
        Self {
            contact_phone: None,
            delivery_address: None,
            delivery_notes: None,
            payment_method: PaymentMethod::Cash,
        }
    }
}

/// A persisted order together with its items.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedOrder {
    /// The order row, with generated id and order number
    pub order: order::Model,
    /// The item rows, in the requested line order
    pub items: Vec<order_item::Model>,
}

/// Generates a 6-character candidate from `A-Z0-9`.
fn generate_order_number() -> String {
    let mut rng = rand::rng();
    (0..ORDER_NUMBER_LENGTH)
        .map(|_| {
            let index = rng.random_range(0..ORDER_NUMBER_CHARS.len());
            ORDER_NUMBER_CHARS[index] as char
        })
        .collect()
}

/// Generates an order number verified unused at the time of the check.
///
/// Re-rolls until a transactional read finds no order carrying the candidate.
/// The check and the later insert are not atomic, so the insert still runs
/// against the unique constraint; see `insert_order_with_unique_number`.
///
/// # Errors
/// Returns an error if the uniqueness lookup fails.
pub async fn generate_unique_order_number<C>(db: &C) -> Result<String>
where
    C: ConnectionTrait,
{
    loop {
        let candidate = generate_order_number();
        let exists = Order::find()
            .filter(order::Column::OrderNumber.eq(candidate.as_str()))
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Ok(candidate);
        }
    }
}

/// Inserts the order row, retrying once with a fresh number if the unique
/// constraint fires. The insert runs under a savepoint so a lost race does
/// not poison the outer transaction on engines that abort after a failed
/// statement.
async fn insert_order_with_unique_number(
    txn: &DatabaseTransaction,
    user_id: i64,
    store_id: i64,
    delivery: &DeliveryInfo,
    subtotal: f64,
) -> Result<order::Model> {
    let mut last_candidate = String::new();
    for attempt in 0..2 {
        let candidate = generate_unique_order_number(txn).await?;
        last_candidate.clone_from(&candidate);

        let order = order::ActiveModel {
            order_number: Set(candidate),
            user_id: Set(user_id),
            store_id: Set(store_id),
            status: Set(OrderStatus::Pending),
            payment_status: Set(PaymentStatus::Pending),
            payment_method: Set(delivery.payment_method),
            contact_phone: Set(delivery.contact_phone.clone()),
            delivery_address: Set(delivery.delivery_address.clone()),
            delivery_notes: Set(delivery.delivery_notes.clone()),
            subtotal: Set(subtotal),
            discount: Set(0.0),
            total: Set(subtotal),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let savepoint = txn.begin().await?;
        match order.insert(&savepoint).await {
            Ok(model) => {
                savepoint.commit().await?;
                return Ok(model);
            }
            Err(err) => {
                let lost_race =
                    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)));
                savepoint.rollback().await?;
                if !lost_race {
                    return Err(err.into());
                }
                if attempt == 0 {
                    warn!(
                        order_number = %last_candidate,
                        "order number collided at insert, regenerating"
                    );
                }
            }
        }
    }

    Err(Error::DuplicateOrderNumber {
        order_number: last_candidate,
    })
}

/// Reserves stock for every requested line and persists the resulting order
/// aggregate, all inside one transaction.
///
/// If any line cannot be reserved the transaction rolls back and every
/// decrement already applied for earlier lines of this call is undone. The
/// order's store comes from the first reserved line's product; lines from
/// other stores are accepted and not cross-validated. Each item's unit price
/// is the product price observed under the row lock.
///
/// # Errors
/// Returns [`Error::EmptyOrder`] for an empty line list,
/// [`Error::UserNotFound`] for an unknown user, any error from
/// [`stock::reserve_stock`] for a failing line, and
/// [`Error::DuplicateOrderNumber`] if order-number assignment loses its race
/// twice.
pub async fn create_order(
    db: &DatabaseConnection,
    user_id: i64,
    lines: &[OrderLine],
    delivery: DeliveryInfo,
) -> Result<PlacedOrder> {
    if lines.is_empty() {
        return Err(Error::EmptyOrder);
    }

    let txn = db.begin().await?;

    User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let mut store_id: Option<i64> = None;
    let mut reserved: Vec<(product::Model, i32)> = Vec::with_capacity(lines.len());
    for line in lines {
        let product = stock::reserve_stock(&txn, line.product_id, line.quantity).await?;
        if store_id.is_none() {
            store_id = Some(product.store_id);
        }
        reserved.push((product, line.quantity));
    }
    let Some(store_id) = store_id else {
        return Err(Error::EmptyOrder);
    };

    let subtotal: f64 = reserved
        .iter()
        .map(|(product, quantity)| product.price * f64::from(*quantity))
        .sum();

    let order = insert_order_with_unique_number(&txn, user_id, store_id, &delivery, subtotal).await?;

    let mut items = Vec::with_capacity(reserved.len());
    for (product, quantity) in reserved {
        let unit_price = product.price;
        let item = order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(product.id),
            quantity: Set(quantity),
            unit_price: Set(unit_price),
            total_price: Set(unit_price * f64::from(quantity)),
            ..Default::default()
        };
        items.push(item.insert(&txn).await?);
    }

    txn.commit().await?;

    info!(
        order_id = order.id,
        order_number = %order.order_number,
        user_id,
        items = items.len(),
        "order created"
    );

    Ok(PlacedOrder { order, items })
}

/// Retrieves an order by its unique ID.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if no such order exists.
pub async fn get_order_by_id(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })
}

/// Finds an order by its human-facing order number, returning None if absent.
pub async fn get_order_by_number(
    db: &DatabaseConnection,
    order_number: &str,
) -> Result<Option<order::Model>> {
    Order::find()
        .filter(order::Column::OrderNumber.eq(order_number))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the items of an order in insertion order.
pub async fn get_order_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_item::Model>> {
    crate::entities::OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all orders placed by a user, newest first.
pub async fn get_orders_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_desc(order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all orders received by a store, newest first.
pub async fn get_orders_for_store(
    db: &DatabaseConnection,
    store_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::StoreId.eq(store_id))
        .order_by_desc(order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
