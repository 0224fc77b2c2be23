//! Reservation facade - the single entry point for all reservation callers.
//!
//! Three collaborators invoke this core: the web checkout (multi-item
//! orders), the mini-app (single-product reservations), and the Telegram
//! webhook (single-product reservations with a free-text note). All three
//! arrive here with an already-resolved user id - the facade never reaches
//! into ambient session state. Each call validates its input, runs the
//! reserve-and-persist transaction, and then queues a best-effort
//! confirmation for users with a linked Telegram chat. A notification
//! problem never affects the committed order.

use crate::{
    core::order::{self, DeliveryInfo, OrderLine, PlacedOrder},
    entities::{Product, Store, User, enums::PaymentMethod, user},
    errors::{Error, Result},
    notify::{NotificationDispatcher, OrderSummary, SummaryLine},
};
use sea_orm::{DatabaseConnection, prelude::*};
use tracing::{debug, info, warn};

/// Placeholder phone stored on orders from users without one on file.
const FALLBACK_CONTACT_PHONE: &str = "+7 000 000 0000";
/// Default note on bot reservations placed without a message.
const DEFAULT_RESERVATION_NOTE: &str = "Reserved via Telegram mini-app";

/// Creates a multi-item checkout order for an already-resolved user.
///
/// Line quantities of zero or less are normalized to 1 before reservation,
/// matching what the checkout frontend sends for "one box" clicks. The
/// reservation and persistence run in one transaction; a confirmation is
/// queued afterwards when the user has a linked chat.
///
/// # Errors
/// Propagates every failure from [`order::create_order`] unchanged -
/// `InsufficientStock`, `ProductNotFound`, and friends are expected business
/// outcomes for the caller to surface, not conditions to mask.
pub async fn place_order(
    db: &DatabaseConnection,
    notifications: &NotificationDispatcher,
    user_id: i64,
    lines: &[OrderLine],
    delivery: DeliveryInfo,
) -> Result<PlacedOrder> {
    info!(user_id, lines = lines.len(), "creating checkout order");

    let normalized: Vec<OrderLine> = lines
        .iter()
        .map(|line| OrderLine {
            product_id: line.product_id,
            quantity: if line.quantity > 0 { line.quantity } else { 1 },
        })
        .collect();

    let placed = order::create_order(db, user_id, &normalized, delivery).await?;

    if let Some(buyer) = User::find_by_id(user_id).one(db).await? {
        dispatch_confirmation(db, notifications, &buyer, &placed).await;
    }

    info!(
        order_number = %placed.order.order_number,
        user_id,
        "checkout order complete"
    );
    Ok(placed)
}

/// Reserves a single product for an already-resolved user - the mini-app and
/// Telegram webhook entry point.
///
/// The requested quantity is normalized to at least 1. Delivery details are
/// derived rather than caller-supplied: the user's phone (with a placeholder
/// fallback), the store's address as the pickup address, and the caller's
/// free-text note (or a default when blank). Payment is cash on pickup.
///
/// # Errors
/// Returns [`Error::UserNotFound`] or [`Error::ProductNotFound`] from the
/// fail-fast checks before the transaction opens, and everything
/// [`order::create_order`] can return - in particular
/// [`Error::InsufficientStock`] when the stock check under the row lock
/// fails.
pub async fn reserve_single(
    db: &DatabaseConnection,
    notifications: &NotificationDispatcher,
    user_id: i64,
    product_id: i64,
    quantity: i32,
    note: Option<String>,
) -> Result<PlacedOrder> {
    let quantity = quantity.max(1);
    info!(user_id, product_id, quantity, "creating single-product reservation");

    let buyer = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    // Fail fast before opening the reservation transaction; the stock check
    // itself still runs under the row lock.
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    let store = Store::find_by_id(product.store_id).one(db).await?;

    let delivery = DeliveryInfo {
        contact_phone: Some(resolve_phone(&buyer)),
        delivery_address: store.and_then(|store| store.address),
        delivery_notes: Some(
            note.map(|note| note.trim().to_string())
                .filter(|note| !note.is_empty())
                .unwrap_or_else(|| DEFAULT_RESERVATION_NOTE.to_string()),
        ),
        payment_method: PaymentMethod::Cash,
    };

    let lines = [OrderLine {
        product_id,
        quantity,
    }];
    let placed = order::create_order(db, user_id, &lines, delivery).await?;

    dispatch_confirmation(db, notifications, &buyer, &placed).await;

    info!(
        order_number = %placed.order.order_number,
        user_id,
        product_id,
        "single-product reservation complete"
    );
    Ok(placed)
}

fn resolve_phone(buyer: &user::Model) -> String {
    match buyer.phone.as_deref() {
        Some(phone) if !phone.trim().is_empty() => phone.to_string(),
        _ => FALLBACK_CONTACT_PHONE.to_string(),
    }
}

/// Queues a confirmation for the committed order. Best-effort: a user without
/// a linked chat is skipped, and a summary that cannot be built is logged and
/// dropped - the order itself is already durable.
async fn dispatch_confirmation(
    db: &DatabaseConnection,
    notifications: &NotificationDispatcher,
    buyer: &user::Model,
    placed: &PlacedOrder,
) {
    let Some(chat_id) = buyer.telegram_chat_id else {
        debug!(user_id = buyer.id, "user has no linked chat, skipping confirmation");
        return;
    };

    match build_summary(db, buyer, placed).await {
        Ok(summary) => notifications.dispatch(chat_id, summary),
        Err(err) => warn!(
            order_id = placed.order.id,
            error = %err,
            "failed to build confirmation summary"
        ),
    }
}

async fn build_summary(
    db: &DatabaseConnection,
    buyer: &user::Model,
    placed: &PlacedOrder,
) -> Result<OrderSummary> {
    let store = Store::find_by_id(placed.order.store_id).one(db).await?;

    let mut lines = Vec::with_capacity(placed.items.len());
    for item in &placed.items {
        let product_name = Product::find_by_id(item.product_id)
            .one(db)
            .await?
            .map_or_else(|| format!("Product #{}", item.product_id), |p| p.name);
        lines.push(SummaryLine {
            product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
        });
    }

    Ok(OrderSummary {
        order_number: placed.order.order_number.clone(),
        customer_name: buyer.first_name.clone(),
        store_name: store.as_ref().map(|store| store.name.clone()),
        store_address: store.and_then(|store| store.address),
        lines,
        total: placed.order.total,
        reserved_at: placed.order.created_at,
    })
}
