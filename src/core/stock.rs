//! Stock ledger - serialized read-modify-write access to product stock.
//!
//! The stock count on a product row is the single source of truth for
//! availability, and this module is the only place that decrements it. Every
//! decrement happens under a per-row exclusive lock (`SELECT ... FOR UPDATE`)
//! held for the duration of the enclosing transaction, so two concurrent
//! reservations of the same product are serialized: the second blocks until
//! the first commits or rolls back, then observes the updated count. SQLite
//! has no row-lock clause and serializes writers itself; on Postgres the lock
//! is enforced by the engine.
//!
//! Callers that cache product reads must invalidate them after a successful
//! reservation; this module does not talk to any cache.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QuerySelect, Set, prelude::*};
use tracing::warn;

/// Loads a product row under an exclusive lock scoped to the enclosing
/// transaction.
///
/// Other transactions locking the same product block until this transaction
/// commits or rolls back, at which point they observe the committed stock
/// count. Pass a transaction handle; locking on a bare connection gives no
/// useful isolation.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist.
pub async fn lock_product_for_update<C>(db: &C, product_id: i64) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })
}

/// Atomically validates and decrements a product's stock.
///
/// Locks the product row, checks the requested quantity against the count
/// observed under the lock, and persists the decrement. Under concurrent
/// callers the sum of successful reservations never exceeds the stock that
/// existed before any of them started, and the count never goes negative.
/// On failure the enclosing transaction's rollback releases the lock with
/// the stock unchanged.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for `quantity <= 0` (the facade
/// normalizes user input to at least 1; the ledger still rejects the rest),
/// [`Error::ProductNotFound`] if the product does not exist, and
/// [`Error::InsufficientStock`] with the requested and available amounts when
/// the stock cannot cover the request.
pub async fn reserve_stock<C>(db: &C, product_id: i64, quantity: i32) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let product = lock_product_for_update(db, product_id).await?;

    // A malformed row could carry a negative count; treat it as empty.
    let available = product.stock_quantity.max(0);
    if available < quantity {
        warn!(
            product_id,
            requested = quantity,
            available,
            "insufficient stock for reservation"
        );
        return Err(Error::InsufficientStock {
            requested: quantity,
            available,
        });
    }

    let mut product: product::ActiveModel = product.into();
    product.stock_quantity = Set(available - quantity);
    product.updated_at = Set(chrono::Utc::now().naive_utc());
    product.update(db).await.map_err(Into::into)
}

/// Advisory stock check without taking the lock.
///
/// Useful for pre-flight validation in UIs; the answer can be stale by the
/// time an actual reservation runs, which re-checks under the lock.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist.
pub async fn has_sufficient_stock<C>(db: &C, product_id: i64, required: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    Ok(product.stock_quantity.max(0) >= required.max(0))
}
