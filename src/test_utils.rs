//! Shared test utilities for `FoodBox`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults, plus recording and
//! failing [`Notifier`] stand-ins for exercising the notification path.

#![allow(clippy::unwrap_used)]

use crate::{
    entities::{product, store, user},
    errors::{Error, Result},
    notify::{NotificationDispatcher, Notifier, OrderSummary},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test store with a pickup address.
pub async fn create_test_store(db: &DatabaseConnection, name: &str) -> Result<store::Model> {
    let now = chrono::Utc::now().naive_utc();
    store::ActiveModel {
        name: Set(name.to_string()),
        address: Set(Some("12 Abay Ave".to_string())),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test user with a phone on file and no linked Telegram chat.
///
/// Use [`create_custom_user`] when a test needs to control the phone or the
/// chat link.
pub async fn create_test_user(db: &DatabaseConnection, first_name: &str) -> Result<user::Model> {
    create_custom_user(db, first_name, Some("+7 701 111 2233".to_string()), None).await
}

/// Creates a test user with custom contact details.
pub async fn create_custom_user(
    db: &DatabaseConnection,
    first_name: &str,
    phone: Option<String>,
    telegram_chat_id: Option<i64>,
) -> Result<user::Model> {
    let now = chrono::Utc::now().naive_utc();
    user::ActiveModel {
        first_name: Set(first_name.to_string()),
        phone: Set(phone),
        telegram_chat_id: Set(telegram_chat_id),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * `price`: 1000.0
/// * `stock_quantity`: 5
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    store_id: i64,
) -> Result<product::Model> {
    create_custom_product(db, name, store_id, 1000.0, 5).await
}

/// Creates a test product with custom price and stock.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    store_id: i64,
    price: f64,
    stock_quantity: i32,
) -> Result<product::Model> {
    let now = chrono::Utc::now().naive_utc();
    product::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        price: Set(price),
        original_price: Set(Some(price * 2.0)),
        discount_percentage: Set(Some(50.0)),
        stock_quantity: Set(stock_quantity),
        status: Set(crate::entities::enums::ProductStatus::Available),
        active: Set(true),
        store_id: Set(store_id),
        category_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets up a complete test environment with a store and a product.
/// Returns (db, store, product) for common reservation scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, store::Model, product::Model)> {
    let db = setup_test_db().await?;
    let store = create_test_store(&db, "Corner Bakery").await?;
    let product = create_test_product(&db, "Bakery Box", store.id).await?;
    Ok((db, store, product))
}

/// Notifier that records every delivery for later assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(i64, OrderSummary)>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything delivered so far, in delivery order.
    #[must_use]
    pub fn sent(&self) -> Vec<(i64, OrderSummary)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, chat_id: i64, summary: &OrderSummary) -> Result<()> {
        self.sent.lock().unwrap().push((chat_id, summary.clone()));
        Ok(())
    }
}

/// Notifier that always fails, for exercising the swallow-and-log path.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _chat_id: i64, _summary: &OrderSummary) -> Result<()> {
        Err(Error::Config {
            message: "messaging collaborator unreachable".to_string(),
        })
    }
}

/// Spawns a dispatcher around a fresh [`RecordingNotifier`] and returns both.
#[must_use]
pub fn recording_dispatcher() -> (NotificationDispatcher, RecordingNotifier) {
    let recorder = RecordingNotifier::new();
    let dispatcher = NotificationDispatcher::spawn(Arc::new(recorder.clone()));
    (dispatcher, recorder)
}
