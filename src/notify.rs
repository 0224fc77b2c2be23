//! Messaging collaborator interface and fire-and-forget dispatch.
//!
//! Confirmation messages are sent by an external service (the Telegram bot);
//! this crate only defines the [`Notifier`] interface and a small dispatch
//! worker that delivers summaries after the reservation transaction has
//! committed. Delivery is best-effort: a failed or unreachable notifier is
//! logged and swallowed, and can never undo a committed order.

use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// One product line of a confirmation message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    /// Product name at reservation time
    pub product_name: String,
    /// Units reserved
    pub quantity: i32,
    /// Price per unit captured on the order item
    pub unit_price: f64,
}

/// Everything the messaging collaborator needs to build a confirmation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Human-facing order number
    pub order_number: String,
    /// Customer first name, for addressing the message
    pub customer_name: String,
    /// Store the order was placed with
    pub store_name: Option<String>,
    /// Pickup address
    pub store_address: Option<String>,
    /// Reserved lines
    pub lines: Vec<SummaryLine>,
    /// Amount due
    pub total: f64,
    /// When the reservation was made
    pub reserved_at: DateTime<Utc>,
}

/// Interface to the external messaging service.
///
/// Implementations live outside this crate (the Telegram bot service); tests
/// use recording and failing stand-ins.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers a confirmation to the given chat.
    async fn notify(&self, chat_id: i64, summary: &OrderSummary) -> Result<()>;
}

/// Notifier that silently drops everything, for deployments without a bot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _chat_id: i64, _summary: &OrderSummary) -> Result<()> {
        Ok(())
    }
}

struct Notification {
    chat_id: i64,
    summary: OrderSummary,
}

/// Hands confirmations to a background worker after commit.
///
/// The reservation facade calls [`dispatch`](Self::dispatch) once the
/// transaction has committed; the queued summary is delivered by a spawned
/// worker task, so a slow or failing notifier never blocks or fails a
/// reservation.
pub struct NotificationDispatcher {
    tx: mpsc::UnboundedSender<Notification>,
    worker: JoinHandle<()>,
}

impl NotificationDispatcher {
    /// Spawns the delivery worker around the given notifier.
    #[must_use]
    pub fn spawn(notifier: Arc<dyn Notifier>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
        let worker = tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                if let Err(err) = notifier
                    .notify(notification.chat_id, &notification.summary)
                    .await
                {
                    warn!(
                        chat_id = notification.chat_id,
                        order_number = %notification.summary.order_number,
                        error = %err,
                        "order confirmation failed"
                    );
                }
            }
        });
        Self { tx, worker }
    }

    /// Queues a confirmation for delivery. Never blocks and never fails from
    /// the caller's perspective; a missing worker is logged.
    pub fn dispatch(&self, chat_id: i64, summary: OrderSummary) {
        if self.tx.send(Notification { chat_id, summary }).is_err() {
            warn!(chat_id, "notification worker is gone, dropping confirmation");
        }
    }

    /// Closes the queue and waits for the worker to drain it. Used by tests
    /// and orderly shutdown; pending confirmations are still delivered.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(err) = self.worker.await {
            warn!(error = %err, "notification worker did not shut down cleanly");
        }
    }
}
