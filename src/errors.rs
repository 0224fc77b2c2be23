//! Unified error types for the reservation core.
//!
//! Reservation failures fall into two camps: expected business outcomes a
//! caller can act on (`ProductNotFound`, `InvalidQuantity`,
//! `InsufficientStock`, ...) and storage/bootstrap failures that abort the
//! current request. `is_client_error` encodes that split for callers that map
//! errors onto HTTP statuses or chat replies. Notification failures never
//! appear here - they are logged and swallowed by the dispatch worker.

use thiserror::Error;

/// All errors produced by the reservation core.
#[derive(Debug, Error)]
pub enum Error {
    /// Referenced product does not exist.
    #[error("Product not found with id: {id}")]
    ProductNotFound {
        /// The product id that was looked up
        id: i64,
    },

    /// Referenced order does not exist.
    #[error("Order not found with id: {id}")]
    OrderNotFound {
        /// The order id that was looked up
        id: i64,
    },

    /// Referenced user does not exist.
    #[error("User not found with id: {id}")]
    UserNotFound {
        /// The user id that was looked up
        id: i64,
    },

    /// Requested quantity was zero or negative.
    #[error("Requested quantity must be greater than zero (got {quantity})")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// Requested quantity exceeds the stock available at lock time.
    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock {
        /// How many units the caller asked for
        requested: i32,
        /// How many units were actually available
        available: i32,
    },

    /// An order must contain at least one item.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// Order number generation lost the uniqueness race and the retry failed.
    #[error("Order number {order_number} already exists")]
    DuplicateOrderNumber {
        /// The colliding candidate number
        order_number: String,
    },

    /// Configuration problem during startup or connection setup.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// I/O error while loading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Storage layer failure or constraint violation.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl Error {
    /// Whether this error is an expected business outcome the caller should
    /// surface to the end user (as opposed to a storage/internal failure).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound { .. }
                | Self::OrderNotFound { .. }
                | Self::UserNotFound { .. }
                | Self::InvalidQuantity { .. }
                | Self::InsufficientStock { .. }
                | Self::EmptyOrder
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
