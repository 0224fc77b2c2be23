//! Core business logic - framework-agnostic reservation operations.
//!
//! The modules here hold everything with correctness weight: the stock
//! ledger's locked decrement, the transactional order aggregate builder with
//! its unique numbering, and the facade the three reservation callers go
//! through. All functions are async, take a connection or transaction
//! handle, and return Result types for proper error handling.

/// Order aggregate builder, order numbering, and persistence
pub mod order;
/// Reservation facade used by checkout, mini-app, and Telegram callers
pub mod reservation;
/// Stock ledger - locked, atomic stock decrements
pub mod stock;
