//! Database configuration module for `FoodBox`.
//!
//! This module handles database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all
//! necessary tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL
//! statements from the entity models, ensuring that the database schema matches
//! the Rust struct definitions without requiring manual SQL. Local runs and
//! tests use `SQLite`; deployments point `DATABASE_URL` at Postgres, where the
//! reservation row locks are enforced by the engine.

use crate::entities::{Order, OrderItem, Product, Store, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/foodbox.sqlite".to_string())
}

/// Establishes a connection to the database using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is
/// set. This function handles connection errors and provides a clean interface
/// for database access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate
/// proper SQL statements for table creation, ensuring the database schema
/// matches the Rust struct definitions. It creates tables for stores, users,
/// products, orders, and order items, including the unique constraint on the
/// order number column.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let store_table = schema.create_table_from_entity(Store);
    let user_table = schema.create_table_from_entity(User);
    let product_table = schema.create_table_from_entity(Product);
    let order_table = schema.create_table_from_entity(Order);
    let order_item_table = schema.create_table_from_entity(OrderItem);

    db.execute(builder.build(&store_table)).await?;
    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&order_item_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        order::Model as OrderModel, order_item::Model as OrderItemModel,
        product::Model as ProductModel, store::Model as StoreModel, user::Model as UserModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<StoreModel> = Store::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<OrderItemModel> = OrderItem::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_default_database_url_fallback() {
        // The fallback applies when DATABASE_URL is absent; an explicit value
        // from the environment always wins, so only check the shape here.
        let url = get_database_url();
        assert!(!url.is_empty());
    }
}
